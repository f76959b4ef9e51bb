use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;

/// Generation strategy that deals every pair exactly twice and then applies an unbiased Fisher-Yates shuffle.
///
/// The stream is ChaCha8 and the index sampling is done here, so a seed deals the same deck on every platform and
/// `rand` release.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed taken from the thread-local OS-seeded generator.
    pub fn from_entropy() -> Self {
        Self::new(entropy_seed())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, pairs: PairCount) -> Deck {
        // every deck needs at least one pair
        let pairs = pairs.max(1);
        let mut deck = Deck::unshuffled(pairs);

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        shuffle(deck.as_mut_slice(), &mut rng);
        log::trace!("Dealt {} pairs from seed {}: {:?}", pairs, self.seed, deck.symbols());

        deck
    }
}

pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Fisher-Yates, walking from the back.
fn shuffle<T>(slice: &mut [T], rng: &mut impl RngCore) {
    for i in (1..slice.len()).rev() {
        // decks are far below u32::MAX cards
        let j = below(rng, (i + 1) as u32);
        slice.swap(i, j as usize);
    }
}

/// Uniform value in `0..bound`, widening multiply with rejection (Lemire).
fn below(rng: &mut impl RngCore, bound: u32) -> u32 {
    let threshold = bound.wrapping_neg() % bound;
    loop {
        let product = u64::from(rng.next_u32()) * u64::from(bound);
        if product as u32 >= threshold {
            return (product >> 32) as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_deals_same_deck() {
        let a = RandomDeckGenerator::new(42).generate(8);
        let b = RandomDeckGenerator::new(42).generate(8);

        assert_eq!(a, b);
    }

    #[test]
    fn seeded_decks_are_pinned() {
        assert_eq!(RandomDeckGenerator::new(2).generate(2).symbols(), &[1, 0, 1, 0]);
        assert_eq!(RandomDeckGenerator::new(7).generate(3).symbols(), &[0, 1, 1, 2, 2, 0]);
        assert_eq!(
            RandomDeckGenerator::new(42).generate(8).symbols(),
            &[3, 3, 7, 0, 0, 5, 6, 4, 2, 7, 2, 4, 6, 1, 5, 1]
        );
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        for bound in 1..64 {
            assert!((0..32).all(|_| below(&mut rng, bound) < bound));
        }
    }

    #[test]
    fn generated_deck_holds_every_symbol_twice() {
        for seed in 0..32 {
            let deck = RandomDeckGenerator::new(seed).generate(8);

            assert_eq!(deck.len(), card_count(8));
            assert_eq!(Deck::from_symbols(deck.symbols().to_vec()), Ok(deck));
        }
    }

    #[test]
    fn different_seeds_eventually_differ() {
        let first = RandomDeckGenerator::new(0).generate(8);

        assert!((1..16).any(|seed| RandomDeckGenerator::new(seed).generate(8) != first));
    }

    #[test]
    fn zero_pairs_fall_back_to_one() {
        let deck = RandomDeckGenerator::new(7).generate(0);

        assert_eq!(deck.symbols(), &[0, 0]);
    }
}
