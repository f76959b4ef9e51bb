use core::fmt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use crate::*;

/// Callback receiving every committed session.
pub type Listener = Box<dyn FnMut(&Session)>;

/// Where per-game seeds come from.
#[derive(Clone, Debug)]
enum SeedSource {
    Entropy,
    /// Reproducible sequence derived from a configured seed
    Sequence(ChaCha8Rng),
}

impl SeedSource {
    fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Sequence(ChaCha8Rng::seed_from_u64(seed)),
            None => Self::Entropy,
        }
    }

    fn next_seed(&mut self) -> u64 {
        match self {
            Self::Entropy => entropy_seed(),
            Self::Sequence(rng) => rng.random(),
        }
    }
}

/// Owner of the current session: applies commands, schedules mismatch-resolutions and notifies listeners.
pub struct MemoryGame<S> {
    alphabet: Alphabet,
    mismatch_delay: Duration,
    seeds: SeedSource,
    scheduler: S,
    session: Arc<Session>,
    generation: Generation,
    listeners: Vec<Listener>,
}

impl<S: Scheduler> MemoryGame<S> {
    /// Validate `config` and deal the first game.
    pub fn new(config: &GameConfig, scheduler: S) -> Result<Self> {
        let alphabet = config.validate()?;
        let mut seeds = SeedSource::new(config.seed);
        let seed = seeds.next_seed();
        let deck = RandomDeckGenerator::new(seed).generate(alphabet.len());
        log::debug!("First game dealt with seed {}", seed);

        Ok(Self {
            alphabet,
            mismatch_delay: config.mismatch_delay(),
            seeds,
            scheduler,
            session: Arc::new(Session::new(&deck, 1)),
            generation: 1,
            listeners: Vec::new(),
        })
    }

    /// Throw away the current session and deal a new one with the next seed.
    pub fn new_game(&mut self) -> Arc<Session> {
        let seed = self.seeds.next_seed();
        self.new_game_with_seed(seed)
    }

    pub fn new_game_with_seed(&mut self, seed: u64) -> Arc<Session> {
        log::debug!("New game with seed {}", seed);
        let deck = RandomDeckGenerator::new(seed).generate(self.alphabet.len());
        self.restart(&deck)
    }

    /// Start a game on a fixed layout instead of a shuffled one.
    pub fn new_game_with_deck(&mut self, deck: &Deck) -> Result<Arc<Session>> {
        if deck.pair_count() != self.alphabet.len() || deck.len() != card_count(self.alphabet.len()) {
            return Err(GameError::DeckSizeMismatch {
                expected: self.alphabet.len(),
                actual: deck.pair_count(),
            });
        }
        Ok(self.restart(deck))
    }

    pub fn select_card(&mut self, position: Position) -> SelectOutcome {
        let (next, outcome) = self.session.select_card(position);
        let next = match next {
            Cow::Owned(next) => next,
            Cow::Borrowed(_) => return outcome,
        };

        if let SelectOutcome::Mismatched(pending) = outcome {
            self.scheduler.schedule(self.mismatch_delay, pending);
        }
        self.commit(next);

        outcome
    }

    /// Deliver a mismatch-resolution, returns whether it applied to the current session.
    pub fn resolve(&mut self, pending: PendingResolution) -> bool {
        match self.session.resolve_mismatch(pending) {
            Some(next) => {
                self.commit(next);
                true
            }
            None => false,
        }
    }

    /// Register a callback for every committed session, starting with the next one.
    pub fn subscribe(&mut self, listener: impl FnMut(&Session) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn snapshot(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Label shown for `card`
    pub fn symbol(&self, card: &Card) -> Option<&str> {
        self.alphabet.get(card.symbol)
    }

    pub fn mismatch_delay(&self) -> Duration {
        self.mismatch_delay
    }

    pub fn move_count(&self) -> MoveCount {
        self.session.move_count()
    }

    pub fn matched_pairs(&self) -> PairCount {
        self.session.matched_pairs()
    }

    pub fn won(&self) -> bool {
        self.session.won()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn restart(&mut self, deck: &Deck) -> Arc<Session> {
        if let Some(pending) = self.session.pending() {
            log::debug!("Cancelling {:?} from previous game", pending);
            self.scheduler.cancel(pending);
        }

        self.generation += 1;
        self.commit(Session::new(deck, self.generation))
    }

    fn commit(&mut self, next: Session) -> Arc<Session> {
        self.session = Arc::new(next);
        let session = &self.session;
        for listener in &mut self.listeners {
            listener(session);
        }
        Arc::clone(&self.session)
    }
}

impl MemoryGame<ManualScheduler> {
    /// Move virtual time forward and deliver every resolution that came due, returns how many applied.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.scheduler.advance(by);
        due.into_iter().filter(|&pending| self.resolve(pending)).count()
    }
}

impl<S: fmt::Debug> fmt::Debug for MemoryGame<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGame")
            .field("alphabet", &self.alphabet)
            .field("mismatch_delay", &self.mismatch_delay)
            .field("scheduler", &self.scheduler)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
