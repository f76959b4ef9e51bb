use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;

use crate::*;

/// Positions currently revealed but not yet resolved, in selection order.
pub type Selection = SmallVec<[Position; 2]>;

/// Token for the deferred transition that hides a mismatched pair.
///
/// Only the session it was issued for, and only while that pair is still pending, accepts it back.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingResolution {
    pub generation: Generation,
    pub pair: [Position; 2],
}

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Selection was rejected, the session is unchanged
    NoChange,
    /// First card of a pair was turned face up
    Revealed,
    /// Second card completed a matching pair
    Matched,
    /// Second card completed the last matching pair
    Won,
    /// Second card did not match, the pair stays face up until the resolution is delivered
    Mismatched(PendingResolution),
}

impl SelectOutcome {
    /// Whether this outcome produced a new session
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Matched => true,
            Won => true,
            Mismatched(_) => true,
        }
    }

    /// Whether this outcome completed a pair evaluation
    pub const fn is_move(self) -> bool {
        matches!(self, Self::Matched | Self::Won | Self::Mismatched(_))
    }
}

/// Immutable snapshot of one play-through.
///
/// Transitions never mutate a session, they return a new one (or borrow the old one back when nothing changed).
/// Sessions are only built from a validated [`Deck`], so they serialize for renderers but never deserialize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Session {
    generation: Generation,
    board: Vec<Card>,
    selection: Selection,
    move_count: MoveCount,
    matched_count: usize,
    won: bool,
    pending: Option<PendingResolution>,
}

impl Session {
    pub fn new(deck: &Deck, generation: Generation) -> Self {
        let board = deck
            .symbols()
            .iter()
            .enumerate()
            .map(|(position, &symbol)| Card::new(position, symbol))
            .collect();

        Self {
            generation,
            board,
            selection: Selection::new(),
            move_count: 0,
            matched_count: 0,
            won: false,
            pending: None,
        }
    }

    /// Shuffle a fresh board for `alphabet`, from `seed` when given or from OS entropy otherwise.
    pub fn deal(alphabet: &Alphabet, seed: Option<u64>) -> Self {
        let generator = seed.map_or_else(RandomDeckGenerator::from_entropy, RandomDeckGenerator::new);
        log::debug!("Dealing {} pairs, seed: {}", alphabet.len(), generator.seed());
        let deck = generator.generate(alphabet.len());
        Self::new(&deck, 0)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cards(&self) -> &[Card] {
        &self.board
    }

    pub fn card(&self, position: Position) -> Option<&Card> {
        self.board.get(position)
    }

    pub fn selection(&self) -> &[Position] {
        &self.selection
    }

    pub fn move_count(&self) -> MoveCount {
        self.move_count
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// Mismatched pair waiting to be turned back, if any
    pub fn pending(&self) -> Option<PendingResolution> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn matched_pairs(&self) -> PairCount {
        (self.matched_count / 2) as PairCount
    }

    pub fn total_pairs(&self) -> PairCount {
        (self.board.len() / 2) as PairCount
    }

    /// Whether selecting `position` right now would be accepted
    pub fn can_select(&self, position: Position) -> bool {
        !self.won
            && self.selection.len() < 2
            && self.board.get(position).is_some_and(Card::is_selectable)
    }

    /// Turn a card face up and evaluate the pair once two cards are up.
    pub fn select_card(&self, position: Position) -> (Cow<'_, Self>, SelectOutcome) {
        if !self.can_select(position) {
            log::trace!(
                "Rejected selection of {}, card: {:?}, selection: {:?}",
                position,
                self.board.get(position).map(|card| card.state),
                self.selection
            );
            return (Cow::Borrowed(self), SelectOutcome::NoChange);
        }

        let mut next = self.clone();
        next.board[position].state = CardState::Revealed;
        next.selection.push(position);
        log::trace!("Revealed card at {}", position);

        let outcome = match *next.selection.as_slice() {
            [first, second] => next.evaluate_pair(first, second),
            _ => SelectOutcome::Revealed,
        };

        (Cow::Owned(next), outcome)
    }

    /// Turn a mismatched pair back face down; `None` when `pending` is stale.
    pub fn resolve_mismatch(&self, pending: PendingResolution) -> Option<Self> {
        if self.pending != Some(pending) {
            log::trace!(
                "Ignoring stale resolution {:?}, current generation {}, pending {:?}",
                pending,
                self.generation,
                self.pending
            );
            return None;
        }

        let mut next = self.clone();
        for position in pending.pair {
            next.board[position].state = CardState::Hidden;
        }
        next.selection.clear();
        next.pending = None;
        log::debug!("Turned back mismatched pair {:?}", pending.pair);

        Some(next)
    }

    fn evaluate_pair(&mut self, first: Position, second: Position) -> SelectOutcome {
        self.move_count = self.move_count.saturating_add(1);

        if self.board[first].symbol != self.board[second].symbol {
            let pending = PendingResolution {
                generation: self.generation,
                pair: [first, second],
            };
            self.pending = Some(pending);
            log::debug!("Move {}: {} and {} do not match", self.move_count, first, second);
            return SelectOutcome::Mismatched(pending);
        }

        for position in [first, second] {
            self.board[position].state = CardState::Matched;
        }
        self.matched_count += 2;
        self.selection.clear();
        log::debug!("Move {}: matched {} and {}", self.move_count, first, second);

        if self.matched_count == self.board.len() {
            self.won = true;
            log::debug!("Won in {} moves", self.move_count);
            SelectOutcome::Won
        } else {
            SelectOutcome::Matched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: SymbolId = 0;
    const B: SymbolId = 1;

    fn session(symbols: &[SymbolId]) -> Session {
        Session::new(&Deck::from_symbols(symbols.to_vec()).unwrap(), 3)
    }

    fn select(session: &Session, position: Position) -> (Session, SelectOutcome) {
        let (next, outcome) = session.select_card(position);
        (next.into_owned(), outcome)
    }

    fn states(session: &Session) -> Vec<CardState> {
        session.cards().iter().map(|card| card.state).collect()
    }

    #[test]
    fn new_session_starts_face_down() {
        let session = session(&[A, B, A, B]);

        assert_eq!(session.cards().len(), 4);
        assert!(session.cards().iter().all(|card| card.state == CardState::Hidden));
        assert!(session.selection().is_empty());
        assert_eq!(session.move_count(), 0);
        assert!(!session.won());
        assert_eq!(session.total_pairs(), 2);
        assert_eq!(session.matched_pairs(), 0);
    }

    #[test]
    fn first_selection_reveals_without_counting_a_move() {
        let (session, outcome) = select(&session(&[A, B, A, B]), 1);

        assert_eq!(outcome, SelectOutcome::Revealed);
        assert_eq!(session.card(1).unwrap().state, CardState::Revealed);
        assert_eq!(session.selection(), &[1]);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn mismatch_keeps_pair_revealed_until_resolved() {
        let (session, _) = select(&session(&[A, B, A, B]), 0);
        let (session, outcome) = select(&session, 1);

        let pending = PendingResolution {
            generation: 3,
            pair: [0, 1],
        };
        assert_eq!(outcome, SelectOutcome::Mismatched(pending));
        assert_eq!(session.move_count(), 1);
        assert_eq!(session.selection(), &[0, 1]);
        assert_eq!(
            states(&session),
            [CardState::Revealed, CardState::Revealed, CardState::Hidden, CardState::Hidden]
        );

        let session = session.resolve_mismatch(pending).unwrap();

        assert!(session.cards().iter().all(|card| card.state == CardState::Hidden));
        assert!(session.selection().is_empty());
        assert!(!session.is_pending());
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn third_selection_while_pending_is_rejected() {
        let (session, _) = select(&session(&[A, B, A, B]), 0);
        let (session, _) = select(&session, 1);

        // position 2 would match position 0, it must still be rejected
        let (next, outcome) = session.select_card(2);

        assert_eq!(outcome, SelectOutcome::NoChange);
        assert!(matches!(next, Cow::Borrowed(_)));
        assert_eq!(next.move_count(), 1);
    }

    #[test]
    fn match_clears_selection_and_counts_move() {
        let (session, _) = select(&session(&[A, B, A, B]), 0);
        let (session, outcome) = select(&session, 2);

        assert_eq!(outcome, SelectOutcome::Matched);
        assert_eq!(session.move_count(), 1);
        assert!(session.selection().is_empty());
        assert_eq!(session.matched_pairs(), 1);
        assert!(!session.won());
    }

    #[test]
    fn selecting_face_up_or_missing_cards_is_rejected() {
        let (revealed, _) = select(&session(&[A, B, A, B]), 0);
        let (matched, _) = select(&revealed, 2);

        for (session, position) in [(&revealed, 0), (&matched, 0), (&matched, 2), (&matched, 4)] {
            let (next, outcome) = session.select_card(position);

            assert_eq!(outcome, SelectOutcome::NoChange);
            assert!(core::ptr::eq(next.as_ref(), session));
        }
    }

    #[test]
    fn last_pair_wins_exactly_once() {
        let mut session = session(&[A, B, B, A]);
        let mut outcomes = Vec::new();

        for position in [0, 3, 1, 2] {
            let (next, outcome) = select(&session, position);
            assert_eq!(next.won(), outcome == SelectOutcome::Won);
            outcomes.push(outcome);
            session = next;
        }

        use SelectOutcome::*;
        assert_eq!(outcomes, [Revealed, Matched, Revealed, Won]);
        assert!(session.won());
        assert_eq!(session.move_count(), 2);
        assert_eq!(session.matched_pairs(), 2);
        assert_eq!(session.select_card(0).1, NoChange);
    }

    #[test]
    fn stale_resolution_is_ignored() {
        let (session, _) = select(&session(&[A, B, A, B]), 0);
        let (session, _) = select(&session, 1);

        let other_generation = PendingResolution {
            generation: 4,
            pair: [0, 1],
        };
        let other_pair = PendingResolution {
            generation: 3,
            pair: [0, 3],
        };

        assert_eq!(session.resolve_mismatch(other_generation), None);
        assert_eq!(session.resolve_mismatch(other_pair), None);

        let pending = session.pending().unwrap();
        let resolved = session.resolve_mismatch(pending).unwrap();
        assert_eq!(resolved.resolve_mismatch(pending), None);
    }

    #[test]
    fn foreign_resolution_cannot_reach_outside_the_board() {
        let (session, _) = select(&session(&[A, B, A, B]), 0);
        let (session, outcome) = select(&session, 1);
        assert!(outcome.has_update());

        let forged = PendingResolution {
            generation: 3,
            pair: [7, 9],
        };

        assert_eq!(session.resolve_mismatch(forged), None);
        assert_eq!(session.select_card(9).1, SelectOutcome::NoChange);
        assert!(!SelectOutcome::NoChange.has_update());
    }

    #[test]
    fn deal_uses_whole_alphabet() {
        let alphabet = Alphabet::new(["A", "B", "C"]).unwrap();

        let session = Session::deal(&alphabet, Some(9));

        assert_eq!(session.cards().len(), 6);
        assert_eq!(session, Session::deal(&alphabet, Some(9)));
        assert_eq!(session.generation(), 0);
    }
}
