/// Index of a card on the board, stable for the lifetime of a session.
pub type Position = usize;

/// Index of a symbol inside its [`Alphabet`](crate::Alphabet).
pub type SymbolId = u16;

/// Count type used for pairs on a board.
pub type PairCount = u16;

/// Count type used for completed pair evaluations.
pub type MoveCount = u32;

/// Identity of one `new_game` call, used to recognize stale mismatch-resolutions.
pub type Generation = u64;

/// Number of cards on a board holding `pairs` pairs.
pub const fn card_count(pairs: PairCount) -> usize {
    (pairs as usize) * 2
}
