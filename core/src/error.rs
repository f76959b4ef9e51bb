use thiserror::Error;

use crate::{PairCount, SymbolId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Alphabet must contain at least one symbol")]
    EmptyAlphabet,
    #[error("Symbol {0:?} appears more than once in the alphabet")]
    DuplicateSymbol(String),
    #[error("Too many symbols, at most {max} are supported")]
    TooManySymbols { max: usize },
    #[error("Symbol {0} does not appear exactly twice in the deck")]
    UnpairedSymbol(SymbolId),
    #[error("Symbol {0} is not part of the alphabet")]
    UnknownSymbol(SymbolId),
    #[error("Deck holds {actual} pairs but the alphabet has {expected} symbols")]
    DeckSizeMismatch { expected: PairCount, actual: PairCount },
    #[error("Board needs at least one column")]
    InvalidColumns,
}

pub type Result<T> = std::result::Result<T, GameError>;
