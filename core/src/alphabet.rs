use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Symbols used by the showcase board: eight pairs on a 4x4 grid.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🎨", "🎮", "🎭", "🎪", "🎯", "🎸", "🎺", "🎹"];

/// Ordered set of distinct symbols; a card refers to its symbol by [`SymbolId`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet {
    symbols: Vec<String>,
}

impl Alphabet {
    pub fn new<I, S>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();

        if symbols.is_empty() {
            return Err(GameError::EmptyAlphabet);
        }

        let max = SymbolId::MAX as usize;
        if symbols.len() > max {
            return Err(GameError::TooManySymbols { max });
        }

        {
            let mut seen = HashSet::with_capacity(symbols.len());
            for symbol in &symbols {
                if !seen.insert(symbol.as_str()) {
                    return Err(GameError::DuplicateSymbol(symbol.clone()));
                }
            }
        }

        Ok(Self { symbols })
    }

    pub fn len(&self) -> PairCount {
        // bounded by `new`
        self.symbols.len() as PairCount
    }

    /// Always false, an alphabet holds at least one symbol.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(usize::from(id)).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(id, symbol)| (id as SymbolId, symbol.as_str()))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|&s| s.to_owned()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Alphabet {
    type Error = GameError;

    fn try_from(symbols: Vec<String>) -> Result<Self> {
        Self::new(symbols)
    }
}

impl From<Alphabet> for Vec<String> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.symbols
    }
}
