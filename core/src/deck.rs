use core::ops::Index;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::*;

/// Face values of every board slot: symbol ids `0..pairs`, each exactly twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SymbolId>", into = "Vec<SymbolId>")]
pub struct Deck {
    symbols: Vec<SymbolId>,
}

impl Deck {
    /// Build a deck from an explicit layout, used for fixed boards and by generators.
    pub fn from_symbols(symbols: Vec<SymbolId>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(GameError::EmptyAlphabet);
        }

        let max = SymbolId::MAX as usize;
        let pairs = symbols.len() / 2;
        if pairs > max {
            return Err(GameError::TooManySymbols { max });
        }

        let mut counts: HashMap<SymbolId, u8> = HashMap::with_capacity(pairs);
        for &symbol in &symbols {
            if usize::from(symbol) >= pairs.max(1) {
                return Err(GameError::UnknownSymbol(symbol));
            }
            let count = counts.entry(symbol).or_default();
            *count = count.saturating_add(1);
        }

        for id in 0..pairs.max(1) {
            let id = id as SymbolId;
            if counts.get(&id).copied().unwrap_or(0) != 2 {
                return Err(GameError::UnpairedSymbol(id));
            }
        }

        Ok(Self { symbols })
    }

    /// Ordered deck where both copies of each symbol sit side by side.
    pub(crate) fn unshuffled(pairs: PairCount) -> Self {
        let symbols = (0..pairs).flat_map(|id| [id, id]).collect();
        Self { symbols }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [SymbolId] {
        &mut self.symbols
    }

    pub fn pair_count(&self) -> PairCount {
        (self.symbols.len() / 2) as PairCount
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false, a deck holds at least one pair.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol_at(&self, position: Position) -> Option<SymbolId> {
        self.symbols.get(position).copied()
    }

    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    /// Both positions holding `symbol`, in board order.
    pub fn positions_of(&self, symbol: SymbolId) -> Option<[Position; 2]> {
        let mut found = self
            .symbols
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == symbol)
            .map(|(position, _)| position);
        Some([found.next()?, found.next()?])
    }
}

impl Index<Position> for Deck {
    type Output = SymbolId;

    fn index(&self, position: Position) -> &Self::Output {
        &self.symbols[position]
    }
}

impl TryFrom<Vec<SymbolId>> for Deck {
    type Error = GameError;

    fn try_from(symbols: Vec<SymbolId>) -> Result<Self> {
        Self::from_symbols(symbols)
    }
}

impl From<Deck> for Vec<SymbolId> {
    fn from(deck: Deck) -> Self {
        deck.symbols
    }
}
