use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a card.
///
/// Valid transitions:
/// - Hidden -> Revealed, when selected
/// - Revealed -> Matched, when paired with its twin
/// - Revealed -> Hidden, when a mismatch is resolved
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    /// Whether the symbol is visible to the player
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub position: Position,
    pub symbol: SymbolId,
    pub state: CardState,
}

impl Card {
    pub const fn new(position: Position, symbol: SymbolId) -> Self {
        Self {
            position,
            symbol,
            state: CardState::Hidden,
        }
    }

    pub const fn is_selectable(&self) -> bool {
        matches!(self.state, CardState::Hidden)
    }
}
