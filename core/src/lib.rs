//! Memory-matching game engine: a shuffled board of symbol pairs, a two-card selection, and a deferred
//! transition that turns mismatched pairs back over.
//!
//! [`Session`] is an immutable snapshot with pure transitions, [`MemoryGame`] owns the current session and
//! hands mismatch-resolutions to an injected [`Scheduler`].

pub use alphabet::*;
pub use card::*;
pub use config::*;
pub use deck::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use scheduler::*;
pub use session::*;
pub use types::*;

mod alphabet;
mod card;
mod config;
mod deck;
mod engine;
mod error;
mod generator;
mod scheduler;
mod session;
mod types;
