//! Read-only inputs of the simulation: content templates and randomness.
//!
//! Nothing in this module mutates game state. The [`Catalog`] is shared by
//! world generation and the session; the [`RandomSource`] is owned by the
//! session and lent to whichever component needs to roll.
mod catalog;
mod rng;

pub use catalog::{Catalog, CatalogError, EnemyTemplate, ItemTemplate, RoomShell, SpellTemplate};
#[cfg(any(test, feature = "test-utils"))]
pub use rng::ScriptedRng;
pub use rng::{PcgRng, RandomSource, pick, shuffle};
