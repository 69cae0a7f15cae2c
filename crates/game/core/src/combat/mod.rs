//! Combat resolution system.
//!
//! [`roll`] holds the pure dice math; [`ActionResolver`] applies it to
//! combatants and narrates the result through the message sink.
//!
//! # Core Functions
//!
//! - `ActionResolver::attack`: melee exchange between two combatants
//! - `ActionResolver::cast`: spell with mana gating and multi-target effects
//! - `ActionResolver::use_item`: consume, equip and learn from an item

pub mod resolver;
pub mod roll;

pub use resolver::{ActionResolver, AttackReport, CastReport, SpellHit};
pub use roll::{Roll, RollOutcome, classify, critical_damage, resolve_roll};
