//! Deterministic game logic and data types for the dungeon crawler.
//!
//! `game-core` defines the canonical rules (world generation, combat,
//! pursuit) and the entity model they operate on. It performs no I/O of its
//! own: every player-facing line goes through a [`MessageSink`], and every
//! random decision through an injected [`RandomSource`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod generation;
pub mod messages;
pub mod pursuit;
pub mod state;

pub use combat::{ActionResolver, AttackReport, CastReport, Roll, RollOutcome, SpellHit};
pub use config::{
    CombatTables, GameConfig, PlayerTemplate, PopulationTables, PursuitTables, RestTables,
};
#[cfg(any(test, feature = "test-utils"))]
pub use env::ScriptedRng;
pub use env::{
    Catalog, CatalogError, EnemyTemplate, ItemTemplate, PcgRng, RandomSource, RoomShell,
    SpellTemplate,
};
pub use error::{ErrorKind, GameError, GameplayError, WorldError};
pub use generation::{DungeonGraphBuilder, RoomPopulator, generate_world};
pub use messages::MessageSink;
pub use pursuit::{ActivatedEnemy, ActivationState, EnemyTracker, PursuitOutcome};
pub use state::{
    Combatant, Direction, EntityId, IdAllocator, Item, ItemCategory, ItemId, LatticePos, Room,
    RoomId, Spell, SpellEffect, SpellId, TakeSource, World,
};
