//! Data-driven content definitions and loaders.
//!
//! This crate houses the static dungeon content and provides loaders for
//! RON/TOML data files:
//! - Room shells (RON)
//! - Enemy templates (RON)
//! - Item templates (RON)
//! - Spell templates (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed when a session builds its world and never changes
//! afterwards. All loaders use game-core types directly with serde.

#[cfg(feature = "loaders")]
pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CatalogLoader, ConfigLoader, ContentFactory, EnemyCatalog, ItemCatalog, LoadResult,
    RoomCatalog, SpellCatalog,
};
