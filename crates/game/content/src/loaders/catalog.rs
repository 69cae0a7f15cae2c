//! Template catalog loaders.
//!
//! Each RON file holds a single struct wrapping a list:
//!
//! ```ron
//! (
//!     items: [
//!         (id: "dagger", name: "Dagger", category: Weapon, damage: 4),
//!     ],
//! )
//! ```

use std::path::Path;

use game_core::{EnemyTemplate, ItemTemplate, RoomShell, SpellTemplate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCatalog {
    pub rooms: Vec<RoomShell>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemTemplate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<SpellTemplate>,
}

/// Loader for template catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load_rooms(path: &Path) -> LoadResult<Vec<RoomShell>> {
        Self::load::<RoomCatalog>(path, "room").map(|c| c.rooms)
    }

    pub fn load_enemies(path: &Path) -> LoadResult<Vec<EnemyTemplate>> {
        Self::load::<EnemyCatalog>(path, "enemy").map(|c| c.enemies)
    }

    pub fn load_items(path: &Path) -> LoadResult<Vec<ItemTemplate>> {
        Self::load::<ItemCatalog>(path, "item").map(|c| c.items)
    }

    pub fn load_spells(path: &Path) -> LoadResult<Vec<SpellTemplate>> {
        Self::load::<SpellCatalog>(path, "spell").map(|c| c.spells)
    }

    fn load<T: DeserializeOwned>(path: &Path, what: &str) -> LoadResult<T> {
        let content = read_file(path)?;
        Self::parse(&content, what)
    }

    /// Parses one catalog document; `what` names it in errors.
    pub fn parse<T: DeserializeOwned>(content: &str, what: &str) -> LoadResult<T> {
        ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {} catalog RON: {}", what, e))
    }
}
