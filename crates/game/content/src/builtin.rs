//! Default content compiled into the crate.
//!
//! The files under `data/` double as the reference layout for a custom
//! data directory loaded through [`ContentFactory`](crate::ContentFactory).

use anyhow::Context;
use game_core::{Catalog, GameConfig};

use crate::loaders::{
    CatalogLoader, ConfigLoader, EnemyCatalog, ItemCatalog, LoadResult, RoomCatalog, SpellCatalog,
};

const ROOMS: &str = include_str!("../data/rooms.ron");
const ENEMIES: &str = include_str!("../data/enemies.ron");
const ITEMS: &str = include_str!("../data/items.ron");
const SPELLS: &str = include_str!("../data/spells.ron");
const CONFIG: &str = include_str!("../data/config.toml");

/// The built-in catalog, validated.
pub fn catalog() -> LoadResult<Catalog> {
    let rooms: RoomCatalog = CatalogLoader::parse(ROOMS, "room")?;
    let enemies: EnemyCatalog = CatalogLoader::parse(ENEMIES, "enemy")?;
    let items: ItemCatalog = CatalogLoader::parse(ITEMS, "item")?;
    let spells: SpellCatalog = CatalogLoader::parse(SPELLS, "spell")?;

    let catalog = Catalog::new(rooms.rooms, enemies.enemies, items.items, spells.spells);
    catalog.validate().context("Invalid built-in content")?;
    Ok(catalog)
}

/// The built-in configuration.
pub fn config() -> LoadResult<GameConfig> {
    ConfigLoader::parse(CONFIG)
}
