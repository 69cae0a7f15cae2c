//! Content factory for building the catalog and config from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use game_core::{Catalog, GameConfig};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml   (optional)
/// ├── rooms.ron
/// ├── enemies.ron
/// ├── items.ron
/// └── spells.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(
                target: "game_content::factory",
                path = %path.display(),
                "No config file; using defaults"
            );
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load every template catalog and validate cross references.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let rooms = CatalogLoader::load_rooms(&self.data_dir.join("rooms.ron"))?;
        let enemies = CatalogLoader::load_enemies(&self.data_dir.join("enemies.ron"))?;
        let items = CatalogLoader::load_items(&self.data_dir.join("items.ron"))?;
        let spells = CatalogLoader::load_spells(&self.data_dir.join("spells.ron"))?;

        let catalog = Catalog::new(rooms, enemies, items, spells);
        catalog
            .validate()
            .with_context(|| format!("Invalid content in {}", self.data_dir.display()))?;

        tracing::info!(
            target: "game_content::factory",
            rooms = catalog.rooms.len(),
            enemies = catalog.enemies.len(),
            items = catalog.items.len(),
            spells = catalog.spells.len(),
            "Loaded content catalog"
        );
        Ok(catalog)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
