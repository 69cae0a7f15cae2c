//! World generation: graph construction followed by room population.

pub mod graph;
pub mod populate;

pub use graph::DungeonGraphBuilder;
pub use populate::RoomPopulator;

use crate::config::GameConfig;
use crate::env::{Catalog, RandomSource};
use crate::error::WorldError;
use crate::state::World;

/// Builds and populates a world from the catalog's room shells.
pub fn generate_world(
    catalog: &Catalog,
    config: &GameConfig,
    rng: &mut (impl RandomSource + ?Sized),
) -> Result<World, WorldError> {
    let mut world = DungeonGraphBuilder::new(&mut *rng).build(&catalog.rooms)?;
    RoomPopulator::new(catalog, &config.population, rng).populate(&mut world);
    Ok(world)
}
