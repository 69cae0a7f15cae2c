//! Enemy and loot placement for freshly built rooms.

use crate::config::PopulationTables;
use crate::env::{Catalog, EnemyTemplate, RandomSource, pick};
use crate::messages::MessageSink;
use crate::state::{Combatant, IdAllocator, ItemCategory, Room, World};

/// Fills rooms with enemies and loose items drawn from a [`Catalog`].
///
/// Placement messages go to a private sink; population is silent.
pub struct RoomPopulator<'a, R: RandomSource + ?Sized> {
    catalog: &'a Catalog,
    tables: &'a PopulationTables,
    rng: &'a mut R,
    scratch: MessageSink,
}

impl<'a, R: RandomSource + ?Sized> RoomPopulator<'a, R> {
    pub fn new(catalog: &'a Catalog, tables: &'a PopulationTables, rng: &'a mut R) -> Self {
        Self {
            catalog,
            tables,
            rng,
            scratch: MessageSink::new(),
        }
    }

    pub fn populate(&mut self, world: &mut World) {
        let (rooms, ids) = world.rooms_and_ids();
        for room in rooms.iter_mut() {
            self.populate_room(room, ids);
        }
        self.scratch.clear();
    }

    /// Either one to three enemies, or (rarely) a single loose item.
    pub fn populate_room(&mut self, room: &mut Room, ids: &mut IdAllocator) {
        let catalog = self.catalog;
        if self.rng.chance(self.tables.enemy_chance) {
            let count = self.tables.enemy_count(self.rng.roll_d10());
            for _ in 0..count {
                if let Some(enemy) = self.create_enemy(&catalog.enemies, ids) {
                    room.add_enemy(enemy, &mut self.scratch);
                }
            }
        } else if self.rng.chance(self.tables.loose_item_chance)
            && let Some(template) = pick(&mut *self.rng, &catalog.items)
        {
            let item = catalog.instantiate_item(template, ids);
            room.add_item(item, &mut self.scratch);
        }

        tracing::trace!(
            target: "game_core::generation",
            room = %room.id,
            enemies = room.enemies().len(),
            items = room.items().len(),
            "Populated room"
        );
    }

    /// Instantiates a random enemy from `pool`.
    ///
    /// The enemy is armed with its template equipment, or with a random
    /// weapon (the placeholder) when the template has none. It then carries
    /// up to `ceil(max_health / loot_health_divisor)` random items; a looted
    /// weapon replaces missing, natural, or placeholder equipment.
    pub fn create_enemy(
        &mut self,
        pool: &[EnemyTemplate],
        ids: &mut IdAllocator,
    ) -> Option<Combatant> {
        let catalog = self.catalog;
        let template = pick(&mut *self.rng, pool)?;
        let mut enemy = Combatant::new(ids.entity(), template.name.clone(), template.health, template.mana);

        let signature = template
            .equipped
            .as_deref()
            .and_then(|id| catalog.item(id));
        let armament = match signature {
            Some(item) => Some(item),
            None => pick(&mut *self.rng, &catalog.weapons()).copied(),
        };
        let mut placeholder = None;
        if let Some(item_template) = armament {
            let item = catalog.instantiate_item(item_template, ids);
            if signature.is_none() {
                placeholder = Some(item.id);
            }
            enemy.acquire_item(item.clone(), &mut self.scratch);
            let _ = enemy.equip_item(Some(item), &mut self.scratch);
        }

        let divisor = self.tables.loot_health_divisor.max(1);
        let loot_count = self.rng.int_in_range(0, enemy.max_health.div_ceil(divisor));
        for _ in 0..loot_count {
            let Some(item_template) = pick(&mut *self.rng, &catalog.items) else {
                break;
            };
            let item = catalog.instantiate_item(item_template, ids);
            let replace = item.category == ItemCategory::Weapon
                && match enemy.equipped() {
                    None => true,
                    Some(current) => {
                        current.category == ItemCategory::Natural || Some(current.id) == placeholder
                    }
                };
            enemy.acquire_item(item.clone(), &mut self.scratch);
            if replace {
                let _ = enemy.equip_item(Some(item), &mut self.scratch);
            }
        }

        for spell in template.spells.iter().filter_map(|id| catalog.spell(id)) {
            enemy.add_spell(spell.instantiate(), &mut self.scratch);
        }

        self.scratch.clear();
        Some(enemy)
    }
}
