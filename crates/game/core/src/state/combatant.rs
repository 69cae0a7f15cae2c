//! Combatants: the player and every enemy share this shape.

use crate::error::GameplayError;
use crate::messages::MessageSink;

use super::{EntityId, Item, ItemCategory, Room, Spell};

/// Where `take` pulls an item from.
pub enum TakeSource<'a> {
    Room(&'a mut Room),
    /// Another combatant; only allowed once it is dead.
    Corpse(&'a mut Combatant),
}

/// Health/mana pools, inventory, equipment and spells of one combatant.
///
/// # Invariants
///
/// - `current_health()` stays within `[0, max_health]`
/// - `dead` is monotonic: once set it never reverts
/// - inventory holds no two items with the same id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub max_health: u32,
    /// Accumulated damage (health consumed).
    damage: u32,
    pub max_mana: u32,
    used_mana: u32,
    inventory: Vec<Item>,
    equipped: Option<Item>,
    spells: Vec<Spell>,
    dead: bool,
}

impl Combatant {
    pub fn new(id: EntityId, name: impl Into<String>, max_health: u32, max_mana: u32) -> Self {
        Self {
            id,
            name: name.into(),
            max_health,
            damage: 0,
            max_mana,
            used_mana: 0,
            inventory: Vec::new(),
            equipped: None,
            spells: Vec::new(),
            dead: false,
        }
    }

    // ===== derived stats =====

    pub fn current_health(&self) -> u32 {
        self.max_health.saturating_sub(self.damage)
    }

    pub fn available_mana(&self) -> u32 {
        self.max_mana.saturating_sub(self.used_mana)
    }

    pub fn used_mana(&self) -> u32 {
        self.used_mana
    }

    pub fn damage_taken(&self) -> u32 {
        self.damage
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn equipped(&self) -> Option<&Item> {
        self.equipped.as_ref()
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.inventory.iter().find(|item| item.matches_name(name))
    }

    pub fn find_spell(&self, name: &str) -> Option<&Spell> {
        self.spells.iter().find(|spell| spell.matches_name(name))
    }

    // ===== health & mana =====

    /// Adds damage, clamped so health never goes below zero.
    pub fn apply_damage(&mut self, amount: u32) {
        self.damage = self.damage.saturating_add(amount).min(self.max_health);
        if self.current_health() == 0 {
            self.dead = true;
        }
    }

    /// Removes damage, floored at zero. The dead stay dead.
    pub fn apply_heal(&mut self, amount: u32) {
        if self.dead {
            return;
        }
        self.damage = self.damage.saturating_sub(amount);
    }

    /// Returns spent mana, floored at zero.
    pub fn apply_mana_gain(&mut self, amount: u32) {
        self.used_mana = self.used_mana.saturating_sub(amount);
    }

    /// Spends mana; callers check [`Combatant::available_mana`] first.
    pub fn spend_mana(&mut self, amount: u32) {
        self.used_mana = self.used_mana.saturating_add(amount).min(self.max_mana);
    }

    pub fn set_dead(&mut self) {
        self.dead = true;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ===== inventory =====

    /// Appends an item and applies its passive bonuses.
    pub fn acquire_item(&mut self, item: Item, sink: &mut MessageSink) {
        if self.inventory.iter().any(|held| held.id == item.id) {
            return;
        }
        self.max_health += item.bonus_health;
        self.max_mana += item.bonus_mana;
        sink.push(format!("{} acquires {}.", self.name, item.name));
        self.inventory.push(item);
    }

    /// Removes an item by name, reverses its bonuses and un-equips it.
    pub fn drop_item(&mut self, name: &str, sink: &mut MessageSink) -> Result<Item, GameplayError> {
        let item = self
            .detach_item(name)
            .ok_or_else(|| GameplayError::ItemNotCarried {
                owner: self.name.clone(),
                item: name.trim().to_string(),
            })?;
        sink.push(format!("{} drops {}.", self.name, item.name));
        Ok(item)
    }

    /// Equips `item`. Equipping nothing is a usage error.
    pub fn equip_item(
        &mut self,
        item: Option<Item>,
        sink: &mut MessageSink,
    ) -> Result<(), GameplayError> {
        let item = item.ok_or(GameplayError::Usage {
            usage: "equip <item name>",
        })?;
        sink.push(format!("{} equips {}.", self.name, item.name));
        self.equipped = Some(item);
        Ok(())
    }

    /// Equips an inventory item by name, without a message.
    pub(crate) fn equip_from_inventory(&mut self, name: &str) -> bool {
        match self.find_item(name).cloned() {
            Some(item) => {
                self.equipped = Some(item);
                true
            }
            None => false,
        }
    }

    /// Learns a spell, replacing a known spell with the same id.
    pub fn add_spell(&mut self, spell: Spell, sink: &mut MessageSink) {
        sink.push(format!("{} learns {}.", self.name, spell.name));
        match self.spells.iter_mut().find(|known| known.id == spell.id) {
            Some(known) => *known = spell,
            None => self.spells.push(spell),
        }
    }

    /// Consumes a healing or mana-restoring item from the inventory.
    pub fn consume(&mut self, name: &str, sink: &mut MessageSink) -> Result<(), GameplayError> {
        let index = self.item_index(name)?;
        let item = &self.inventory[index];
        if !item.is_consumable() {
            return Err(GameplayError::NotConsumable {
                item: item.name.clone(),
            });
        }
        let (heals, restores) = (item.heals, item.restores);
        let Some(item) = self.detach_item(name) else {
            return Err(GameplayError::ItemNotCarried {
                owner: self.name.clone(),
                item: name.trim().to_string(),
            });
        };
        self.apply_heal(heals);
        self.apply_mana_gain(restores);
        sink.push(format!(
            "{} consumes {} (+{} HP, +{} MP).",
            self.name, item.name, heals, restores
        ));
        Ok(())
    }

    /// Moves a named item from a room or a corpse into this inventory.
    pub fn take(
        &mut self,
        source: TakeSource<'_>,
        name: &str,
        sink: &mut MessageSink,
    ) -> Result<(), GameplayError> {
        let item = match source {
            TakeSource::Room(room) => {
                room.take_item(name)
                    .ok_or_else(|| GameplayError::ItemNotHere {
                        item: name.trim().to_string(),
                    })?
            }
            TakeSource::Corpse(corpse) => {
                if corpse.is_alive() {
                    return Err(GameplayError::SourceAlive {
                        name: corpse.name.clone(),
                    });
                }
                corpse
                    .detach_item(name)
                    .ok_or_else(|| GameplayError::ItemNotCarried {
                        owner: corpse.name.clone(),
                        item: name.trim().to_string(),
                    })?
            }
        };
        self.acquire_item(item, sink);
        Ok(())
    }

    /// Loots a corpse: returns every non-natural item it carries or wields.
    ///
    /// A living combatant cannot be searched; the failure is reported and
    /// nothing is returned.
    pub fn search(&mut self, sink: &mut MessageSink) -> Vec<Item> {
        if self.is_alive() {
            sink.report::<(), _>(Err(GameplayError::SearchLiving {
                name: self.name.clone(),
            }));
            return Vec::new();
        }

        let mut loot: Vec<Item> = std::mem::take(&mut self.inventory);
        if let Some(equipped) = self.equipped.take()
            && !loot.iter().any(|item| item.id == equipped.id)
        {
            loot.push(equipped);
        }
        loot.retain(|item| item.category != ItemCategory::Natural);

        if loot.is_empty() {
            sink.push(format!("{} has nothing of value.", self.name));
        } else {
            let names: Vec<&str> = loot.iter().map(|item| item.name.as_str()).collect();
            sink.push(format!("You search {} and find: {}.", self.name, names.join(", ")));
        }
        loot
    }

    /// Lines shown by the `me` command.
    pub fn status_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("--- {} ---", self.name),
            format!(
                "HP: {} | MP: {}",
                self.current_health(),
                self.available_mana()
            ),
        ];
        if let Some(item) = &self.equipped {
            lines.push(format!("Equipped: {}", item.name));
        }
        if !self.inventory.is_empty() {
            lines.push("Items:".to_string());
            lines.extend(self.inventory.iter().map(|item| format!("- {}", item.name)));
        }
        if !self.spells.is_empty() {
            lines.push("Spells:".to_string());
            lines.extend(
                self.spells
                    .iter()
                    .map(|spell| format!("- {} ({} MP)", spell.name, spell.mana_cost)),
            );
        }
        lines
    }

    // ===== internals =====

    fn item_index(&self, name: &str) -> Result<usize, GameplayError> {
        self.inventory
            .iter()
            .position(|item| item.matches_name(name))
            .ok_or_else(|| GameplayError::ItemNotCarried {
                owner: self.name.clone(),
                item: name.trim().to_string(),
            })
    }

    /// Removes a named item from the inventory (or the equipment slot),
    /// reversing its bonuses.
    pub(crate) fn detach_item(&mut self, name: &str) -> Option<Item> {
        let item = match self.inventory.iter().position(|item| item.matches_name(name)) {
            Some(index) => {
                let item = self.inventory.remove(index);
                if self.equipped.as_ref().is_some_and(|e| e.id == item.id) {
                    self.equipped = None;
                }
                self.max_health = self.max_health.saturating_sub(item.bonus_health);
                self.max_mana = self.max_mana.saturating_sub(item.bonus_mana);
                item
            }
            None => {
                if !self.equipped.as_ref().is_some_and(|e| e.matches_name(name)) {
                    return None;
                }
                self.equipped.take()?
            }
        };

        // Losing a health bonus never kills.
        if !self.dead && self.max_health > 0 && self.damage >= self.max_health {
            self.damage = self.max_health - 1;
        }
        self.used_mana = self.used_mana.min(self.max_mana);
        Some(item)
    }
}
