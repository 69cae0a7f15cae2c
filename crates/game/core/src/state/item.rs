//! Item instances carried by combatants or lying in rooms.

use strum::{Display, EnumString};

use super::{ItemId, Spell};

/// Item category.
///
/// `Natural` items are innate attacks (claws, fangs) that count as weapons in
/// combat but are never dropped as loot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Weapon,
    Armor,
    Shield,
    Consumable,
    Trinket,
    Scroll,
    SpellBook,
    Natural,
}

impl ItemCategory {
    /// Categories that can be equipped through `use`.
    pub const fn is_equippable(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor | Self::Shield)
    }

    /// Categories that count as armed in melee.
    pub const fn is_armed(self) -> bool {
        matches!(self, Self::Weapon | Self::Natural)
    }
}

/// A single item instance.
///
/// Everything except `resilience` is fixed once the item is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// Template the item was instantiated from.
    pub template: String,
    pub name: String,
    pub category: ItemCategory,
    pub damage: u32,
    pub resilience: u32,
    pub bonus_health: u32,
    pub bonus_mana: u32,
    pub heals: u32,
    pub restores: u32,
    pub teaches: Vec<Spell>,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        let name = name.into();
        Self {
            id,
            template: name.to_lowercase().replace(' ', "_"),
            name,
            category,
            damage: 0,
            resilience: 0,
            bonus_health: 0,
            bonus_mana: 0,
            heals: 0,
            restores: 0,
            teaches: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_resilience(mut self, resilience: u32) -> Self {
        self.resilience = resilience;
        self
    }

    #[must_use]
    pub fn with_bonuses(mut self, health: u32, mana: u32) -> Self {
        self.bonus_health = health;
        self.bonus_mana = mana;
        self
    }

    #[must_use]
    pub fn with_potency(mut self, heals: u32, restores: u32) -> Self {
        self.heals = heals;
        self.restores = restores;
        self
    }

    #[must_use]
    pub fn with_spells(mut self, spells: Vec<Spell>) -> Self {
        self.teaches = spells;
        self
    }

    /// True if using the item restores health or mana.
    pub fn is_consumable(&self) -> bool {
        self.heals > 0 || self.restores > 0
    }

    /// Case-insensitive name comparison used by every lookup by name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }

    /// Reduces durability, returning the remaining resilience.
    pub fn wear(&mut self, amount: u32) -> u32 {
        self.resilience = self.resilience.saturating_sub(amount);
        self.resilience
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wear_floors_at_zero() {
        let mut shield = Item::new(ItemId(1), "Buckler", ItemCategory::Shield).with_resilience(5);
        assert_eq!(shield.wear(3), 2);
        assert_eq!(shield.wear(10), 0);
    }

    #[test]
    fn name_matching_ignores_case_and_padding() {
        let potion = Item::new(ItemId(1), "Health Potion", ItemCategory::Consumable);
        assert!(potion.matches_name("  health potion "));
        assert!(!potion.matches_name("mana potion"));
    }

    #[test]
    fn category_flags() {
        assert!(ItemCategory::Shield.is_equippable());
        assert!(!ItemCategory::Natural.is_equippable());
        assert!(ItemCategory::Natural.is_armed());
        assert!(!ItemCategory::Trinket.is_armed());
    }
}
