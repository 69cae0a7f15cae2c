//! Static content templates and the catalog that bundles them.
//!
//! Templates are plain data loaded by `game-content`. The catalog validates
//! cross references once and then stamps out fresh [`Item`] and [`Spell`]
//! instances on demand.

use std::collections::HashSet;

use crate::error::{ErrorKind, GameError};
use crate::state::{IdAllocator, Item, ItemCategory, Spell, SpellEffect, SpellId};

/// Description and type tag of one room, before placement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomShell {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: u32,
    /// Item template the enemy always starts with (claws, a signature blade).
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipped: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<SpellId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resilience: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_mana: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heals: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub restores: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub teaches: Vec<SpellId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellTemplate {
    pub id: SpellId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub school: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: SpellEffect,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heals_user: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_messages: Vec<String>,
}

impl SpellTemplate {
    pub fn instantiate(&self) -> Spell {
        Spell {
            id: self.id.clone(),
            name: self.name.clone(),
            school: self.school.clone(),
            effect: self.effect,
            mana_cost: self.mana_cost,
            damage: self.damage,
            heals_user: self.heals_user,
            cast_messages: self.cast_messages.clone(),
        }
    }
}

/// Cross-reference problems found while validating a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog has no room shells")]
    NoRooms,

    #[error("catalog has no enemy templates")]
    NoEnemies,

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },

    #[error("`{owner}` references unknown spell `{spell}`")]
    UnknownSpell { owner: String, spell: SpellId },

    #[error("`{owner}` references unknown item `{item}`")]
    UnknownItem { owner: String, item: String },
}

impl GameError for CatalogError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Construction
    }
}

/// Every template available to world generation and the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub rooms: Vec<RoomShell>,
    pub enemies: Vec<EnemyTemplate>,
    pub items: Vec<ItemTemplate>,
    pub spells: Vec<SpellTemplate>,
}

impl Catalog {
    pub fn new(
        rooms: Vec<RoomShell>,
        enemies: Vec<EnemyTemplate>,
        items: Vec<ItemTemplate>,
        spells: Vec<SpellTemplate>,
    ) -> Self {
        Self {
            rooms,
            enemies,
            items,
            spells,
        }
    }

    /// Checks ids are unique and every reference resolves.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.rooms.is_empty() {
            return Err(CatalogError::NoRooms);
        }
        if self.enemies.is_empty() {
            return Err(CatalogError::NoEnemies);
        }

        unique("room", self.rooms.iter().map(|r| r.id.as_str()))?;
        unique("enemy", self.enemies.iter().map(|e| e.id.as_str()))?;
        unique("item", self.items.iter().map(|i| i.id.as_str()))?;
        unique("spell", self.spells.iter().map(|s| s.id.0.as_str()))?;

        for item in &self.items {
            for spell in &item.teaches {
                self.require_spell(&item.id, spell)?;
            }
        }
        for enemy in &self.enemies {
            if let Some(item) = &enemy.equipped
                && self.item(item).is_none()
            {
                return Err(CatalogError::UnknownItem {
                    owner: enemy.id.clone(),
                    item: item.clone(),
                });
            }
            for spell in &enemy.spells {
                self.require_spell(&enemy.id, spell)?;
            }
        }
        Ok(())
    }

    fn require_spell(&self, owner: &str, spell: &SpellId) -> Result<(), CatalogError> {
        match self.spell(spell) {
            Some(_) => Ok(()),
            None => Err(CatalogError::UnknownSpell {
                owner: owner.to_string(),
                spell: spell.clone(),
            }),
        }
    }

    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn spell(&self, id: &SpellId) -> Option<&SpellTemplate> {
        self.spells.iter().find(|spell| &spell.id == id)
    }

    pub fn weapons(&self) -> Vec<&ItemTemplate> {
        self.items
            .iter()
            .filter(|item| item.category == ItemCategory::Weapon)
            .collect()
    }

    pub fn non_weapons(&self) -> Vec<&ItemTemplate> {
        self.items
            .iter()
            .filter(|item| !matches!(item.category, ItemCategory::Weapon | ItemCategory::Natural))
            .collect()
    }

    /// Creates a fresh item instance; unknown taught spells are skipped.
    pub fn instantiate_item(&self, template: &ItemTemplate, ids: &mut IdAllocator) -> Item {
        let teaches = template
            .teaches
            .iter()
            .filter_map(|id| self.spell(id))
            .map(SpellTemplate::instantiate)
            .collect();

        Item::new(ids.item(), template.name.clone(), template.category)
            .with_template(template.id.clone())
            .with_damage(template.damage)
            .with_resilience(template.resilience)
            .with_bonuses(template.bonus_health, template.bonus_mana)
            .with_potency(template.heals, template.restores)
            .with_spells(teaches)
    }
}

fn unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(id: &str) -> SpellTemplate {
        SpellTemplate {
            id: SpellId::new(id),
            name: id.to_uppercase(),
            school: "evocation".into(),
            effect: SpellEffect::Plain,
            mana_cost: 3,
            damage: 6,
            heals_user: 0,
            cast_messages: vec![],
        }
    }

    fn item(id: &str, category: ItemCategory) -> ItemTemplate {
        ItemTemplate {
            id: id.into(),
            name: id.into(),
            category,
            damage: 0,
            resilience: 0,
            bonus_health: 0,
            bonus_mana: 0,
            heals: 0,
            restores: 0,
            teaches: vec![],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![RoomShell {
                id: "hall".into(),
                kind: "hall".into(),
                description: "A hall.".into(),
            }],
            vec![EnemyTemplate {
                id: "rat".into(),
                name: "Rat".into(),
                health: 4,
                mana: 0,
                equipped: None,
                spells: vec![],
            }],
            vec![item("dagger", ItemCategory::Weapon)],
            vec![spell("spark")],
        )
    }

    #[test]
    fn valid_catalog_passes() {
        assert_eq!(catalog().validate(), Ok(()));
    }

    #[test]
    fn dangling_spell_is_rejected() {
        let mut catalog = catalog();
        catalog.enemies[0].spells.push(SpellId::new("meteor"));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownSpell { .. })
        ));
    }

    #[test]
    fn dangling_equipment_is_rejected() {
        let mut catalog = catalog();
        catalog.enemies[0].equipped = Some("claws".into());
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownItem { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = catalog();
        catalog.spells.push(spell("spark"));
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateId {
                kind: "spell",
                id: "spark".into()
            })
        );
    }

    #[test]
    fn empty_rooms_are_rejected() {
        let mut catalog = catalog();
        catalog.rooms.clear();
        assert_eq!(catalog.validate(), Err(CatalogError::NoRooms));
    }

    #[test]
    fn instances_get_fresh_ids_and_spells() {
        let mut catalog = catalog();
        let mut scroll = item("scroll", ItemCategory::Scroll);
        scroll.teaches.push(SpellId::new("spark"));
        catalog.items.push(scroll);

        let mut ids = IdAllocator::new();
        let template = catalog.item("scroll").unwrap();
        let first = catalog.instantiate_item(template, &mut ids);
        let second = catalog.instantiate_item(template, &mut ids);

        assert_ne!(first.id, second.id);
        assert_eq!(first.template, "scroll");
        assert_eq!(first.teaches.len(), 1);
        assert_eq!(first.teaches[0].name, "SPARK");
    }
}
