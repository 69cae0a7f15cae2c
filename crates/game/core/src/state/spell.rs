//! Spells known by combatants.

use strum::{Display, EnumString};

use super::SpellId;

/// Targeting behaviour of a damaging spell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpellEffect {
    /// Primary target only.
    #[default]
    Plain,
    /// Every enemy in the room.
    Area,
    /// Primary target plus one other living enemy at half strength.
    TargetsAdditional,
    /// Damage dealt partially heals the caster.
    Vampiric,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    /// Flavour only.
    pub school: String,
    pub effect: SpellEffect,
    pub mana_cost: u32,
    pub damage: u32,
    pub heals_user: u32,
    pub cast_messages: Vec<String>,
}

impl Spell {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: SpellId::new(id),
            name: name.into(),
            school: String::new(),
            effect: SpellEffect::Plain,
            mana_cost: 0,
            damage: 0,
            heals_user: 0,
            cast_messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effect(mut self, effect: SpellEffect) -> Self {
        self.effect = effect;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    #[must_use]
    pub fn with_heal(mut self, heals_user: u32) -> Self {
        self.heals_user = heals_user;
        self
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}
