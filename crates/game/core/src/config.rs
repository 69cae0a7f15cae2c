//! Game configuration constants and tunable parameters.
//!
//! Every table carries its defaults as associated constants; content files
//! only need to list the values they override.

/// Dice thresholds and divisors used by the action resolver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTables {
    /// Accuracy at or below this misses.
    pub miss_threshold: u32,
    /// Accuracy at or above this is a critical hit.
    pub crit_threshold: u32,
    pub crit_multiplier: f64,
    /// Potential damage when fighting without a weapon.
    pub unarmed_damage: u32,
    /// Potential damage of an equipped weapon whose damage is zero.
    pub natural_weapon_fallback: u32,
    /// Melee hit bonus is `max_health / melee_hit_divisor`.
    pub melee_hit_divisor: u32,
    /// Spell hit bonus is `max_mana / spell_hit_divisor`.
    pub spell_hit_divisor: u32,
    /// Spell damage bonus is `max_mana / spell_damage_divisor`.
    pub spell_damage_divisor: u32,
    /// Spell heal bonus is `round(max_mana / spell_heal_divisor)`.
    pub spell_heal_divisor: u32,
    /// Damage multiplier applied to the secondary target of a multi-target spell.
    pub secondary_multiplier: f64,
}

impl CombatTables {
    pub const DEFAULT_MISS_THRESHOLD: u32 = 10;
    pub const DEFAULT_CRIT_THRESHOLD: u32 = 95;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_UNARMED_DAMAGE: u32 = 1;
    pub const DEFAULT_NATURAL_WEAPON_FALLBACK: u32 = 3;
    pub const DEFAULT_MELEE_HIT_DIVISOR: u32 = 35;
    pub const DEFAULT_SPELL_HIT_DIVISOR: u32 = 15;
    pub const DEFAULT_SPELL_DAMAGE_DIVISOR: u32 = 2;
    pub const DEFAULT_SPELL_HEAL_DIVISOR: u32 = 5;
    pub const DEFAULT_SECONDARY_MULTIPLIER: f64 = 0.5;
}

impl Default for CombatTables {
    fn default() -> Self {
        Self {
            miss_threshold: Self::DEFAULT_MISS_THRESHOLD,
            crit_threshold: Self::DEFAULT_CRIT_THRESHOLD,
            crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            unarmed_damage: Self::DEFAULT_UNARMED_DAMAGE,
            natural_weapon_fallback: Self::DEFAULT_NATURAL_WEAPON_FALLBACK,
            melee_hit_divisor: Self::DEFAULT_MELEE_HIT_DIVISOR,
            spell_hit_divisor: Self::DEFAULT_SPELL_HIT_DIVISOR,
            spell_damage_divisor: Self::DEFAULT_SPELL_DAMAGE_DIVISOR,
            spell_heal_divisor: Self::DEFAULT_SPELL_HEAL_DIVISOR,
            secondary_multiplier: Self::DEFAULT_SECONDARY_MULTIPLIER,
        }
    }
}

/// Odds used when filling freshly generated rooms.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopulationTables {
    pub enemy_chance: f64,
    /// Chance of a loose item in a room without enemies.
    pub loose_item_chance: f64,
    /// d10 results up to this value place one enemy.
    pub single_max: u32,
    /// d10 results up to this value place two enemies; above places three.
    pub double_max: u32,
    /// Enemies carry up to `ceil(health / loot_health_divisor)` extra items.
    pub loot_health_divisor: u32,
}

impl PopulationTables {
    pub const DEFAULT_ENEMY_CHANCE: f64 = 0.5;
    pub const DEFAULT_LOOSE_ITEM_CHANCE: f64 = 0.1;
    pub const DEFAULT_SINGLE_MAX: u32 = 6;
    pub const DEFAULT_DOUBLE_MAX: u32 = 9;
    pub const DEFAULT_LOOT_HEALTH_DIVISOR: u32 = 10;

    /// Number of enemies for a d10 roll.
    pub fn enemy_count(&self, d10: u32) -> usize {
        if d10 <= self.single_max {
            1
        } else if d10 <= self.double_max {
            2
        } else {
            3
        }
    }
}

impl Default for PopulationTables {
    fn default() -> Self {
        Self {
            enemy_chance: Self::DEFAULT_ENEMY_CHANCE,
            loose_item_chance: Self::DEFAULT_LOOSE_ITEM_CHANCE,
            single_max: Self::DEFAULT_SINGLE_MAX,
            double_max: Self::DEFAULT_DOUBLE_MAX,
            loot_health_divisor: Self::DEFAULT_LOOT_HEALTH_DIVISOR,
        }
    }
}

/// Pursuit check: an enemy follows when `d(follow_die) <= follow_threshold`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PursuitTables {
    pub follow_die: u32,
    pub follow_threshold: u32,
}

impl PursuitTables {
    pub const DEFAULT_FOLLOW_DIE: u32 = 10;
    pub const DEFAULT_FOLLOW_THRESHOLD: u32 = 7;
}

impl Default for PursuitTables {
    fn default() -> Self {
        Self {
            follow_die: Self::DEFAULT_FOLLOW_DIE,
            follow_threshold: Self::DEFAULT_FOLLOW_THRESHOLD,
        }
    }
}

/// `rest` command odds and recovery.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RestTables {
    pub ambush_die: u32,
    /// Rolls at or below this are ambushes.
    pub ambush_threshold: u32,
    pub heal: u32,
    pub mana: u32,
    /// Ambushers are drawn from the first N enemy templates.
    pub ambush_pool: usize,
}

impl RestTables {
    pub const DEFAULT_AMBUSH_DIE: u32 = 10;
    pub const DEFAULT_AMBUSH_THRESHOLD: u32 = 2;
    pub const DEFAULT_HEAL: u32 = 3;
    pub const DEFAULT_MANA: u32 = 1;
    pub const DEFAULT_AMBUSH_POOL: usize = 10;
}

impl Default for RestTables {
    fn default() -> Self {
        Self {
            ambush_die: Self::DEFAULT_AMBUSH_DIE,
            ambush_threshold: Self::DEFAULT_AMBUSH_THRESHOLD,
            heal: Self::DEFAULT_HEAL,
            mana: Self::DEFAULT_MANA,
            ambush_pool: Self::DEFAULT_AMBUSH_POOL,
        }
    }
}

/// Starting stats of a new player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerTemplate {
    pub name: String,
    pub health: u32,
    pub mana: u32,
}

impl PlayerTemplate {
    pub const DEFAULT_NAME: &'static str = "Galahad";
    pub const DEFAULT_HEALTH: u32 = 30;
    pub const DEFAULT_MANA: u32 = 10;
}

impl Default for PlayerTemplate {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            health: Self::DEFAULT_HEALTH,
            mana: Self::DEFAULT_MANA,
        }
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatTables,
    pub population: PopulationTables,
    pub pursuit: PursuitTables,
    pub rest: RestTables,
    pub player: PlayerTemplate,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
