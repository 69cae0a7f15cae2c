//! Accuracy and damage rolls.

use crate::config::CombatTables;
use crate::env::RandomSource;

/// Band an accuracy roll falls into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RollOutcome {
    Miss,
    Hit,
    Critical,
}

/// Result of one resolved roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Roll {
    pub outcome: RollOutcome,
    pub damage: u32,
}

impl Roll {
    pub const MISS: Self = Self {
        outcome: RollOutcome::Miss,
        damage: 0,
    };

    pub fn is_miss(&self) -> bool {
        self.outcome == RollOutcome::Miss
    }

    pub fn is_critical(&self) -> bool {
        self.outcome == RollOutcome::Critical
    }
}

/// Classifies an accuracy value (d100 + hit bonus).
///
/// ```text
/// accuracy <= miss_threshold  → Miss
/// accuracy >= crit_threshold  → Critical
/// otherwise                   → Hit
/// ```
pub fn classify(accuracy: u32, tables: &CombatTables) -> RollOutcome {
    if accuracy <= tables.miss_threshold {
        RollOutcome::Miss
    } else if accuracy >= tables.crit_threshold {
        RollOutcome::Critical
    } else {
        RollOutcome::Hit
    }
}

/// Critical damage: `round(potential × crit_multiplier)`.
pub fn critical_damage(potential: u32, tables: &CombatTables) -> u32 {
    (f64::from(potential) * tables.crit_multiplier).round() as u32
}

/// Rolls accuracy, then damage for the resulting band.
///
/// A hit draws uniformly from `[1, potential]`; zero potential deals zero.
pub fn resolve_roll(
    potential: u32,
    hit_bonus: u32,
    tables: &CombatTables,
    rng: &mut (impl RandomSource + ?Sized),
) -> Roll {
    let accuracy = rng.roll_d100() + hit_bonus;
    let outcome = classify(accuracy, tables);
    let damage = match outcome {
        RollOutcome::Miss => 0,
        RollOutcome::Critical => critical_damage(potential, tables),
        RollOutcome::Hit if potential == 0 => 0,
        RollOutcome::Hit => rng.int_in_range(1, potential),
    };

    tracing::trace!(
        target: "game_core::combat",
        accuracy,
        potential,
        ?outcome,
        damage,
        "Resolved roll"
    );

    Roll { outcome, damage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;

    #[test]
    fn bands_follow_thresholds() {
        let tables = CombatTables::default();
        assert_eq!(classify(1, &tables), RollOutcome::Miss);
        assert_eq!(classify(10, &tables), RollOutcome::Miss);
        assert_eq!(classify(11, &tables), RollOutcome::Hit);
        assert_eq!(classify(94, &tables), RollOutcome::Hit);
        assert_eq!(classify(95, &tables), RollOutcome::Critical);
        assert_eq!(classify(130, &tables), RollOutcome::Critical);
    }

    #[test]
    fn miss_deals_nothing() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([5]);
        assert_eq!(resolve_roll(10, 0, &tables, &mut rng), Roll::MISS);
    }

    #[test]
    fn hit_bonus_lifts_out_of_miss_band() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([9, 4]);
        let roll = resolve_roll(10, 2, &tables, &mut rng);
        assert_eq!(roll.outcome, RollOutcome::Hit);
        assert_eq!(roll.damage, 4);
    }

    #[test]
    fn critical_rounds_multiplied_potential() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([97]);
        let roll = resolve_roll(5, 0, &tables, &mut rng);
        assert!(roll.is_critical());
        // 5 × 1.5 = 7.5 rounds to 8
        assert_eq!(roll.damage, 8);
        assert_eq!(rng.remaining_ints(), 0);
    }

    #[test]
    fn hit_with_zero_potential_deals_zero() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50]);
        assert_eq!(resolve_roll(0, 0, &tables, &mut rng).damage, 0);
    }
}
