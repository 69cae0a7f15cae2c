//! Attack, spell and item resolution against live combatants.

use crate::config::CombatTables;
use crate::env::RandomSource;
use crate::error::GameplayError;
use crate::messages::MessageSink;
use crate::state::{Combatant, EntityId, SpellEffect, Spell};

use super::roll::{Roll, RollOutcome, resolve_roll};

/// What a melee attack did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackReport {
    pub outcome: RollOutcome,
    pub damage: u32,
    pub defeated: bool,
}

/// One target of a damaging spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellHit {
    pub target: EntityId,
    pub roll: Roll,
    /// Damage applied after the caster's magic bonus; zero on a miss.
    pub damage: u32,
}

/// What a successful cast did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CastReport {
    pub hits: Vec<SpellHit>,
    /// Health restored to the caster (siphon plus self-heal).
    pub healed: u32,
}

/// Applies combat rules using a borrowed random source.
pub struct ActionResolver<'a, R: RandomSource + ?Sized> {
    rng: &'a mut R,
    tables: &'a CombatTables,
}

impl<'a, R: RandomSource + ?Sized> ActionResolver<'a, R> {
    pub fn new(rng: &'a mut R, tables: &'a CombatTables) -> Self {
        Self { rng, tables }
    }

    /// Melee attack. Returns `None` without effect if either side is dead.
    ///
    /// Potential damage is the equipped weapon's damage (or the natural
    /// fallback when it is zero), otherwise the unarmed value.
    pub fn attack(
        &mut self,
        attacker: &Combatant,
        defender: &mut Combatant,
        sink: &mut MessageSink,
    ) -> Option<AttackReport> {
        if attacker.is_dead() || defender.is_dead() {
            return None;
        }

        let hit_bonus = attacker.max_health / self.tables.melee_hit_divisor.max(1);
        let equipment = attacker.equipped();
        let potential = match equipment {
            Some(item) if item.category.is_armed() => {
                if item.damage == 0 {
                    self.tables.natural_weapon_fallback
                } else {
                    item.damage
                }
            }
            _ => self.tables.unarmed_damage,
        };
        let weapon = equipment.map_or("bare hands", |item| item.name.as_str());

        let roll = resolve_roll(potential, hit_bonus, self.tables, &mut *self.rng);
        if roll.is_miss() {
            sink.push(format!("{} misses {}!", attacker.name, defender.name));
            return Some(AttackReport {
                outcome: roll.outcome,
                damage: 0,
                defeated: false,
            });
        }

        defender.apply_damage(roll.damage);
        let suffix = if roll.is_critical() { " Critical hit!" } else { "" };
        sink.push(format!(
            "{} hits {} with {} for {} damage.{}",
            attacker.name, defender.name, weapon, roll.damage, suffix
        ));
        sink.push(format!(
            "{} has {} HP left.",
            defender.name,
            defender.current_health()
        ));

        let defeated = defender.is_dead();
        if defeated {
            sink.push(format!("{} is defeated.", defender.name));
        }
        Some(AttackReport {
            outcome: roll.outcome,
            damage: roll.damage,
            defeated,
        })
    }

    /// Casts `spell` at `primary` (an id among `room_enemies`).
    ///
    /// Fails with no side effects when the caster lacks mana. Returns
    /// `Ok(None)` if the caster is dead.
    pub fn cast(
        &mut self,
        spell: &Spell,
        caster: &mut Combatant,
        primary: Option<EntityId>,
        room_enemies: &mut [Combatant],
        sink: &mut MessageSink,
    ) -> Result<Option<CastReport>, GameplayError> {
        if caster.is_dead() {
            return Ok(None);
        }
        if caster.available_mana() < spell.mana_cost {
            return Err(GameplayError::InsufficientMana {
                caster: caster.name.clone(),
                spell: spell.name.clone(),
            });
        }

        caster.spend_mana(spell.mana_cost);
        sink.push(format!("{} casts {}!", caster.name, spell.name));
        sink.extend(spell.cast_messages.iter().cloned());

        let max_mana = caster.max_mana;
        let hit_bonus = max_mana / self.tables.spell_hit_divisor.max(1);
        let damage_bonus = max_mana / self.tables.spell_damage_divisor.max(1);
        let heal_bonus =
            (f64::from(max_mana) / f64::from(self.tables.spell_heal_divisor.max(1))).round() as u32;

        let mut report = CastReport::default();

        if spell.damage > 0 {
            for (index, multiplier) in self.spell_targets(spell, primary, room_enemies) {
                let target = &mut room_enemies[index];
                let potential = (f64::from(spell.damage) * multiplier).round() as u32;
                let roll = resolve_roll(potential, hit_bonus, self.tables, &mut *self.rng);

                if roll.is_miss() {
                    sink.push(format!("The spell misses {}!", target.name));
                    report.hits.push(SpellHit {
                        target: target.id,
                        roll,
                        damage: 0,
                    });
                    continue;
                }

                let damage = roll.damage + damage_bonus;
                target.apply_damage(damage);
                sink.push(format!("{} takes {} magic damage.", target.name, damage));
                report.hits.push(SpellHit {
                    target: target.id,
                    roll,
                    damage,
                });

                if spell.effect == SpellEffect::Vampiric && damage > 0 {
                    let siphon = damage / 2 + heal_bonus;
                    caster.apply_heal(siphon);
                    report.healed += siphon;
                    sink.push(format!("{} siphons {} health!", caster.name, siphon));
                }
            }
        }

        if spell.heals_user > 0 {
            let heal = spell.heals_user + heal_bonus;
            caster.apply_heal(heal);
            report.healed += heal;
            sink.push(format!("{} is healed for {}.", caster.name, heal));
        }

        Ok(Some(report))
    }

    /// Indices into `room_enemies` with their damage multipliers.
    fn spell_targets(
        &self,
        spell: &Spell,
        primary: Option<EntityId>,
        room_enemies: &[Combatant],
    ) -> Vec<(usize, f64)> {
        let primary_index =
            primary.and_then(|id| room_enemies.iter().position(|enemy| enemy.id == id));

        match spell.effect {
            SpellEffect::Area => room_enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| enemy.is_alive())
                .map(|(index, _)| (index, 1.0))
                .collect(),
            SpellEffect::TargetsAdditional if room_enemies.len() > 1 => {
                let mut targets: Vec<(usize, f64)> =
                    primary_index.map(|index| (index, 1.0)).into_iter().collect();
                let secondary = room_enemies
                    .iter()
                    .enumerate()
                    .find(|(index, enemy)| Some(*index) != primary_index && enemy.is_alive());
                if let Some((index, _)) = secondary {
                    targets.push((index, self.tables.secondary_multiplier));
                }
                targets
            }
            _ => primary_index.map(|index| (index, 1.0)).into_iter().collect(),
        }
    }

    /// Uses an inventory item: consumables are applied and removed, equipment
    /// is equipped, and any taught spells are learned.
    pub fn use_item(
        &mut self,
        character: &mut Combatant,
        name: &str,
        sink: &mut MessageSink,
    ) -> Result<(), GameplayError> {
        if character.is_dead() {
            return Ok(());
        }
        let item = character
            .find_item(name)
            .cloned()
            .ok_or_else(|| GameplayError::ItemNotCarried {
                owner: character.name.clone(),
                item: name.trim().to_string(),
            })?;

        let mut effective = false;
        if item.is_consumable() {
            character.detach_item(&item.name);
            character.apply_heal(item.heals);
            character.apply_mana_gain(item.restores);
            sink.push(format!("{} uses {}.", character.name, item.name));
            effective = true;
        } else if item.category.is_equippable() {
            character.equip_from_inventory(&item.name);
            sink.push(format!("{} equips the {}.", character.name, item.name));
            effective = true;
        }

        for spell in item.teaches {
            character.add_spell(spell, sink);
            effective = true;
        }

        if !effective {
            sink.push("Nothing happens.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ScriptedRng;
    use crate::state::{Item, ItemCategory, ItemId};

    fn fighter(id: u32, name: &str, health: u32) -> Combatant {
        Combatant::new(EntityId(id), name, health, 0)
    }

    fn armed(mut combatant: Combatant, damage: u32) -> Combatant {
        let mut sink = MessageSink::new();
        let sword = Item::new(ItemId(100 + combatant.id.0), "Sword", ItemCategory::Weapon)
            .with_damage(damage);
        combatant.equip_item(Some(sword), &mut sink).unwrap();
        combatant
    }

    #[test]
    fn forced_hit_reduces_health() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 7]);
        let mut sink = MessageSink::new();
        let attacker = armed(fighter(1, "Attacker", 20), 10);
        let mut defender = fighter(2, "Defender", 100);

        let report = ActionResolver::new(&mut rng, &tables)
            .attack(&attacker, &mut defender, &mut sink)
            .unwrap();

        assert_eq!(report.outcome, RollOutcome::Hit);
        assert_eq!(defender.current_health(), 93);
        assert!(sink.contains("Attacker hits Defender with Sword for 7 damage."));
        assert!(sink.contains("Defender has 93 HP left."));
    }

    #[test]
    fn miss_leaves_defender_untouched() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([3]);
        let mut sink = MessageSink::new();
        let attacker = fighter(1, "Attacker", 20);
        let mut defender = fighter(2, "Defender", 100);

        ActionResolver::new(&mut rng, &tables).attack(&attacker, &mut defender, &mut sink);

        assert_eq!(defender.current_health(), 100);
        assert!(sink.contains("Attacker misses Defender!"));
    }

    #[test]
    fn critical_hit_announces_and_can_defeat() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([99]);
        let mut sink = MessageSink::new();
        let attacker = armed(fighter(1, "Attacker", 20), 10);
        let mut defender = fighter(2, "Defender", 15);

        let report = ActionResolver::new(&mut rng, &tables)
            .attack(&attacker, &mut defender, &mut sink)
            .unwrap();

        assert!(report.defeated);
        assert!(sink.contains("Attacker hits Defender with Sword for 15 damage. Critical hit!"));
        assert!(sink.contains("Defender is defeated."));
    }

    #[test]
    fn unarmed_attack_uses_bare_hands() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 1]);
        let mut sink = MessageSink::new();
        let attacker = fighter(1, "Attacker", 20);
        let mut defender = fighter(2, "Defender", 10);

        ActionResolver::new(&mut rng, &tables).attack(&attacker, &mut defender, &mut sink);

        assert!(sink.contains("Attacker hits Defender with bare hands for 1 damage."));
    }

    #[test]
    fn zero_damage_natural_weapon_uses_fallback() {
        let tables = CombatTables::default();
        // 95 → critical: round(3 × 1.5) = 5
        let mut rng = ScriptedRng::with_ints([95]);
        let mut sink = MessageSink::new();
        let mut attacker = fighter(1, "Wolf", 20);
        attacker
            .equip_item(Some(Item::new(ItemId(1), "Fangs", ItemCategory::Natural)), &mut sink)
            .unwrap();
        let mut defender = fighter(2, "Defender", 10);

        let report = ActionResolver::new(&mut rng, &tables)
            .attack(&attacker, &mut defender, &mut sink)
            .unwrap();
        assert_eq!(report.damage, 5);
    }

    #[test]
    fn dead_participants_skip_attack() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 5]);
        let mut sink = MessageSink::new();
        let attacker = fighter(1, "Attacker", 20);
        let mut defender = fighter(2, "Defender", 10);
        defender.set_dead();

        let report =
            ActionResolver::new(&mut rng, &tables).attack(&attacker, &mut defender, &mut sink);
        assert!(report.is_none());
        assert!(sink.is_empty());
        assert_eq!(rng.remaining_ints(), 2);
    }

    #[test]
    fn insufficient_mana_has_no_side_effects() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 5]);
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Hero", 30, 50);
        caster.spend_mana(45);
        let spell = Spell::new("fireball", "Fireball").with_cost(10).with_damage(8);
        let mut enemies = vec![fighter(1, "Goblin", 20)];

        let err = ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, Some(EntityId(1)), &mut enemies, &mut sink)
            .unwrap_err();

        assert!(matches!(err, GameplayError::InsufficientMana { .. }));
        assert_eq!(caster.used_mana(), 45);
        assert_eq!(enemies[0].current_health(), 20);
        assert!(sink.is_empty());
        assert_eq!(rng.remaining_ints(), 2);
    }

    #[test]
    fn damaging_spell_adds_magic_bonus() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 4]);
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Hero", 30, 10);
        let spell = Spell::new("bolt", "Bolt").with_cost(3).with_damage(6);
        let mut enemies = vec![fighter(1, "Goblin", 20)];

        let report = ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, Some(EntityId(1)), &mut enemies, &mut sink)
            .unwrap()
            .unwrap();

        // rolled 4 + floor(10 / 2)
        assert_eq!(report.hits[0].damage, 9);
        assert_eq!(enemies[0].current_health(), 11);
        assert_eq!(caster.available_mana(), 7);
        assert!(sink.contains("Hero casts Bolt!"));
        assert!(sink.contains("Goblin takes 9 magic damage."));
    }

    #[test]
    fn area_spell_hits_every_living_enemy() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 1, 50, 1]);
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Hero", 30, 0);
        let spell = Spell::new("nova", "Nova")
            .with_effect(SpellEffect::Area)
            .with_damage(4);
        let mut corpse = fighter(3, "Bones", 5);
        corpse.set_dead();
        let mut enemies = vec![fighter(1, "Goblin", 20), corpse, fighter(2, "Orc", 20)];

        let report = ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, None, &mut enemies, &mut sink)
            .unwrap()
            .unwrap();

        let hit: Vec<_> = report.hits.iter().map(|hit| hit.target).collect();
        assert_eq!(hit, [EntityId(1), EntityId(2)]);
        assert_eq!(enemies[0].current_health(), 19);
        assert_eq!(enemies[2].current_health(), 19);
    }

    #[test]
    fn targets_additional_halves_secondary() {
        let tables = CombatTables::default();
        // primary: hit for 8; secondary potential round(8 × 0.5) = 4, crit → 6
        let mut rng = ScriptedRng::with_ints([50, 8, 96]);
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Hero", 30, 0);
        let spell = Spell::new("chain", "Chain Lightning")
            .with_effect(SpellEffect::TargetsAdditional)
            .with_damage(8);
        let mut enemies = vec![fighter(1, "Goblin", 30), fighter(2, "Orc", 30)];

        ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, Some(EntityId(2)), &mut enemies, &mut sink)
            .unwrap();

        assert_eq!(enemies[1].current_health(), 22);
        assert_eq!(enemies[0].current_health(), 24);
    }

    #[test]
    fn vampiric_spell_siphons_health() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::with_ints([50, 6]);
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Hero", 30, 0);
        caster.apply_damage(10);
        let spell = Spell::new("drain", "Drain Life")
            .with_effect(SpellEffect::Vampiric)
            .with_damage(6);
        let mut enemies = vec![fighter(1, "Goblin", 30)];

        ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, Some(EntityId(1)), &mut enemies, &mut sink)
            .unwrap();

        assert_eq!(caster.current_health(), 23);
        assert!(sink.contains("Hero siphons 3 health!"));
    }

    #[test]
    fn healing_spell_needs_no_target() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::new();
        let mut sink = MessageSink::new();
        let mut caster = Combatant::new(EntityId::PLAYER, "Attacker", 30, 10);
        caster.apply_damage(20);
        let spell = Spell::new("mend", "Mend").with_cost(2).with_heal(13);

        ActionResolver::new(&mut rng, &tables)
            .cast(&spell, &mut caster, None, &mut [], &mut sink)
            .unwrap();

        // 13 + round(10 / 5)
        assert!(sink.contains("Attacker is healed for 15."));
        assert_eq!(caster.current_health(), 25);
    }

    #[test]
    fn use_item_consumes_equips_and_teaches() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::new();
        let mut sink = MessageSink::new();
        let mut hero = Combatant::new(EntityId::PLAYER, "Attacker", 30, 10);
        hero.apply_damage(10);
        hero.acquire_item(
            Item::new(ItemId(1), "Health Potion", ItemCategory::Consumable).with_potency(5, 0),
            &mut sink,
        );
        hero.acquire_item(
            Item::new(ItemId(2), "Battle Axe", ItemCategory::Weapon).with_damage(9),
            &mut sink,
        );
        hero.acquire_item(
            Item::new(ItemId(3), "Tome", ItemCategory::SpellBook)
                .with_spells(vec![Spell::new("spark", "Spark")]),
            &mut sink,
        );
        let mut resolver = ActionResolver::new(&mut rng, &tables);

        resolver.use_item(&mut hero, "health potion", &mut sink).unwrap();
        resolver.use_item(&mut hero, "battle axe", &mut sink).unwrap();
        resolver.use_item(&mut hero, "tome", &mut sink).unwrap();

        assert_eq!(hero.current_health(), 25);
        assert_eq!(hero.equipped().map(|i| i.name.as_str()), Some("Battle Axe"));
        assert!(hero.find_spell("spark").is_some());
        assert!(sink.contains("Attacker uses Health Potion."));
        assert!(sink.contains("Attacker equips the Battle Axe."));
        assert!(sink.contains("Attacker learns Spark."));
    }

    #[test]
    fn use_item_reports_missing_and_inert() {
        let tables = CombatTables::default();
        let mut rng = ScriptedRng::new();
        let mut sink = MessageSink::new();
        let mut hero = Combatant::new(EntityId::PLAYER, "Hero", 30, 10);
        hero.acquire_item(Item::new(ItemId(1), "Pebble", ItemCategory::Trinket), &mut sink);
        let mut resolver = ActionResolver::new(&mut rng, &tables);

        assert!(resolver.use_item(&mut hero, "lantern", &mut sink).is_err());
        resolver.use_item(&mut hero, "pebble", &mut sink).unwrap();
        assert!(sink.contains("Nothing happens."));
    }
}
