use game_core::{ActionResolver, Combatant, GameplayError, Spell};
use tracing::debug;

use super::joined;
use crate::api::Result;
use crate::session::Session;

/// `attack [target]`. Without a name the most recently arrived living
/// enemy is attacked.
pub fn attack(session: &mut Session, args: &[&str]) -> Result<()> {
    if !session.ensure_alive() {
        return Ok(());
    }
    let name = joined(args);
    let target = session.current_room().and_then(|room| {
        let mut living = room.living_enemies();
        if name.is_empty() {
            living.last().map(|enemy| enemy.id)
        } else {
            living
                .find(|enemy| enemy.name.eq_ignore_ascii_case(&name))
                .map(|enemy| enemy.id)
        }
    });

    let Some(target) = target else {
        let name = if name.is_empty() {
            "enemy".to_string()
        } else {
            name.to_lowercase()
        };
        session
            .sink
            .report::<(), _>(Err(GameplayError::EnemyNotHere { name }));
        return Ok(());
    };

    let Some(enemy) = session
        .world
        .room_mut(session.player_room)
        .and_then(|room| room.enemy_mut(target))
    else {
        return Ok(());
    };
    let mut resolver = ActionResolver::new(&mut *session.rng, &session.config.combat);
    if let Some(report) = resolver.attack(&session.player, enemy, &mut session.sink) {
        debug!(
            target: "runtime::commands",
            enemy = %target,
            outcome = ?report.outcome,
            damage = report.damage,
            defeated = report.defeated,
            "Player attacked"
        );
    }
    session.spend_turn();
    Ok(())
}

/// `cast <spell> [target]`. Spell names may span several words; the
/// longest known prefix of the arguments wins and the rest names the target.
pub fn cast(session: &mut Session, args: &[&str]) -> Result<()> {
    if !session.ensure_alive() {
        return Ok(());
    }
    let Some(first) = args.first() else {
        session.sink.report::<(), _>(Err(GameplayError::Usage {
            usage: "cast <spell> [target]",
        }));
        return Ok(());
    };

    let Some((spell, rest)) = known_spell(&session.player, args) else {
        session.sink.report::<(), _>(Err(GameplayError::UnknownSpell {
            spell: first.to_lowercase(),
        }));
        return Ok(());
    };

    let target_name = joined(rest);
    let target = session.current_room().and_then(|room| {
        let mut living = room.living_enemies();
        if target_name.is_empty() {
            living.next().map(|enemy| enemy.id)
        } else {
            living
                .find(|enemy| enemy.name.eq_ignore_ascii_case(&target_name))
                .map(|enemy| enemy.id)
        }
    });

    if target.is_none() {
        if !target_name.is_empty() {
            session.sink.report::<(), _>(Err(GameplayError::EnemyNotHere {
                name: target_name.to_lowercase(),
            }));
            return Ok(());
        }
        if spell.damage > 0 {
            session.sink.report::<(), _>(Err(GameplayError::NoTarget));
            return Ok(());
        }
    }

    let enemies: &mut [Combatant] = match session.world.room_mut(session.player_room) {
        Some(room) => room.enemies_mut(),
        None => &mut [],
    };
    let mut resolver = ActionResolver::new(&mut *session.rng, &session.config.combat);
    let outcome = resolver.cast(&spell, &mut session.player, target, enemies, &mut session.sink);
    if let Some(Some(report)) = session.sink.report(outcome) {
        debug!(
            target: "runtime::commands",
            spell = %spell.id,
            hits = report.hits.len(),
            healed = report.healed,
            "Player cast a spell"
        );
    }
    session.spend_turn();
    Ok(())
}

/// Finds the spell named by the longest leading run of `args`.
fn known_spell<'a, 'b>(caster: &Combatant, args: &'a [&'b str]) -> Option<(Spell, &'a [&'b str])> {
    (1..=args.len()).rev().find_map(|split| {
        let name = args[..split].join(" ");
        caster
            .find_spell(&name)
            .map(|spell| (spell.clone(), &args[split..]))
    })
}

