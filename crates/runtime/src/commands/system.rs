use game_core::{GameplayError, RoomPopulator};
use tracing::info;

use super::joined;
use crate::api::Result;
use crate::session::Session;

pub const AMBUSH: &str = "While resting, you are ambushed by an enemy!";

/// `rest`: usually recovers a little health and mana, sometimes draws an
/// ambusher that is active immediately.
pub fn rest(session: &mut Session, _args: &[&str]) -> Result<()> {
    if !session.ensure_alive() {
        return Ok(());
    }
    session.spend_turn();

    let tables = session.config.rest.clone();
    let roll = session.rng.roll_die(tables.ambush_die);
    if roll > tables.ambush_threshold {
        session.player.apply_mana_gain(tables.mana);
        session.player.apply_heal(tables.heal);
        session.sink.push(format!(
            "You take a moment to rest and recover +{} HP and +{} MP.",
            tables.heal, tables.mana
        ));
        return Ok(());
    }

    session.sink.push(AMBUSH);
    let pool = &session.catalog.enemies[..tables.ambush_pool.min(session.catalog.enemies.len())];
    let ambusher = RoomPopulator::new(
        &session.catalog,
        &session.config.population,
        &mut *session.rng,
    )
    .create_enemy(pool, &mut session.world.ids);

    if let Some(enemy) = ambusher
        && let Some(room) = session.world.room_mut(session.player_room)
    {
        info!(
            target: "runtime::commands",
            enemy = %enemy.name,
            room = %session.player_room,
            "Ambush while resting"
        );
        session.tracker.track(enemy.id, room.id);
        room.add_enemy(enemy, &mut session.sink);
    }
    Ok(())
}

/// `rename <new name>`.
pub fn rename(session: &mut Session, args: &[&str]) -> Result<()> {
    let name = joined(args);
    if name.is_empty() {
        session.sink.report::<(), _>(Err(GameplayError::Usage {
            usage: "rename <new name>",
        }));
        return Ok(());
    }
    session.player.rename(name.clone());
    session.sink.push(format!("You are now known as {name}."));
    session.spend_turn();
    Ok(())
}

/// `reset`: a brand new world and character.
pub fn reset(session: &mut Session, _args: &[&str]) -> Result<()> {
    session.reset()
}
