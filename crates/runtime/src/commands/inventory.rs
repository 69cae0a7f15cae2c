use game_core::{ActionResolver, GameplayError, TakeSource};
use tracing::debug;

use super::joined;
use crate::api::Result;
use crate::session::Session;

/// `take <item>`: from the floor first, then from the first corpse
/// carrying a matching item.
pub fn take(session: &mut Session, args: &[&str]) -> Result<()> {
    let name = joined(args);
    if name.is_empty() {
        session.sink.report::<(), _>(Err(GameplayError::Usage {
            usage: "take <item name>",
        }));
        return Ok(());
    }
    if !session.ensure_alive() {
        return Ok(());
    }
    session.spend_turn();

    let Some(room) = session.world.room_mut(session.player_room) else {
        return Ok(());
    };
    let result = if room.items().iter().any(|item| item.matches_name(&name)) {
        session
            .player
            .take(TakeSource::Room(room), &name, &mut session.sink)
    } else {
        match room
            .enemies_mut()
            .iter_mut()
            .find(|enemy| enemy.is_dead() && enemy.find_item(&name).is_some())
        {
            Some(corpse) => session
                .player
                .take(TakeSource::Corpse(corpse), &name, &mut session.sink),
            None => Err(GameplayError::ItemNotHere { item: name }),
        }
    };
    session.sink.report(result);
    Ok(())
}

/// `equip <item>`. Equipping is free: enemies do not act on it.
pub fn equip(session: &mut Session, args: &[&str]) -> Result<()> {
    use_item(session, args, "equip <item name>")
}

/// `consume <item>`. Drinking is free: enemies do not act on it.
pub fn consume(session: &mut Session, args: &[&str]) -> Result<()> {
    use_item(session, args, "consume <item name>")
}

fn use_item(session: &mut Session, args: &[&str], usage: &'static str) -> Result<()> {
    let name = joined(args);
    if name.is_empty() {
        session
            .sink
            .report::<(), _>(Err(GameplayError::Usage { usage }));
        return Ok(());
    }
    if !session.ensure_alive() {
        return Ok(());
    }
    let mut resolver = ActionResolver::new(&mut *session.rng, &session.config.combat);
    let result = resolver.use_item(&mut session.player, &name, &mut session.sink);
    session.sink.report(result);
    Ok(())
}

/// `drop <item>`: the item lands on the floor of the current room.
pub fn drop(session: &mut Session, args: &[&str]) -> Result<()> {
    let name = joined(args);
    if name.is_empty() {
        session.sink.report::<(), _>(Err(GameplayError::Usage {
            usage: "drop <item name>",
        }));
        return Ok(());
    }
    if !session.ensure_alive() {
        return Ok(());
    }
    session.spend_turn();

    let result = session.player.drop_item(&name, &mut session.sink);
    if let Some(item) = session.sink.report(result)
        && let Some(room) = session.world.room_mut(session.player_room)
    {
        room.add_item(item, &mut session.sink);
    }
    Ok(())
}

/// `search [target]`: loots a named (or the first) corpse. The corpse is
/// removed from the room and from the tracker.
pub fn search(session: &mut Session, args: &[&str]) -> Result<()> {
    if !session.ensure_alive() {
        return Ok(());
    }
    session.spend_turn();

    let name = joined(args);
    let corpse = session.current_room().and_then(|room| {
        room.enemies()
            .iter()
            .filter(|enemy| enemy.is_dead())
            .find(|enemy| name.is_empty() || enemy.name.eq_ignore_ascii_case(&name))
            .map(|enemy| enemy.id)
    });
    let Some(id) = corpse else {
        let error = if name.is_empty() {
            GameplayError::NothingToSearch
        } else {
            GameplayError::EnemyNotHere {
                name: name.to_lowercase(),
            }
        };
        session.sink.report::<(), _>(Err(error));
        return Ok(());
    };

    let Some(mut corpse) = session
        .world
        .room_mut(session.player_room)
        .and_then(|room| room.extract_enemy(id))
    else {
        return Ok(());
    };
    let loot = corpse.search(&mut session.sink);
    debug!(
        target: "runtime::commands",
        enemy = %id,
        items = loot.len(),
        "Corpse looted"
    );
    for item in loot {
        session.player.acquire_item(item, &mut session.sink);
    }
    session.tracker.forget(id);
    Ok(())
}
