//! Post-command hook that gives active enemies their attacks.

use game_core::ActionResolver;
use tracing::info;

use super::CommandHook;
use crate::api::Result;
use crate::session::{DEATH_NOTICE, Session};

/// When the handler spent a turn, every active enemy in the player's room
/// that did not just arrive attacks the player, in activation order.
#[derive(Debug, Clone, Copy)]
pub struct EnemyTurnHook;

impl CommandHook<Session> for EnemyTurnHook {
    fn name(&self) -> &'static str {
        "enemy_turn"
    }

    fn should_trigger(&self, session: &Session) -> bool {
        session.turn_spent() && session.player.is_alive()
    }

    fn run(&self, session: &mut Session, _args: &[&str]) -> Result<()> {
        session.tracker.prune_dead(&session.world);
        let ready = session.tracker.ready_in(session.player_room);
        let Some(room) = session.world.room(session.player_room) else {
            return Ok(());
        };

        let mut resolver = ActionResolver::new(&mut *session.rng, &session.config.combat);
        for id in ready {
            if session.player.is_dead() {
                break;
            }
            if let Some(enemy) = room.enemy(id) {
                resolver.attack(enemy, &mut session.player, &mut session.sink);
            }
        }

        if session.player.is_dead() {
            session.sink.push(DEATH_NOTICE);
            info!(
                target: "runtime::hooks",
                room = %session.player_room,
                "Player was killed"
            );
        }
        Ok(())
    }
}
