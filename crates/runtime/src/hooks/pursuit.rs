//! Post-command hook that lets active enemies follow the player.

use game_core::PursuitOutcome;
use tracing::debug;

use super::CommandHook;
use crate::api::Result;
use crate::session::Session;

/// Rolls a pursuit check for every active enemy left behind when the
/// player changed rooms during the cycle.
#[derive(Debug, Clone, Copy)]
pub struct PursuitHook;

impl CommandHook<Session> for PursuitHook {
    fn name(&self) -> &'static str {
        "pursuit"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn should_trigger(&self, session: &Session) -> bool {
        session.moved_this_cycle() && session.player.is_alive()
    }

    fn run(&self, session: &mut Session, _args: &[&str]) -> Result<()> {
        let outcomes = session.tracker.resolve_pursuit(
            &mut session.world,
            session.player_room,
            &mut *session.rng,
            &mut session.sink,
        );
        let followed = outcomes
            .iter()
            .filter(|(_, outcome)| *outcome == PursuitOutcome::Followed)
            .count();
        debug!(
            target: "runtime::hooks",
            checked = outcomes.len(),
            followed,
            "Pursuit resolved"
        );
        Ok(())
    }
}
