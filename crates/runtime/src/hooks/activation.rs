//! Pre-command hook that wakes the enemies sharing the player's room.

use tracing::debug;

use super::{CommandHook, HookCriticality};
use crate::api::Result;
use crate::session::Session;

/// Starts a new cycle and activates every living, untracked enemy in the
/// player's room.
///
/// Runs before the handler so that enemies present when the command was
/// typed get to act on it, even if the command moves the player away.
#[derive(Debug, Clone, Copy)]
pub struct ActivationHook;

impl CommandHook<Session> for ActivationHook {
    fn name(&self) -> &'static str {
        "activation"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn criticality(&self) -> HookCriticality {
        // Cycle bookkeeping feeds every post hook.
        HookCriticality::Critical
    }

    fn run(&self, session: &mut Session, _args: &[&str]) -> Result<()> {
        session.begin_cycle();
        let activated = session
            .tracker
            .activate_room(&session.world, session.player_room);
        if activated > 0 {
            debug!(
                target: "runtime::hooks",
                room = %session.player_room,
                activated,
                "Enemies noticed the player"
            );
        }
        Ok(())
    }
}
