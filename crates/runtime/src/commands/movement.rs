use std::str::FromStr;

use game_core::{Direction, GameplayError};
use tracing::debug;

use crate::api::Result;
use crate::session::Session;

/// `go <direction>`.
pub fn go(session: &mut Session, args: &[&str]) -> Result<()> {
    let Some(label) = args.first() else {
        session.sink.report::<(), _>(Err(GameplayError::Usage {
            usage: "go <direction>",
        }));
        return Ok(());
    };
    match Direction::from_str(label) {
        Ok(direction) => travel(session, direction),
        Err(_) => {
            session.sink.report::<(), _>(Err(GameplayError::NotADirection {
                label: label.to_string(),
            }));
            Ok(())
        }
    }
}

/// Moves through an exit and describes the destination. Walking into a
/// wall still costs the turn.
pub fn travel(session: &mut Session, direction: Direction) -> Result<()> {
    if !session.ensure_alive() {
        return Ok(());
    }
    session.spend_turn();

    let destination = session
        .current_room()
        .and_then(|room| room.connection(direction));
    let Some(destination) = destination else {
        session.sink.report::<(), _>(Err(GameplayError::NoExit));
        return Ok(());
    };

    debug!(
        target: "runtime::commands",
        from = %session.player_room,
        to = %destination,
        %direction,
        "Player moved"
    );
    session.enter_room(destination);
    session.look();
    Ok(())
}
