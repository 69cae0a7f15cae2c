//! Read-only commands. None of them gives enemies a turn.

use crate::api::Result;
use crate::session::Session;

pub fn look(session: &mut Session, _args: &[&str]) -> Result<()> {
    session.look();
    Ok(())
}

pub fn directions(session: &mut Session, _args: &[&str]) -> Result<()> {
    if let Some(line) = session.current_room().map(|room| room.direction_line()) {
        session.sink.push(line);
    }
    Ok(())
}

pub fn map(session: &mut Session, _args: &[&str]) -> Result<()> {
    let lines = session.world.render_map(session.player_room);
    session.sink.extend(lines);
    Ok(())
}

pub fn status(session: &mut Session, _args: &[&str]) -> Result<()> {
    let lines = session.player.status_lines();
    session.sink.extend(lines);
    Ok(())
}
