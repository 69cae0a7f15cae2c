//! The default command set.
//!
//! Every handler takes the session and the whitespace-split arguments.
//! Gameplay mistakes are reported to the sink; only session-ending faults
//! are returned as errors. Handlers whose command gives enemies a turn call
//! [`Session::spend_turn`](crate::Session::spend_turn).

mod combat;
mod info;
mod inventory;
mod movement;
mod system;

pub use combat::{attack, cast};
pub use info::{directions, look, map, status};
pub use inventory::{consume, drop, equip, search, take};
pub use movement::{go, travel};
pub use system::{rename, reset, rest};

use game_core::Direction;

use crate::dispatcher::CommandDispatcher;
use crate::session::Session;

/// Registers the full command table in help order.
pub fn register_default_commands(dispatcher: &mut CommandDispatcher<Session>) {
    dispatcher
        .register_help("help", &["?"], "Show this menu")
        .register_quit("quit", &["exit"], "Exit game")
        .register("look", &["l"], "Look around", look)
        .register("attack", &["a", "hit"], "Attack target", attack)
        .register("cast", &["c"], "Cast spell: cast <name> [target]", cast)
        .register("take", &[], "Pick up item", take)
        .register("equip", &[], "Equip an item", equip)
        .register("consume", &["use"], "Use a potion/item", consume)
        .register("search", &[], "Loot a dead enemy", search)
        .register("directions", &["dir"], "Show exits", directions)
        .register("map", &[], "Print current position on map", map)
        .register("me", &["stat"], "Show status", status)
        .register("drop", &["d"], "Drop an item", drop)
        .register("rest", &[], "Rest to recover some health and mana", rest)
        .register("go", &[], "Move: go <direction>", go)
        .register("north", &["n"], "Go North", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::North)
        })
        .register("south", &["s"], "Go South", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::South)
        })
        .register("east", &["e"], "Go East", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::East)
        })
        .register("west", &["w"], "Go West", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::West)
        })
        .register("up", &[], "Climb up", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::Up)
        })
        .register("down", &[], "Climb down", |s: &mut Session, _: &[&str]| {
            travel(s, Direction::Down)
        })
        .register("reset", &[], "Reset game", reset)
        .register("rename", &[], "Rename yourself: rename <new name>", rename);
}

/// Joins the arguments back into one trimmed name.
fn joined(args: &[&str]) -> String {
    args.join(" ").trim().to_string()
}
