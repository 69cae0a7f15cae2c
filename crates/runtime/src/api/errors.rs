//! Unified error types surfaced by the runtime API.
//!
//! Gameplay mistakes never reach this layer; they are reported to the player
//! through the message sink. What remains are faults that end a session:
//! broken content, failed world construction, and terminal I/O.
use std::io;

use game_core::{CatalogError, WorldError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to load content: {0}")]
    Content(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("world construction failed")]
    World(#[from] WorldError),

    #[error("no weapon templates available for the starting kit")]
    NoStartingWeapon,

    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    #[error("hook `{hook}` failed: {reason}")]
    Hook { hook: &'static str, reason: String },
}
