//! Common error infrastructure for game-core.
//!
//! Gameplay errors ([`GameplayError`]) are always recoverable: the handler
//! that detects one reports it through the message sink and the command cycle
//! completes normally. Construction faults ([`WorldError`]) abort world
//! generation and are the only errors allowed to escape a command cycle.
//!
//! The `Display` text of a gameplay error is the exact line shown to the player.

use crate::state::Direction;

/// Category of an error, used for reporting and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A required argument is missing.
    Usage,

    /// A named item, enemy, spell, or direction is absent.
    NotFound,

    /// Not enough of a resource (mana) to perform the action.
    InsufficientResource,

    /// The operation is not allowed in the current state
    /// (looting the living, overwriting an exit).
    IllegalTransition,

    /// World construction failed; not recoverable.
    Construction,
}

impl ErrorKind {
    /// Returns a short identifier for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::NotFound => "not_found",
            Self::InsufficientResource => "insufficient_resource",
            Self::IllegalTransition => "illegal_transition",
            Self::Construction => "construction",
        }
    }

    /// Returns true if the enclosing command cycle can continue.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Construction)
    }
}

/// Common trait for all game-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// Recoverable errors raised by entity operations and the action resolver.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameplayError {
    #[error("Usage: {usage}")]
    Usage { usage: &'static str },

    #[error("{owner} does not have \"{item}\".")]
    ItemNotCarried { owner: String, item: String },

    #[error("There is no \"{item}\" here.")]
    ItemNotHere { item: String },

    #[error("No \"{name}\" here.")]
    EnemyNotHere { name: String },

    #[error("{name} is not in the room.")]
    NotInRoom { name: String },

    #[error("You do not know \"{spell}\".")]
    UnknownSpell { spell: String },

    #[error("No valid target.")]
    NoTarget,

    #[error("Nothing to search.")]
    NothingToSearch,

    #[error("You cannot go that way.")]
    NoExit,

    #[error("\"{label}\" is not a direction.")]
    NotADirection { label: String },

    #[error("{caster} does not have enough mana to cast {spell}!")]
    InsufficientMana { caster: String, spell: String },

    #[error("{item} cannot be consumed.")]
    NotConsumable { item: String },

    #[error("You cannot take from {name} while it still lives.")]
    SourceAlive { name: String },

    #[error("{name} is still alive and cannot be searched.")]
    SearchLiving { name: String },

    #[error("A passage {direction} already exists.")]
    ExitOccupied { direction: Direction },
}

impl GameError for GameplayError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage { .. } => ErrorKind::Usage,
            Self::ItemNotCarried { .. }
            | Self::ItemNotHere { .. }
            | Self::EnemyNotHere { .. }
            | Self::NotInRoom { .. }
            | Self::UnknownSpell { .. }
            | Self::NoTarget
            | Self::NothingToSearch
            | Self::NoExit
            | Self::NotADirection { .. } => ErrorKind::NotFound,
            Self::InsufficientMana { .. } => ErrorKind::InsufficientResource,
            Self::NotConsumable { .. }
            | Self::SourceAlive { .. }
            | Self::SearchLiving { .. }
            | Self::ExitOccupied { .. } => ErrorKind::IllegalTransition,
        }
    }
}

/// Construction faults raised while building the room graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),

    #[error("cannot build a dungeon without room shells")]
    NoRooms,

    #[error("frontier exhausted with {unplaced} rooms left unplaced")]
    Stranded { unplaced: usize },

    #[error("room {0} does not exist")]
    MissingRoom(u32),
}

impl GameError for WorldError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Construction
    }
}
