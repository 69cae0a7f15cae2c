//! Runtime orchestration for the dungeon crawler.
//!
//! This crate turns the rules in `game-core` into a playable loop: a
//! [`Session`] holds the mutable state of one play-through, the
//! [`CommandDispatcher`] maps input lines to handlers, and hooks run the
//! enemy side of every cycle.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the error type and the command-context contract
//! - [`dispatcher`] parses lines and runs command cycles
//! - [`hooks`] provides the pre/post command hook system
//! - [`commands`] implements the default command set
//! - [`session`] owns world, player, tracker, randomness and output
pub mod api;
pub mod commands;
pub mod dispatcher;
pub mod hooks;
pub mod runtime;
pub mod session;

pub use api::{CommandContext, Result, RuntimeError};
pub use dispatcher::{CommandDispatcher, DispatchOutcome, Handler, UNKNOWN_COMMAND};
pub use hooks::{
    ActivationHook, CommandHook, EnemyTurnHook, HookCriticality, HookPhase, HookRegistry,
    PursuitHook,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::Session;
