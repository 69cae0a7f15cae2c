//! Public runtime API surface.
//!
//! Errors and the command-context contract shared by the dispatcher and the
//! hooks live here so the orchestration modules stay focused on flow.

pub mod context;
pub mod errors;

pub use context::CommandContext;
pub use errors::{Result, RuntimeError};
