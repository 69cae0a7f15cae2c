//! Command hook system for runtime orchestration.
//!
//! Hooks run around every recognised command: pre-hooks before the handler,
//! post-hooks after it. They carry the cross-cutting rules of a game cycle
//! (enemy activation, pursuit, enemy turns) so handlers only deal with the
//! command itself.
//!
//! # Execution Order
//!
//! Each phase is sorted by priority (lower values execute first). Hooks with
//! equal priority keep their registration order.

mod activation;
mod enemy_turn;
mod pursuit;
mod registry;

pub use activation::ActivationHook;
pub use enemy_turn::EnemyTurnHook;
pub use pursuit::PursuitHook;
pub use registry::{HookPhase, HookRegistry};

use crate::api::Result;

/// Defines the criticality level of a hook for error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure aborts the command loop.
    Critical,

    /// Hook failure is logged as an error and the cycle continues.
    Important,

    /// Hook failure is logged at debug level and ignored.
    Optional,
}

/// Behaviour attached to one phase of every command cycle.
pub trait CommandHook<C>: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values execute first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Cheap check run before [`CommandHook::run`].
    fn should_trigger(&self, _ctx: &C) -> bool {
        true
    }

    fn run(&self, ctx: &mut C, args: &[&str]) -> Result<()>;
}
