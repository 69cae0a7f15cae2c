//! Contract between the dispatcher and the state it drives.

use game_core::MessageSink;

/// State a [`CommandDispatcher`](crate::CommandDispatcher) can run commands against.
pub trait CommandContext {
    /// Sink flushed by the dispatcher after every handled command.
    fn messages(&mut self) -> &mut MessageSink;

    /// Set once a handler asked the loop to stop.
    fn quit_requested(&self) -> bool {
        false
    }
}
