//! Line-oriented command dispatch.
//!
//! The dispatcher owns the command table and the hook registry. One input
//! line is one command cycle: parse, resolve the name or alias, run the
//! pre-hooks, the handler and the post-hooks, then flush the context's
//! message sink to the output.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::debug;

use crate::api::{CommandContext, Result};
use crate::hooks::{CommandHook, HookPhase, HookRegistry};

/// Written directly (not through the sink) when a command is not recognised.
pub const UNKNOWN_COMMAND: &str = "Unknown command. Type 'help'.";

/// Words that end the loop before any lookup happens.
pub const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

pub const DEFAULT_PROMPT: &str = "> ";

/// A command handler. Gameplay failures are reported to the sink by the
/// handler itself; an `Err` here ends the loop.
pub type Handler<C> = Box<dyn Fn(&mut C, &[&str]) -> Result<()>>;

enum CommandAction<C> {
    /// Lists the registered commands.
    Help,
    /// Stops the loop without running hooks.
    Quit,
    Run(Handler<C>),
}

struct CommandEntry<C> {
    name: String,
    aliases: Vec<String>,
    description: String,
    action: CommandAction<C>,
}

impl<C> CommandEntry<C> {
    fn help_line(&self) -> String {
        let mut line = format!("  {}", self.name);
        if !self.aliases.is_empty() {
            line.push_str(&format!(" ({})", self.aliases.join(", ")));
        }
        if !self.description.is_empty() {
            line.push_str(&format!(" - {}", self.description));
        }
        line
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Blank line; nothing ran.
    Empty,
    Quit,
    /// No command matched; hooks did not run.
    Unknown,
    Handled,
}

pub struct CommandDispatcher<C> {
    entries: Vec<CommandEntry<C>>,
    lookup: HashMap<String, usize>,
    hooks: HookRegistry<C>,
    prompt: String,
}

impl<C: CommandContext> CommandDispatcher<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            lookup: HashMap::new(),
            hooks: HookRegistry::new(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Registers `name` and its aliases. Re-registering a name replaces the
    /// earlier entry in place.
    pub fn register<F>(
        &mut self,
        name: &str,
        aliases: &[&str],
        description: &str,
        handler: F,
    ) -> &mut Self
    where
        F: Fn(&mut C, &[&str]) -> Result<()> + 'static,
    {
        self.insert(name, aliases, description, CommandAction::Run(Box::new(handler)))
    }

    /// Registers the built-in command that lists every entry.
    pub fn register_help(&mut self, name: &str, aliases: &[&str], description: &str) -> &mut Self {
        self.insert(name, aliases, description, CommandAction::Help)
    }

    /// Registers a command that stops the loop. [`QUIT_WORDS`] stop it even
    /// without registration; registering them lists them in the help.
    pub fn register_quit(&mut self, name: &str, aliases: &[&str], description: &str) -> &mut Self {
        self.insert(name, aliases, description, CommandAction::Quit)
    }

    pub fn add_pre_hook(&mut self, hook: Arc<dyn CommandHook<C>>) -> &mut Self {
        self.hooks.register(HookPhase::Pre, hook);
        self
    }

    pub fn add_post_hook(&mut self, hook: Arc<dyn CommandHook<C>>) -> &mut Self {
        self.hooks.register(HookPhase::Post, hook);
        self
    }

    pub fn hooks(&self) -> &HookRegistry<C> {
        &self.hooks
    }

    /// Canonical name for a command name or alias.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.lookup
            .get(&key.to_lowercase())
            .map(|&index| self.entries[index].name.as_str())
    }

    /// `Commands:` followed by one line per canonical command, in
    /// registration order.
    pub fn help_lines(&self) -> Vec<String> {
        std::iter::once("Commands:".to_string())
            .chain(self.entries.iter().map(CommandEntry::help_line))
            .collect()
    }

    /// Runs one command cycle for `line`.
    pub fn process_line(&self, ctx: &mut C, line: &str, out: &mut impl Write) -> Result<DispatchOutcome> {
        let mut parts = line.split_whitespace();
        let Some(first) = parts.next() else {
            return Ok(DispatchOutcome::Empty);
        };
        let key = first.to_lowercase();
        let args: Vec<&str> = parts.collect();

        if QUIT_WORDS.contains(&key.as_str()) {
            return Ok(DispatchOutcome::Quit);
        }

        let Some(&index) = self.lookup.get(&key) else {
            debug!(target: "runtime::dispatcher", command = %key, "Unknown command");
            writeln!(out, "{UNKNOWN_COMMAND}")?;
            out.flush()?;
            return Ok(DispatchOutcome::Unknown);
        };
        let entry = &self.entries[index];
        if matches!(entry.action, CommandAction::Quit) {
            return Ok(DispatchOutcome::Quit);
        }

        debug!(
            target: "runtime::dispatcher",
            command = %entry.name,
            args = ?args,
            "Dispatching command"
        );

        self.hooks.execute(HookPhase::Pre, ctx, &args)?;
        match &entry.action {
            CommandAction::Help => {
                let lines = self.help_lines();
                ctx.messages().extend(lines);
            }
            CommandAction::Run(handler) => handler(ctx, &args)?,
            CommandAction::Quit => {}
        }
        self.hooks.execute(HookPhase::Post, ctx, &args)?;

        ctx.messages().flush_to(out)?;
        Ok(DispatchOutcome::Handled)
    }

    /// Prompts, reads and dispatches lines until a quit word, a quit
    /// request from the context, or end of input.
    pub fn run(&self, ctx: &mut C, mut input: impl BufRead, out: &mut impl Write) -> Result<()> {
        let mut line = String::new();
        while !ctx.quit_requested() {
            write!(out, "{}", self.prompt)?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!(target: "runtime::dispatcher", "Input closed");
                break;
            }
            if self.process_line(ctx, &line, out)? == DispatchOutcome::Quit {
                break;
            }
        }
        Ok(())
    }

    fn insert(
        &mut self,
        name: &str,
        aliases: &[&str],
        description: &str,
        action: CommandAction<C>,
    ) -> &mut Self {
        let name = name.to_lowercase();
        let entry = CommandEntry {
            name: name.clone(),
            aliases: aliases.iter().map(|alias| alias.to_lowercase()).collect(),
            description: description.to_string(),
            action,
        };

        let index = match self.entries.iter().position(|existing| existing.name == name) {
            Some(index) => {
                self.entries[index] = entry;
                index
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };

        self.lookup.insert(name, index);
        for alias in &self.entries[index].aliases {
            self.lookup.insert(alias.clone(), index);
        }
        self
    }
}

impl<C: CommandContext> Default for CommandDispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}
