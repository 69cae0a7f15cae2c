//! High-level runtime orchestrator.
//!
//! The runtime owns the [`Session`] and the [`CommandDispatcher`] that
//! drives it, and exposes a builder-based API for clients to load content,
//! pick a random source and run the read-eval-print loop.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use game_content::{ContentFactory, builtin};
use game_core::{Catalog, GameConfig, PcgRng, RandomSource};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::commands::register_default_commands;
use crate::dispatcher::{CommandDispatcher, DEFAULT_PROMPT, DispatchOutcome};
use crate::hooks::{ActivationHook, CommandHook, EnemyTurnHook, PursuitHook};
use crate::session::Session;

pub const FAREWELL: &str = "Goodbye.";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Overrides the configuration that ships with the content.
    pub game_config: Option<GameConfig>,
    /// Content directory; the built-in content is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Seed of the session's random source; random when unset.
    pub seed: Option<u64>,
    pub prompt: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: None,
            data_dir: None,
            seed: None,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

/// A session wired to the default command table and hooks.
pub struct Runtime {
    session: Session,
    dispatcher: CommandDispatcher<Session>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn dispatcher(&self) -> &CommandDispatcher<Session> {
        &self.dispatcher
    }

    /// Queues the opening banner: welcome line, help, surroundings and status.
    pub fn welcome(&mut self) {
        let help = self.dispatcher.help_lines();
        self.session.welcome(help);
    }

    /// Runs one command cycle.
    pub fn process_line(&mut self, line: &str, out: &mut impl Write) -> Result<DispatchOutcome> {
        self.dispatcher.process_line(&mut self.session, line, out)
    }

    /// Shows the banner, then reads commands until quit or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.welcome();
        self.session.sink.flush_to(out)?;

        info!(target: "runtime", "Entering command loop");
        self.dispatcher.run(&mut self.session, input, out)?;

        writeln!(out, "{FAREWELL}")?;
        info!(target: "runtime", "Command loop finished");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    catalog: Option<Catalog>,
    rng: Option<Box<dyn RandomSource>>,
    session: Option<Session>,
    pre_hooks: Vec<Arc<dyn CommandHook<Session>>>,
    post_hooks: Vec<Arc<dyn CommandHook<Session>>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: None,
            rng: None,
            session: None,
            pre_hooks: Vec::new(),
            post_hooks: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this catalog instead of loading one.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use this random source instead of a seeded [`PcgRng`].
    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Provide a ready-made session; content loading and generation are skipped.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Adds hooks on top of the default activation, pursuit and enemy-turn hooks.
    pub fn add_hooks(
        mut self,
        pre: Vec<Arc<dyn CommandHook<Session>>>,
        post: Vec<Arc<dyn CommandHook<Session>>>,
    ) -> Self {
        self.pre_hooks.extend(pre);
        self.post_hooks.extend(post);
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        let session = match self.session {
            Some(session) => session,
            None => {
                let (catalog, game_config) = match self.catalog {
                    Some(catalog) => {
                        catalog.validate()?;
                        let game_config = self.config.game_config.clone().unwrap_or_default();
                        (catalog, game_config)
                    }
                    None => load_content(&self.config)?,
                };
                let rng = match self.rng {
                    Some(rng) => rng,
                    None => {
                        let seed = self.config.seed.unwrap_or_else(rand::random);
                        info!(target: "runtime", seed, "Seeded random source");
                        Box::new(PcgRng::seeded(seed)) as Box<dyn RandomSource>
                    }
                };
                Session::new(game_config, Arc::new(catalog), rng)?
            }
        };

        let mut dispatcher = CommandDispatcher::new().with_prompt(self.config.prompt);
        register_default_commands(&mut dispatcher);
        dispatcher
            .add_pre_hook(Arc::new(ActivationHook))
            .add_post_hook(Arc::new(PursuitHook))
            .add_post_hook(Arc::new(EnemyTurnHook));
        for hook in self.pre_hooks {
            dispatcher.add_pre_hook(hook);
        }
        for hook in self.post_hooks {
            dispatcher.add_post_hook(hook);
        }

        debug!(
            target: "runtime",
            pre_hooks = dispatcher.hooks().len(crate::hooks::HookPhase::Pre),
            post_hooks = dispatcher.hooks().len(crate::hooks::HookPhase::Post),
            "Runtime built"
        );
        Ok(Runtime {
            session,
            dispatcher,
        })
    }
}

/// Loads the catalog and configuration from the data directory, or the
/// built-in content when none is configured.
fn load_content(config: &RuntimeConfig) -> Result<(Catalog, GameConfig)> {
    let (catalog, loaded) = match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            let catalog = factory.load_catalog().map_err(content_error)?;
            (catalog, factory.load_config().map_err(content_error)?)
        }
        None => (
            builtin::catalog().map_err(content_error)?,
            builtin::config().map_err(content_error)?,
        ),
    };
    let game_config = config.game_config.clone().unwrap_or(loaded);
    Ok((catalog, game_config))
}

fn content_error(error: impl fmt::Display) -> RuntimeError {
    RuntimeError::Content(format!("{error:#}"))
}
