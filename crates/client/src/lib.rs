//! Terminal client for the dungeon crawler.
//!
//! The binary is a thin composition root: it reads configuration from the
//! environment, installs file logging (stdout belongs to the game), builds a
//! [`runtime::Runtime`] and hands it the process's standard streams.
pub mod config;
pub mod logging;

pub use config::ClientConfig;
