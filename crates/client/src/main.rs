//! Dungeon game client binary.
//!
//! ```bash
//! # Built-in content, random seed
//! cargo run -p dungeon-client
//!
//! # Custom content and a fixed seed
//! DUNGEON_DATA_DIR=./my-content DUNGEON_SEED=42 cargo run -p dungeon-client
//! ```

use std::io;

use anyhow::Result;
use dungeon_client::{ClientConfig, logging};
use runtime::Runtime;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config)?;

    tracing::info!("Starting Dungeon client");
    tracing::info!("Data dir: {:?}", config.data_dir);
    tracing::info!("Seed: {:?}", config.seed);

    let mut runtime = Runtime::builder().config(config.runtime_config()).build()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    runtime.run(stdin.lock(), &mut stdout.lock())?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
