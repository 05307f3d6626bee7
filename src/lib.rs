// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod server;
pub mod util;

use anyhow::{bail, Result};
use infrastructure::Config;
use tracing::{debug, info};
use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting flashcards with arguments");

    match args.command {
        Command::Serve { bind, database } => {
            let mut config = Config::resolve(args.config.as_deref())?;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(database) = database {
                config.database.path = database;
            }
            debug!(?config, "Resolved configuration");

            server::serve(config).await
        }
        Command::InitConfig { path } => {
            if path.exists() {
                bail!("Refusing to overwrite existing file: {}", path.display());
            }
            Config::create_default(&path)?;
            info!(?path, "Wrote default configuration");
            Ok(())
        }
    }
}
