// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (serve or init-config)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,

        /// SQLite database file, overrides the config file
        #[arg(short, long, value_name = "PATH")]
        database: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}
