use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "callboard", version, about = "Voice agent analytics dashboard")]
pub struct Cli {
    /// Settings file (defaults to ./callboard.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Keep preferences in memory instead of the remote store
    #[arg(long, global = true)]
    pub memory: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the call volume series
    Show,
    /// Print the stored value for the editable slot
    Lookup {
        #[arg(long)]
        email: String,
    },
    /// Save a new value for the editable slot
    Edit {
        #[arg(long)]
        email: String,
        #[arg(long)]
        value: String,
        /// Replace a value that is already stored
        #[arg(long)]
        overwrite: bool,
    },
    /// Print the resolved settings, or write them to a file
    Config {
        #[arg(long)]
        write: Option<PathBuf>,
    },
}
