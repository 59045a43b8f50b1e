use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "treedrop", about = "Ingest dropped directories and ask about their files", version)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress human-readable output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Config file (default: ./treedrop.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Do not send the ingestion manifest to the backend
    #[arg(long, global = true)]
    pub no_notify: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest paths and print the reconstructed tree
    Tree {
        /// Files or directories to drop
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Ingest paths and list every file found
    List {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the drag payload for one file of the tree
    Drag {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Tree path of the file, as shown by `list`
        #[arg(long)]
        path: String,
    },

    /// Ingest paths, attach files and send a query to the backend
    Ask {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Question text; may be empty when files are attached
        #[arg(long, default_value = "")]
        query: String,

        /// Tree path of a file to attach (repeatable)
        #[arg(long)]
        attach: Vec<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
