pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A terminal reader for text-only news sites", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List articles from the configured sources
    List,
    /// Print one article to stdout (1-based row number from `list`)
    Read {
        /// Row number of the article to read
        row: usize,
    },
    /// Drop expired pages from the transport cache
    Purge,
}
