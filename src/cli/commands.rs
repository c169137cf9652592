use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nebula", about = concat!("NebulaNav v", env!("CARGO_PKG_VERSION"), " - a new-tab dashboard for your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the link and category documents
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/nebula/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List links, optionally filtered
    List(ListArgs),
    /// List categories with link counts
    Categories,
    /// Add a link
    Add(AddArgs),
    /// Remove a link
    Delete(DeleteArgs),
    /// Open a link after the countdown
    Open(OpenArgs),
    /// Import recommended links from the remote endpoint
    Sync,
}

#[derive(Args)]
pub struct ListArgs {
    /// Category id (`all` for every category)
    #[arg(long)]
    pub category: Option<String>,
    /// Case-insensitive text to find in titles and descriptions
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Site name
    pub title: String,
    /// Site url, stored as given unless --https
    pub url: String,
    /// Category id; unknown ids create a new category
    #[arg(long, default_value = "other")]
    pub category: String,
    /// Description shown on the card
    #[arg(long)]
    pub description: Option<String>,
    /// Icon glyph shown on the card
    #[arg(long)]
    pub icon: Option<String>,
    /// Prefix https:// when the url has no http(s) scheme
    #[arg(long)]
    pub https: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Link id to remove
    pub id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Link id to open
    pub id: String,
    /// Skip the final prompt (the countdown still runs)
    #[arg(long)]
    pub yes: bool,
}
