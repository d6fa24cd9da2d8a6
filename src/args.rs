use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unsolved-problems")]
#[command(about = "Collects unsolved math problems from a saved Wikipedia list page")]
#[command(version)]
pub struct Args {
    /// JSON configuration file (built-in defaults are used when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List links to individual problem articles
    Links,
    /// Download every linked problem article with a headless browser
    Fetch,
    /// Extract categorized problem statements into JSON
    Extract,
    /// Print leading dataset rows and save their images
    Samples,
}
