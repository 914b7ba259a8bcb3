//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **browse**: Page through the remote photo listing (default page size 25)
//! - **favorites**: List favorited photos
//! - **favorite** / **unfavorite**: Toggle a photo's favorite mark by id
//! - **config**: Show the configuration file location or contents
//!
//! Global `--db` and `--base-url` override the configuration file for one run.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::photo::PhotoId;

/// Browse photos, keep favorites, search titles
#[derive(Parser, Debug)]
#[command(name = "photoease", version, about)]
pub struct Cli {
    /// Only print results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log progress to stderr (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Favorites database directory
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Base URL of the photo listing
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Page through the remote photo listing
    #[command(visible_alias = "b")]
    Browse {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Only show photos whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List favorited photos
    #[command(visible_alias = "favs")]
    Favorites {
        /// Only show photos whose title contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Mark a photo as favorite
    #[command(visible_alias = "fav")]
    Favorite {
        /// Photo id
        id: PhotoId,
    },

    /// Remove a photo from favorites
    #[command(visible_alias = "unfav")]
    Unfavorite {
        /// Photo id
        id: PhotoId,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
}

impl Cli {
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
