//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use seqfm_core::{SeqMode, SortKey};

/// List directories with numbered image files grouped into sequences.
#[derive(Debug, Parser)]
#[command(name = "seqfm", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/seqfm/config.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List a directory (the default command).
    #[command(alias = "ls")]
    List(ListArgs),
    /// Print every frame, or every file name, a range describes.
    Expand {
        /// A range such as `1-10,12` or a name such as `render.0001-0010.exr`.
        text: String,
    },
    /// Print the compact range string for a list of frames.
    Compact {
        /// Frame numbers in order.
        #[arg(required = true)]
        frames: Vec<i64>,
        /// Zero-pad width.
        #[arg(long, default_value_t = 0)]
        pad: usize,
    },
    /// Show how a file name splits into path, base, number and extension.
    Split {
        name: String,
    },
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Directory to list (defaults to the current directory).
    pub dir: Option<PathBuf>,

    /// Sequence grouping: off, sparse or range.
    #[arg(long, value_parser = parse_mode)]
    pub seq: Option<SeqMode>,

    /// Sort key: name, type, size, user, permissions or time.
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortKey>,

    /// Reverse the sort order.
    #[arg(short, long)]
    pub reverse: bool,

    /// Show hidden entries.
    #[arg(short, long)]
    pub all: bool,

    /// Keep directories in sort order instead of listing them first.
    #[arg(long)]
    pub no_dirs_first: bool,

    /// Only show names matching these glob patterns.
    #[arg(long = "glob")]
    pub globs: Vec<String>,

    /// Apply glob patterns to directories as well.
    #[arg(long)]
    pub glob_dirs: bool,
}

fn parse_mode(s: &str) -> Result<SeqMode, String> {
    s.parse()
}

fn parse_sort(s: &str) -> Result<SortKey, String> {
    s.parse()
}
