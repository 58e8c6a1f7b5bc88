//! Command-line interface definitions and parsing
//!
//! ```bash
//! # Use whatever is on the clipboard (e.g. "src/app.go:42")
//! opengithub
//!
//! # Explicit reference, searched from a root directory
//! opengithub pkg/server/main.go:17 --root ~/src
//!
//! # Link a fixed branch and only print the URL
//! opengithub -f README.md -b main --no-open -q
//! ```
//!
//! Root, branch and auto-open also come from `OPENGITHUB_ROOT`,
//! `OPENGITHUB_BRANCH` and `OPENGITHUB_OPEN`; flags win.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::Overrides;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "opengithub")]
#[command(about = "Open a file (with optional line number) on GitHub", long_about = None)]
#[command(version)]
pub struct Cli {
    /// File with optional line number, e.g. `src/app.go:42` (defaults to the clipboard)
    #[arg(value_name = "FILE", conflicts_with = "file_flag")]
    pub file: Option<String>,

    /// File with optional line number (same as the positional argument)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file_flag: Option<String>,

    /// Root directory to search for relative paths
    #[arg(short = 'r', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Git branch to link to (defaults to the current branch)
    #[arg(short = 'b', long = "branch", value_name = "NAME")]
    pub branch: Option<String>,

    /// Open the URL in the default browser (default)
    #[arg(long = "open", overrides_with = "no_open")]
    pub open: bool,

    /// Only print the URL, do not open it
    #[arg(long = "no-open", overrides_with = "open")]
    pub no_open: bool,

    /// Suppress informational output (only print the URL)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Increase diagnostic logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The file reference from either the positional argument or `--file`
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        self.file
            .as_deref()
            .or(self.file_flag.as_deref())
            .filter(|s| !s.is_empty())
    }

    /// Explicit settings given on the command line
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        let open = if self.no_open {
            Some(false)
        } else if self.open {
            Some(true)
        } else {
            None
        };

        Overrides {
            root: self.root.clone(),
            branch: self.branch.clone(),
            open,
            quiet: self.quiet,
        }
    }
}
