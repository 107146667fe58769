//! Command-line argument parsing for the bindings inspector
//!
//! Supports:
//! - Loading section files, lowest priority first
//! - Resolving individual keys against the built configuration
//! - Showing shadowed/disabled candidates

use clap::Parser;
use std::path::PathBuf;

/// Inspect how layered input sections resolve into active key bindings
#[derive(Parser, Debug)]
#[command(name = "keystack", version, about = "Key-binding resolution inspector")]
pub struct CliArgs {
    /// Section files to load, lowest priority first
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Resolve these keys after building (raw spelling is fine)
    #[arg(short, long, value_name = "KEY")]
    pub query: Vec<String>,

    /// Show disabled and shadowed candidates too
    #[arg(short, long)]
    pub all: bool,

    /// Enable the last loaded section exclusively
    #[arg(short = 'x', long)]
    pub exclusive_last: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_files_and_queries() {
        let args =
            CliArgs::try_parse_from(["keystack", "a.yaml", "b.yaml", "-q", "ctrl+s"]).unwrap();
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.query, vec!["ctrl+s"]);
        assert!(!args.all);
    }

    #[test]
    fn test_requires_at_least_one_file() {
        assert!(CliArgs::try_parse_from(["keystack"]).is_err());
    }

    #[test]
    fn test_flags() {
        let args = CliArgs::try_parse_from(["keystack", "a.yaml", "--all", "-x"]).unwrap();
        assert!(args.all);
        assert!(args.exclusive_last);
    }
}
