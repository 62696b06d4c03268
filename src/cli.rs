use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reconf")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Inspect configuration diffs and resolve resource names", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what changed between two config files
    Diff(DiffArgs),

    /// Resolve a resource name against a config
    Resolve(ResolveArgs),

    /// Load and validate a config file
    Check {
        /// Config file (JSON or TOML)
        config: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Diff
// ============================================================================

#[derive(Parser)]
pub struct DiffArgs {
    /// Old config file
    pub left: PathBuf,

    /// New config file
    pub right: PathBuf,

    /// Also print the text diff, secrets masked
    #[arg(short, long)]
    pub pretty: bool,

    /// Print the summary as JSON
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
}

// ============================================================================
// Resolve
// ============================================================================

#[derive(Parser)]
pub struct ResolveArgs {
    /// Config file whose components and services are indexed
    pub config: PathBuf,

    /// Full name (`rdk:component:camera/gw:cam1`), short name (`gw:cam1`)
    /// or base name (`cam1`)
    pub query: String,

    /// Import a remote's config as NAME=PATH (repeatable)
    #[arg(short, long = "remote", value_name = "NAME=PATH", value_parser = parse_remote)]
    pub remotes: Vec<(String, PathBuf)>,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_remote(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_remote() {
        assert_eq!(
            parse_remote("gw=gw.json"),
            Ok(("gw".to_string(), PathBuf::from("gw.json")))
        );
        assert!(parse_remote("gw").is_err());
        assert!(parse_remote("=gw.json").is_err());
        assert!(parse_remote("gw=").is_err());
    }

    #[test]
    fn test_parse_resolve_with_remotes() {
        let cli = Cli::try_parse_from([
            "reconf", "resolve", "local.json", "cam1", "-r", "gw=gw.json", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Resolve(args) => {
                assert_eq!(args.query, "cam1");
                assert_eq!(args.remotes.len(), 1);
                assert_eq!(args.remotes[0].0, "gw");
            }
            _ => panic!("expected resolve"),
        }
    }
}
