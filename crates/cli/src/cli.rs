use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "abb",
    version,
    about = "Search an audiobook catalog and hand its torrents to your client"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// TOML configuration file.
    #[arg(global = true, long, env = "ABB_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Print Prometheus metrics to stderr before exiting.
    #[arg(global = true, long)]
    pub metrics: bool,
    /// Keep the extraction cache in memory for this run only.
    #[arg(global = true, long)]
    pub ephemeral: bool,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search the catalog, crawling every result page.
    Search(SearchArgs),
    /// Show the full record of one item.
    Show(ShowArgs),
    /// Print the magnet link of one item.
    Magnet(ItemArgs),
    /// Open the magnet link of one item with the configured launcher.
    Launch(ItemArgs),
    /// List recent searches, newest first.
    Recent,
    /// Drop memoized results and the search history.
    ClearCache,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free text to search for.
    #[arg(required = true)]
    pub text: Vec<String>,
    /// Emit the records as JSON instead of one line each.
    #[arg(long)]
    pub json: bool,
}

impl SearchArgs {
    pub fn query(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Item identifier, as printed by `search`.
    pub id: String,
    /// Also print the description.
    #[arg(long)]
    pub description: bool,
}

#[derive(Debug, Args)]
pub struct ItemArgs {
    /// Item identifier, as printed by `search`.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_words_are_joined() {
        let cli = Cli::try_parse_from(["abb", "search", "dune", "messiah", "--json"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query(), "dune messiah");
                assert!(args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["abb", "show", "dune", "--config", "abb.toml", "--ephemeral"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("abb.toml")));
        assert!(cli.ephemeral);
        assert!(!cli.metrics);
    }
}
