use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "carstool")]
#[command(about = "Look up vehicles and their maintenance profiles")]
pub struct CliConfig {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List vehicles, optionally filtered by make, model or year
    List {
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Show the full profile of one vehicle
    Show { id: String },
    /// Check that the backend is reachable
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_with_query() {
        let cli = CliConfig::try_parse_from(["carstool", "list", "--query", "honda"]).unwrap();
        assert!(matches!(cli.command, Command::List { ref query } if query == "honda"));
        assert!(cli.api_base.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "carstool",
            "show",
            "42",
            "--api-base",
            "http://example.com",
            "--verbose",
        ])
        .unwrap();

        assert!(matches!(cli.command, Command::Show { ref id } if id == "42"));
        assert_eq!(cli.api_base.as_deref(), Some("http://example.com"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_list_query_defaults_to_empty() {
        let cli = CliConfig::try_parse_from(["carstool", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List { ref query } if query.is_empty()));
    }
}
