//! sumocse: command-line tools for the Sumo Logic Cloud SIEM API.
//!
//! # Commands
//!
//! - `sumocse connection` - verify credentials and endpoint
//! - `sumocse insights query -q 'severity:"HIGH"' -l 50` - search insights
//! - `sumocse insights resolve <id> --resolution "False Positive" --status closed`
//! - `sumocse rules query|list|get` - detection rules
//! - `sumocse entities list|get|related` / `sumocse signals list|get`
//! - `sumocse list tag-schemas` / `sumocse get tag-schemas <id>` - any
//!   configuration collection
//! - `sumocse threat-intel sources|source|indicators`
//! - `sumocse match-lists list|get|items|item`
//! - `sumocse counts insights|signals|records --start … --end …`

use clap::{Parser, Subcommand};
use colored::Colorize;
use sumocse::{CseClient, CseConfig, CseError, CseResult};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    collections, connection, counts, entities, insights, match_lists, rules, signals, threat_intel,
};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "sumocse")]
#[command(version)]
#[command(about = "Command-line tools for the Sumo Logic Cloud SIEM API")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Sumo Logic access ID
    #[arg(long, env = "SUMO_ACCESS_ID", global = true, hide_env_values = true)]
    access_id: Option<String>,

    /// Sumo Logic access key
    #[arg(long, env = "SUMO_ACCESS_KEY", global = true, hide_env_values = true)]
    access_key: Option<String>,

    /// Deployment: a region code (us2, fra, …), `prod`, or a full URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    output: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify credentials and endpoint connectivity
    Connection,

    /// Work with insights
    Insights {
        #[command(subcommand)]
        command: insights::InsightsCommand,
    },

    /// Work with detection rules
    Rules {
        #[command(subcommand)]
        command: rules::RulesCommand,
    },

    /// Query entities
    Entities {
        #[command(subcommand)]
        command: entities::EntitiesCommand,
    },

    /// Query signals
    Signals {
        #[command(subcommand)]
        command: signals::SignalsCommand,
    },

    /// List one page of a configuration collection
    List {
        /// Which collection
        #[arg(value_enum)]
        resource: collections::Collection,
        /// Window size
        #[arg(short, long, default_value_t = CseClient::CONFIG_PAGE_LIMIT)]
        limit: usize,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
    },

    /// Fetch a single object from a configuration collection by ID
    Get {
        /// Which collection
        #[arg(value_enum)]
        resource: collections::Collection,
        /// Object ID
        id: String,
    },

    /// Threat intelligence sources and indicators
    ThreatIntel {
        #[command(subcommand)]
        command: threat_intel::ThreatIntelCommand,
    },

    /// Match lists and their items
    MatchLists {
        #[command(subcommand)]
        command: match_lists::MatchListsCommand,
    },

    /// Reporting volumes over a time range
    Counts {
        #[command(subcommand)]
        command: counts::CountsCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        report(&err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> CseResult<()> {
    let client = build_client(&cli)?;
    let format = cli.output;

    match cli.command {
        Commands::Connection => connection::run(&client).await,
        Commands::Insights { command } => insights::run(&client, command, format).await,
        Commands::Rules { command } => rules::run(&client, command, format).await,
        Commands::Entities { command } => entities::run(&client, command, format).await,
        Commands::Signals { command } => signals::run(&client, command, format).await,
        Commands::List {
            resource,
            limit,
            token,
        } => collections::list(&client, resource, limit, token.as_deref(), format).await,
        Commands::Get { resource, id } => collections::get(&client, resource, &id, format).await,
        Commands::ThreatIntel { command } => threat_intel::run(&client, command, format).await,
        Commands::MatchLists { command } => match_lists::run(&client, command, format).await,
        Commands::Counts { command } => counts::run(&client, command, format).await,
    }
}

fn build_client(cli: &Cli) -> CseResult<CseClient> {
    let mut builder = CseConfig::builder();
    if let Some(id) = &cli.access_id {
        builder = builder.access_id(id);
    }
    if let Some(key) = &cli.access_key {
        builder = builder.access_key(key);
    }
    if let Some(endpoint) = &cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    CseClient::new(builder.build()?)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "sumocse=debug,sumocse_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report(err: &CseError) {
    let category = match err {
        CseError::Authentication(_) => "auth",
        CseError::Configuration(_) => "config",
        CseError::Api { .. } => "api",
        CseError::Data(_) => "data",
    };
    eprintln!("{} {err}", format!("error[{category}]").red().bold());
    if err.is_authentication() {
        eprintln!(
            "{}",
            "hint: set SUMO_ACCESS_ID and SUMO_ACCESS_KEY, or pass --access-id/--access-key"
                .dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insights_query() {
        let cli = Cli::try_parse_from([
            "sumocse",
            "insights",
            "query",
            "--query",
            "severity:\"HIGH\"",
            "--limit",
            "25",
            "--output",
            "json",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Insights {
                command: insights::InsightsCommand::Query { .. }
            }
        ));
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_parse_collection_list() {
        let cli = Cli::try_parse_from(["sumocse", "list", "tag-schemas", "--limit", "50"]).unwrap();
        let Commands::List {
            resource, limit, ..
        } = cli.command
        else {
            panic!("expected list command");
        };
        assert_eq!(resource, collections::Collection::TagSchemas);
        assert_eq!(limit, 50);
    }
}
