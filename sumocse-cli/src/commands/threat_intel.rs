//! Threat intelligence commands.

use clap::Subcommand;
use colored::Colorize;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum ThreatIntelCommand {
    /// List threat intelligence sources
    Sources {
        /// Window size
        #[arg(short, long, default_value_t = CseClient::CONFIG_PAGE_LIMIT)]
        limit: usize,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
    },
    /// Fetch a single threat intelligence source by ID
    Source {
        /// Source ID
        id: String,
    },
    /// List indicators of a threat intelligence source
    Indicators {
        /// Source ID
        source_id: String,
        /// Window size
        #[arg(short, long, default_value_t = CseClient::CONFIG_PAGE_LIMIT)]
        limit: usize,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
    },
}

pub async fn run(
    client: &CseClient,
    command: ThreatIntelCommand,
    format: OutputFormat,
) -> CseResult<()> {
    match command {
        ThreatIntelCommand::Sources { limit, token } => {
            let page = client
                .get_threat_intel_sources(limit, token.as_deref())
                .await?;
            output::render_records(&page.records, format);
            if let Some(next) = page.next_page_token {
                println!("{} {next}", "next page token:".dimmed());
            }
        }
        ThreatIntelCommand::Source { id } => {
            let source = client.get_threat_intel_source(&id).await?;
            output::render_record(&source, format);
        }
        ThreatIntelCommand::Indicators {
            source_id,
            limit,
            token,
        } => {
            let page = client
                .get_threat_intel_indicators(&source_id, limit, token.as_deref())
                .await?;
            output::render_records(&page.records, format);
            if let Some(next) = page.next_page_token {
                println!("{} {next}", "next page token:".dimmed());
            }
        }
    }
    Ok(())
}
