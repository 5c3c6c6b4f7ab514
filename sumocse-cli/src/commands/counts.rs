//! Reporting-volume count commands.

use clap::{Args, Subcommand};
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct RangeArgs {
    /// Range start, ISO-8601 (e.g. 2024-03-01T00:00:00)
    #[arg(long)]
    start: String,
    /// Range end, ISO-8601
    #[arg(long)]
    end: String,
    /// IANA timezone name
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

#[derive(Subcommand)]
pub enum CountsCommand {
    /// Insight counts over a time range
    Insights(RangeArgs),
    /// Signal counts over a time range
    Signals(RangeArgs),
    /// Record counts over a time range
    Records(RangeArgs),
}

pub async fn run(
    client: &CseClient,
    command: CountsCommand,
    format: OutputFormat,
) -> CseResult<()> {
    let counts = match command {
        CountsCommand::Insights(range) => {
            client
                .get_insight_counts(&range.start, &range.end, &range.timezone)
                .await?
        }
        CountsCommand::Signals(range) => {
            client
                .get_signal_counts(&range.start, &range.end, &range.timezone)
                .await?
        }
        CountsCommand::Records(range) => {
            client
                .get_record_counts(&range.start, &range.end, &range.timezone)
                .await?
        }
    };
    output::render_record(&counts, format);
    Ok(())
}
