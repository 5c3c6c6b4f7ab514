//! Insight commands: aggregated queries, windows, detail and triage.

use clap::Subcommand;
use colored::Colorize;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum InsightsCommand {
    /// Search insights, aggregating offset windows up to the limit
    Query {
        /// Search filter, e.g. 'status:"new" severity:"HIGH"'
        #[arg(short, long)]
        query: Option<String>,
        /// Maximum number of insights to fetch
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Fetch a single offset/limit window of insights
    List {
        /// Search filter
        #[arg(short, long)]
        query: Option<String>,
        /// Window start
        #[arg(long, default_value_t = 0)]
        offset: usize,
        /// Window size
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
    /// Aggregate insights by following continuation tokens
    All {
        /// Search filter
        #[arg(short, long)]
        query: Option<String>,
        /// Page budget for the token walk
        #[arg(long, default_value_t = CseClient::DEFAULT_MAX_PAGES)]
        max_pages: usize,
    },
    /// Fetch a single insight by ID
    Get {
        /// Insight ID
        id: String,
    },
    /// Set the resolution and status of an insight
    Resolve {
        /// Insight ID
        id: String,
        /// Resolution, e.g. "False Positive"
        #[arg(long)]
        resolution: String,
        /// Status, e.g. "closed"
        #[arg(long)]
        status: String,
    },
    /// Add a comment to an insight
    Comment {
        /// Insight ID
        id: String,
        /// Comment text
        #[arg(short, long)]
        message: String,
    },
}

pub async fn run(
    client: &CseClient,
    command: InsightsCommand,
    format: OutputFormat,
) -> CseResult<()> {
    match command {
        InsightsCommand::Query { query, limit } => {
            let insights = client.query_insights(query.as_deref(), limit).await?;
            output::render_records(&insights, format);
        }
        InsightsCommand::List {
            query,
            offset,
            limit,
        } => {
            let page = client
                .get_insights_list(query.as_deref(), offset, limit)
                .await?;
            output::render_records(&page.records, format);
            if let Some(total) = page.total {
                println!("{} {total} total, has next page: {}", "window:".dimmed(), page.has_next_page);
            }
        }
        InsightsCommand::All { query, max_pages } => {
            let insights = client.get_insights(query.as_deref(), max_pages).await?;
            output::render_records(&insights, format);
        }
        InsightsCommand::Get { id } => {
            let insight = client.get_insight(&id).await?;
            output::render_record(&insight, format);
        }
        InsightsCommand::Resolve {
            id,
            resolution,
            status,
        } => {
            let updated = client
                .update_insight_resolution_status(&id, &resolution, &status)
                .await?;
            println!("{} {id}", "updated".green().bold());
            output::render_record(&updated, format);
        }
        InsightsCommand::Comment { id, message } => {
            let comment = client.add_insight_comment(&id, &message).await?;
            println!("{} comment on {id}", "added".green().bold());
            output::render_record(&comment, format);
        }
    }
    Ok(())
}
