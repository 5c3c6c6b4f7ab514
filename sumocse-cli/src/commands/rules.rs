//! Detection rule commands.

use clap::Subcommand;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum RulesCommand {
    /// Search rules, aggregating offset windows up to the limit
    Query {
        /// Search filter, e.g. 'ruleType:"templated"'
        #[arg(short, long)]
        query: Option<String>,
        /// Maximum number of rules to fetch
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Fetch a single offset/limit window of rules
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
    /// Fetch a single rule by ID
    Get {
        /// Rule ID
        id: String,
    },
}

pub async fn run(client: &CseClient, command: RulesCommand, format: OutputFormat) -> CseResult<()> {
    match command {
        RulesCommand::Query { query, limit } => {
            let rules = client.query_rules(query.as_deref(), limit).await?;
            output::render_records(&rules, format);
        }
        RulesCommand::List {
            query,
            offset,
            limit,
        } => {
            let page = client.get_rules(query.as_deref(), offset, limit).await?;
            output::render_records(&page.records, format);
        }
        RulesCommand::Get { id } => {
            let rule = client.get_rule(&id).await?;
            output::render_record(&rule, format);
        }
    }
    Ok(())
}
