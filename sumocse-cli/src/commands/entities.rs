//! Entity commands.

use clap::Subcommand;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum EntitiesCommand {
    /// Query entities with optional filtering
    List {
        /// Search filter, e.g. 'hostname:"web-01"'
        #[arg(short, long)]
        query: Option<String>,
        /// Window size
        #[arg(short, long, default_value_t = 100)]
        limit: usize,
        /// Window start
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Fetch a single entity by ID
    Get {
        /// Entity ID
        id: String,
    },
    /// List entities related to the given entity
    Related {
        /// Entity ID
        id: String,
    },
}

pub async fn run(
    client: &CseClient,
    command: EntitiesCommand,
    format: OutputFormat,
) -> CseResult<()> {
    match command {
        EntitiesCommand::List {
            query,
            limit,
            offset,
        } => {
            let page = client.get_entities(query.as_deref(), limit, offset).await?;
            output::render_records(&page.records, format);
        }
        EntitiesCommand::Get { id } => {
            let entity = client.get_entity(&id).await?;
            output::render_record(&entity, format);
        }
        EntitiesCommand::Related { id } => {
            let page = client.get_related_entities(&id).await?;
            output::render_records(&page.records, format);
        }
    }
    Ok(())
}
