//! Signal commands.

use clap::Subcommand;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum SignalsCommand {
    /// Query signals using the CSE query DSL
    List {
        /// Search filter, e.g. 'stage:"Exploitation"'
        #[arg(short, long)]
        query: Option<String>,
        /// Window size
        #[arg(short, long, default_value_t = 100)]
        limit: usize,
        /// Window start
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Fetch a single signal by ID
    Get {
        /// Signal ID
        id: String,
    },
}

pub async fn run(
    client: &CseClient,
    command: SignalsCommand,
    format: OutputFormat,
) -> CseResult<()> {
    match command {
        SignalsCommand::List {
            query,
            limit,
            offset,
        } => {
            let page = client.get_signals(query.as_deref(), limit, offset).await?;
            output::render_records(&page.records, format);
        }
        SignalsCommand::Get { id } => {
            let signal = client.get_signal(&id).await?;
            output::render_record(&signal, format);
        }
    }
    Ok(())
}
