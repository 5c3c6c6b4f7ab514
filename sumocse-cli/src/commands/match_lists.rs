//! Match list commands.

use clap::Subcommand;
use colored::Colorize;
use sumocse::{CseClient, CseResult};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum MatchListsCommand {
    /// List match lists
    List {
        /// Window size
        #[arg(short, long, default_value_t = CseClient::CONFIG_PAGE_LIMIT)]
        limit: usize,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
    },
    /// Fetch a single match list by ID
    Get {
        /// Match list ID
        id: String,
    },
    /// List items of a match list
    Items {
        /// Match list ID
        list_id: String,
        /// Window size
        #[arg(short, long, default_value_t = CseClient::CONFIG_PAGE_LIMIT)]
        limit: usize,
        /// Continuation token from a previous page
        #[arg(long)]
        token: Option<String>,
    },
    /// Fetch a single item of a match list
    Item {
        /// Match list ID
        list_id: String,
        /// Item ID
        item_id: String,
    },
}

pub async fn run(
    client: &CseClient,
    command: MatchListsCommand,
    format: OutputFormat,
) -> CseResult<()> {
    match command {
        MatchListsCommand::List { limit, token } => {
            let page = client.get_match_lists(limit, token.as_deref()).await?;
            output::render_records(&page.records, format);
            if let Some(next) = page.next_page_token {
                println!("{} {next}", "next page token:".dimmed());
            }
        }
        MatchListsCommand::Get { id } => {
            let list = client.get_match_list(&id).await?;
            output::render_record(&list, format);
        }
        MatchListsCommand::Items {
            list_id,
            limit,
            token,
        } => {
            let page = client
                .get_match_list_items(&list_id, limit, token.as_deref())
                .await?;
            output::render_records(&page.records, format);
        }
        MatchListsCommand::Item { list_id, item_id } => {
            let item = client.get_match_list_item(&list_id, &item_id).await?;
            output::render_record(&item, format);
        }
    }
    Ok(())
}
