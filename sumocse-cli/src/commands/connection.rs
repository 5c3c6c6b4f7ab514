//! Connection smoke test.

use colored::Colorize;
use sumocse::{CseClient, CseResult};

/// Verify that the configured endpoint accepts our credentials.
///
/// Fetches the insight status catalog, a small always-available
/// collection, so a bad key or wrong deployment fails loudly here instead
/// of in the middle of a real workflow.
pub async fn run(client: &CseClient) -> CseResult<()> {
    println!("endpoint: {}", client.endpoint());
    let statuses = client.get_insight_statuses().await?;
    println!(
        "{} authenticated, {} insight status(es) visible",
        "ok".green().bold(),
        statuses.len()
    );
    Ok(())
}
