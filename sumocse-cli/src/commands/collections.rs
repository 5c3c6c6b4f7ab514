//! Generic list/get over the configuration collections.
//!
//! Most configuration resources share one wire shape (a token-paginated
//! collection plus a by-ID getter), so a single pair of subcommands covers
//! all of them, selected by a value enum.

use clap::ValueEnum;
use colored::Colorize;
use sumocse::{CseClient, CseError, CseResult, Record, TokenPage};

use crate::output::{self, OutputFormat};

/// A configuration collection reachable through the generic list/get shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    TagSchemas,
    ContextActions,
    EntityGroups,
    EntityCriticalityConfigs,
    CustomEntityTypes,
    CustomInsights,
    CustomMatchListColumns,
    LookupTables,
    LogMappings,
    NetworkBlocks,
    SuppressedLists,
    RuleTuningExpressions,
    MitreTactics,
    MitreTechniques,
    InsightStatuses,
    InsightResolutions,
    VendorsAndProducts,
}

fn page_parts(page: TokenPage) -> (Vec<Record>, Option<String>) {
    (page.records, page.next_page_token)
}

/// List one page of a collection.
pub async fn list(
    client: &CseClient,
    resource: Collection,
    limit: usize,
    token: Option<&str>,
    format: OutputFormat,
) -> CseResult<()> {
    let (records, next) = match resource {
        Collection::TagSchemas => page_parts(client.get_tag_schemas(limit, token).await?),
        Collection::ContextActions => page_parts(client.get_context_actions(limit, token).await?),
        Collection::EntityGroups => page_parts(client.get_entity_groups(limit, token).await?),
        Collection::EntityCriticalityConfigs => {
            page_parts(client.get_entity_criticality_configs(limit, token).await?)
        }
        Collection::CustomEntityTypes => {
            page_parts(client.get_custom_entity_types(limit, token).await?)
        }
        Collection::CustomInsights => page_parts(client.get_custom_insights(limit, token).await?),
        Collection::CustomMatchListColumns => {
            page_parts(client.get_custom_match_list_columns(limit, token).await?)
        }
        Collection::LookupTables => {
            page_parts(client.get_customer_sourced_lookup_tables(limit, token).await?)
        }
        Collection::LogMappings => page_parts(client.get_log_mappings(limit, token).await?),
        Collection::NetworkBlocks => page_parts(client.get_network_blocks(limit, token).await?),
        Collection::SuppressedLists => {
            page_parts(client.get_suppressed_lists(limit, token).await?)
        }
        Collection::RuleTuningExpressions => {
            page_parts(client.get_rule_tuning_expressions(limit, token).await?)
        }
        Collection::MitreTactics => page_parts(client.get_mitre_tactics(limit, token).await?),
        Collection::MitreTechniques => page_parts(client.get_mitre_techniques(limit, token).await?),
        Collection::InsightStatuses => (client.get_insight_statuses().await?, None),
        Collection::InsightResolutions => (client.get_insight_resolutions().await?, None),
        Collection::VendorsAndProducts => {
            (client.get_log_mapping_vendors_and_products().await?, None)
        }
    };

    output::render_records(&records, format);
    if let Some(next) = next {
        println!("{} {next}", "next page token:".dimmed());
    }
    Ok(())
}

/// Fetch a single object from a collection by ID.
pub async fn get(
    client: &CseClient,
    resource: Collection,
    id: &str,
    format: OutputFormat,
) -> CseResult<()> {
    let record = match resource {
        Collection::TagSchemas => client.get_tag_schema(id).await?,
        Collection::ContextActions => client.get_context_action(id).await?,
        Collection::EntityGroups => client.get_entity_group(id).await?,
        Collection::EntityCriticalityConfigs => {
            client.get_entity_criticality_config(id).await?
        }
        Collection::CustomEntityTypes => client.get_custom_entity_type(id).await?,
        Collection::CustomInsights => client.get_custom_insight(id).await?,
        Collection::CustomMatchListColumns => client.get_custom_match_list_column(id).await?,
        Collection::LookupTables => client.get_customer_sourced_lookup_table(id).await?,
        Collection::LogMappings => client.get_log_mapping(id).await?,
        Collection::NetworkBlocks => client.get_network_block(id).await?,
        Collection::SuppressedLists => client.get_suppressed_list(id).await?,
        Collection::RuleTuningExpressions => client.get_rule_tuning_expression(id).await?,
        Collection::InsightStatuses => client.get_insight_status(id).await?,
        Collection::InsightResolutions => client.get_insight_resolution(id).await?,
        Collection::MitreTactics
        | Collection::MitreTechniques
        | Collection::VendorsAndProducts => {
            return Err(CseError::Configuration(format!(
                "{resource:?} has no by-ID lookup; use `list` instead"
            )));
        }
    };

    output::render_record(&record, format);
    Ok(())
}
