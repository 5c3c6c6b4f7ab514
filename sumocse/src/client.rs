//! The per-resource client façade.

use reqwest::Method;
use serde_json::{Value, json};

use crate::config::CseConfig;
use crate::error::CseResult;
use crate::page::{OffsetPage, Record, TokenPage, parse_envelope};
use crate::paginate::{aggregate_by_offset, aggregate_by_token};
use crate::transport::Transport;

/// Client for the Sumo Logic Cloud SIEM REST API.
///
/// One method per resource; the list endpoints come in two flavors fixed by
/// the server: token-paginated (`get_insights_all`, the configuration
/// collections) and offset-paginated (`get_insights_list`, `get_rules`,
/// `get_entities`, `get_signals`). The `query_*` and `get_insights` methods
/// aggregate across pages; everything else is a single call.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CseClient {
    transport: Transport,
}

impl CseClient {
    /// Page cap for token-cursor aggregation ([`Self::get_insights`]).
    pub const DEFAULT_MAX_PAGES: usize = 5;
    /// Per-request window size on the offset-paginated insights and rules
    /// list endpoints.
    pub const LIST_PAGE_CAP: usize = 20;
    /// Default per-request limit on the token-paginated configuration
    /// collections.
    pub const CONFIG_PAGE_LIMIT: usize = 100;
    /// Upper bound on the total a `query_*` call will fetch; larger
    /// requests are clamped before aggregation starts.
    pub const QUERY_TOTAL_MAX: usize = 100;

    /// Create a client from a configuration.
    pub fn new(config: CseConfig) -> CseResult<Self> {
        Ok(Self {
            transport: Transport::new(&config)?,
        })
    }

    /// Create a client from `SUMO_ACCESS_ID` / `SUMO_ACCESS_KEY` against the
    /// default endpoint.
    pub fn from_env() -> CseResult<Self> {
        Self::new(CseConfig::from_env()?)
    }

    /// The resolved base URL this client talks to.
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Escape hatch for endpoints without a typed method.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    // ---- shared request shapes -------------------------------------------

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> CseResult<Value> {
        self.transport
            .request(Method::GET, path, query, None, None)
            .await
    }

    /// One page of a token-paginated collection.
    async fn list_collection(
        &self,
        path: &str,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(token) = token {
            query.push(("token", token.to_string()));
        }
        let value = self.get_json(path, &query).await?;
        parse_envelope(value, path)
    }

    /// A single record by path.
    async fn get_record(&self, path: &str) -> CseResult<Record> {
        let value = self.get_json(path, &[]).await?;
        parse_envelope(value, path)
    }

    /// An unpaged collection returned as a bare array under `data`.
    async fn get_record_list(&self, path: &str) -> CseResult<Vec<Record>> {
        let value = self.get_json(path, &[]).await?;
        parse_envelope(value, path)
    }

    /// Reporting-volume counts over a time range.
    async fn get_counts(
        &self,
        path: &str,
        start_time: &str,
        end_time: &str,
        timezone: &str,
    ) -> CseResult<Record> {
        let query = [
            ("startTime", start_time.to_string()),
            ("endTime", end_time.to_string()),
            ("timezone", timezone.to_string()),
        ];
        let value = self.get_json(path, &query).await?;
        parse_envelope(value, path)
    }

    // ---- insights --------------------------------------------------------

    /// Fetch one page of insights from the token-paginated `all` endpoint.
    ///
    /// The server caps each page at 100 records and hands back a
    /// continuation token while more remain.
    pub async fn get_insights_all(
        &self,
        q: Option<&str>,
        next_page_token: Option<&str>,
    ) -> CseResult<TokenPage> {
        let mut query = Vec::new();
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        if let Some(token) = next_page_token {
            query.push(("nextPageToken", token.to_string()));
        }
        let value = self.get_json("/insights/all", &query).await?;
        parse_envelope(value, "/insights/all")
    }

    /// Aggregate insights by following continuation tokens, fetching at
    /// most `max_pages` pages ([`Self::DEFAULT_MAX_PAGES`] is the
    /// conventional cap).
    pub async fn get_insights(
        &self,
        q: Option<&str>,
        max_pages: usize,
    ) -> CseResult<Vec<Record>> {
        aggregate_by_token(
            |token| async move { self.get_insights_all(q, token.as_deref()).await },
            max_pages,
        )
        .await
    }

    /// Fetch one offset/limit window of insights.
    pub async fn get_insights_list(
        &self,
        q: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> CseResult<OffsetPage> {
        let mut query = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        let value = self.get_json("/insights", &query).await?;
        parse_envelope(value, "/insights")
    }

    /// Aggregate up to `limit` insights through the offset-paginated list
    /// endpoint, batching requests at [`Self::LIST_PAGE_CAP`] records each.
    ///
    /// Totals above [`Self::QUERY_TOTAL_MAX`] are clamped down before the
    /// walk starts. The result can be shorter than `limit` when fewer
    /// insights match.
    pub async fn query_insights(&self, q: Option<&str>, limit: usize) -> CseResult<Vec<Record>> {
        let total = limit.min(Self::QUERY_TOTAL_MAX);
        aggregate_by_offset(
            |offset, batch| async move { self.get_insights_list(q, offset, batch).await },
            total,
            Self::LIST_PAGE_CAP,
        )
        .await
    }

    /// Fetch a single insight by ID.
    pub async fn get_insight(&self, insight_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/insights/{insight_id}")).await
    }

    /// Set the resolution and status of an insight.
    ///
    /// One-shot call with no retry; issuing it twice produces two updates.
    pub async fn update_insight_resolution_status(
        &self,
        insight_id: &str,
        resolution: &str,
        status: &str,
    ) -> CseResult<Record> {
        let body = json!({ "resolution": resolution, "status": status });
        let value = self
            .transport
            .request(
                Method::PUT,
                &format!("/insights/{insight_id}/status"),
                &[],
                Some(&body),
                None,
            )
            .await?;
        parse_envelope(value, "insight status update")
    }

    /// Add a comment to an insight, returning the created comment.
    pub async fn add_insight_comment(
        &self,
        insight_id: &str,
        comment: &str,
    ) -> CseResult<Record> {
        let body = json!({ "body": comment });
        let value = self
            .transport
            .request(
                Method::POST,
                &format!("/insights/{insight_id}/comments"),
                &[],
                Some(&body),
                None,
            )
            .await?;
        parse_envelope(value, "insight comment")
    }

    /// Global insights configuration.
    pub async fn get_insights_configuration(&self) -> CseResult<Record> {
        self.get_record("/insights-configuration").await
    }

    /// All defined or custom insight statuses.
    pub async fn get_insight_statuses(&self) -> CseResult<Vec<Record>> {
        self.get_record_list("/insight-status").await
    }

    /// A specific insight status by ID.
    pub async fn get_insight_status(&self, status_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/insight-status/{status_id}")).await
    }

    /// All defined or custom insight resolutions.
    pub async fn get_insight_resolutions(&self) -> CseResult<Vec<Record>> {
        self.get_record_list("/insight-resolutions").await
    }

    /// A specific insight resolution by ID.
    pub async fn get_insight_resolution(&self, resolution_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/insight-resolutions/{resolution_id}"))
            .await
    }

    // ---- rules -----------------------------------------------------------

    /// Fetch one offset/limit window of rules.
    pub async fn get_rules(
        &self,
        q: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> CseResult<OffsetPage> {
        let mut query = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        let value = self.get_json("/rules", &query).await?;
        parse_envelope(value, "/rules")
    }

    /// Fetch a single rule by ID.
    pub async fn get_rule(&self, rule_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/rules/{rule_id}")).await
    }

    /// Aggregate up to `limit` rules through the offset-paginated list
    /// endpoint, with the same batching policy as [`Self::query_insights`].
    pub async fn query_rules(&self, q: Option<&str>, limit: usize) -> CseResult<Vec<Record>> {
        let total = limit.min(Self::QUERY_TOTAL_MAX);
        aggregate_by_offset(
            |offset, batch| async move { self.get_rules(q, offset, batch).await },
            total,
            Self::LIST_PAGE_CAP,
        )
        .await
    }

    /// All rule tuning expressions.
    pub async fn get_rule_tuning_expressions(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/rule-tuning-expressions", limit, token)
            .await
    }

    /// A specific rule tuning expression by ID.
    pub async fn get_rule_tuning_expression(&self, expression_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/rule-tuning-expressions/{expression_id}"))
            .await
    }

    // ---- entities and signals --------------------------------------------

    /// Query entities with optional filtering.
    pub async fn get_entities(
        &self,
        q: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> CseResult<OffsetPage> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        let value = self.get_json("/entities", &query).await?;
        parse_envelope(value, "/entities")
    }

    /// Fetch a single entity by ID.
    pub async fn get_entity(&self, entity_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/entities/{entity_id}")).await
    }

    /// Entities related to the given entity.
    pub async fn get_related_entities(&self, entity_id: &str) -> CseResult<TokenPage> {
        let value = self
            .get_json(&format!("/entities/{entity_id}/related"), &[])
            .await?;
        parse_envelope(value, "related entities")
    }

    /// All entity group configurations.
    pub async fn get_entity_groups(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/entity-groups", limit, token).await
    }

    /// A specific entity group by ID.
    pub async fn get_entity_group(&self, group_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/entity-groups/{group_id}")).await
    }

    /// All custom entity criticality configurations.
    pub async fn get_entity_criticality_configs(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/entity-criticality-configs", limit, token)
            .await
    }

    /// A specific entity criticality configuration by ID.
    pub async fn get_entity_criticality_config(&self, config_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/entity-criticality-configs/{config_id}"))
            .await
    }

    /// All custom entity types.
    pub async fn get_custom_entity_types(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/custom-entity-types", limit, token)
            .await
    }

    /// A specific custom entity type by ID.
    pub async fn get_custom_entity_type(&self, entity_type_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/custom-entity-types/{entity_type_id}"))
            .await
    }

    /// Query signals using the CSE query DSL.
    pub async fn get_signals(
        &self,
        q: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> CseResult<OffsetPage> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(q) = q {
            query.push(("q", q.to_string()));
        }
        let value = self.get_json("/signals", &query).await?;
        parse_envelope(value, "/signals")
    }

    /// Fetch a single signal by ID.
    pub async fn get_signal(&self, signal_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/signals/{signal_id}")).await
    }

    // ---- configuration collections ---------------------------------------

    /// All custom insights.
    pub async fn get_custom_insights(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/custom-insights", limit, token).await
    }

    /// A specific custom insight by ID.
    pub async fn get_custom_insight(&self, insight_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/custom-insights/{insight_id}"))
            .await
    }

    /// All context actions.
    pub async fn get_context_actions(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/context-actions", limit, token).await
    }

    /// A specific context action by ID.
    pub async fn get_context_action(&self, action_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/context-actions/{action_id}"))
            .await
    }

    /// All match lists.
    pub async fn get_match_lists(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/match-lists", limit, token).await
    }

    /// A specific match list by ID.
    pub async fn get_match_list(&self, list_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/match-lists/{list_id}")).await
    }

    /// Items of a specific match list.
    pub async fn get_match_list_items(
        &self,
        list_id: &str,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection(&format!("/match-lists/{list_id}/items"), limit, token)
            .await
    }

    /// A specific item of a match list.
    pub async fn get_match_list_item(&self, list_id: &str, item_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/match-lists/{list_id}/items/{item_id}"))
            .await
    }

    /// All custom match list columns.
    pub async fn get_custom_match_list_columns(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/custom-match-list-columns", limit, token)
            .await
    }

    /// A specific custom match list column by ID.
    pub async fn get_custom_match_list_column(&self, column_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/custom-match-list-columns/{column_id}"))
            .await
    }

    /// All customer-created lookup tables.
    pub async fn get_customer_sourced_lookup_tables(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/customer-sourced-lookup-tables", limit, token)
            .await
    }

    /// A specific customer-created lookup table by ID.
    pub async fn get_customer_sourced_lookup_table(&self, table_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/customer-sourced-lookup-tables/{table_id}"))
            .await
    }

    /// All defined log mappings.
    pub async fn get_log_mappings(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/log-mappings", limit, token).await
    }

    /// A specific log mapping by ID.
    pub async fn get_log_mapping(&self, mapping_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/log-mappings/{mapping_id}")).await
    }

    /// All available log mapping vendors and products.
    pub async fn get_log_mapping_vendors_and_products(&self) -> CseResult<Vec<Record>> {
        self.get_record_list("/log-mappings/vendors-and-products")
            .await
    }

    /// All network blocks.
    pub async fn get_network_blocks(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/network-blocks", limit, token).await
    }

    /// A specific network block by ID.
    pub async fn get_network_block(&self, block_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/network-blocks/{block_id}")).await
    }

    /// All MITRE ATT&CK tactics.
    pub async fn get_mitre_tactics(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/mitre-tactics", limit, token).await
    }

    /// All MITRE ATT&CK techniques.
    pub async fn get_mitre_techniques(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/mitre-techniques", limit, token).await
    }

    /// All suppressed lists.
    pub async fn get_suppressed_lists(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/suppressed-lists", limit, token).await
    }

    /// A specific suppressed list by ID.
    pub async fn get_suppressed_list(&self, list_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/suppressed-lists/{list_id}")).await
    }

    /// All tag schemas.
    pub async fn get_tag_schemas(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/tag-schemas", limit, token).await
    }

    /// A specific tag schema by ID.
    pub async fn get_tag_schema(&self, schema_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/tag-schemas/{schema_id}")).await
    }

    // ---- threat intelligence ---------------------------------------------

    /// All threat intelligence sources.
    pub async fn get_threat_intel_sources(
        &self,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection("/threat-intel-sources", limit, token)
            .await
    }

    /// A specific threat intelligence source by ID.
    pub async fn get_threat_intel_source(&self, source_id: &str) -> CseResult<Record> {
        self.get_record(&format!("/threat-intel-sources/{source_id}"))
            .await
    }

    /// Indicators of a specific threat intelligence source.
    pub async fn get_threat_intel_indicators(
        &self,
        source_id: &str,
        limit: usize,
        token: Option<&str>,
    ) -> CseResult<TokenPage> {
        self.list_collection(
            &format!("/threat-intel-sources/{source_id}/indicators"),
            limit,
            token,
        )
        .await
    }

    // ---- reporting volumes -----------------------------------------------

    /// Insight counts over a time range, for reporting volumes.
    pub async fn get_insight_counts(
        &self,
        start_time: &str,
        end_time: &str,
        timezone: &str,
    ) -> CseResult<Record> {
        self.get_counts("/insight-counts", start_time, end_time, timezone)
            .await
    }

    /// Signal counts over a time range.
    pub async fn get_signal_counts(
        &self,
        start_time: &str,
        end_time: &str,
        timezone: &str,
    ) -> CseResult<Record> {
        self.get_counts("/signal-counts", start_time, end_time, timezone)
            .await
    }

    /// Record counts over a time range.
    pub async fn get_record_counts(
        &self,
        start_time: &str,
        end_time: &str,
        timezone: &str,
    ) -> CseResult<Record> {
        self.get_counts("/record-counts", start_time, end_time, timezone)
            .await
    }
}
