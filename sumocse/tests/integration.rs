//! Integration tests against a mock CSE API.

use std::path::Path;

use serde_json::json;
use sumocse::{CseClient, CseConfig, CseError};
use wiremock::matchers::{basic_auth, body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> CseClient {
    let config = CseConfig::builder()
        .access_id("test-id")
        .access_key("test-key")
        .endpoint(server.uri())
        .build()
        .unwrap();
    CseClient::new(config).unwrap()
}

fn objects(ids: &[&str]) -> Vec<serde_json::Value> {
    ids.iter().map(|id| json!({ "id": id })).collect()
}

#[tokio::test]
async fn query_insights_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": [], "total": 0, "hasNextPage": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let insights = client.query_insights(None, 50).await.unwrap();
    assert!(insights.is_empty());
}

#[tokio::test]
async fn query_insights_single_record_single_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "objects": [{ "id": "INSIGHT-1", "name": "Only One", "severity": "HIGH" }],
                "total": 1,
                "hasNextPage": false
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let insights = client.query_insights(None, 50).await.unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].id.as_deref(), Some("INSIGHT-1"));
    assert_eq!(insights[0].severity.as_deref(), Some("HIGH"));
}

#[tokio::test]
async fn query_insights_clamps_requested_total() {
    // Asking for 150 is clamped to QUERY_TOTAL_MAX (100): five windows of
    // twenty, offsets advancing by the requested batch size.
    let server = MockServer::start().await;
    for offset in [0usize, 20, 40, 60, 80] {
        let ids: Vec<String> = (offset..offset + 20).map(|i| format!("I-{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        Mock::given(method("GET"))
            .and(path("/v1/insights"))
            .and(query_param("offset", offset.to_string()))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "objects": objects(&id_refs), "total": 500, "hasNextPage": true }
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server).await;
    let insights = client.query_insights(None, 150).await.unwrap();
    assert_eq!(insights.len(), 100);
    assert_eq!(insights[0].id.as_deref(), Some("I-0"));
    assert_eq!(insights[99].id.as_deref(), Some("I-99"));
}

#[tokio::test]
async fn get_insights_follows_tokens_to_the_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights/all"))
        .and(query_param_is_missing("nextPageToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": objects(&["a", "b"]), "nextPageToken": "A" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/insights/all"))
        .and(query_param("nextPageToken", "A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": objects(&["c"]), "nextPageToken": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    // Cap far above the two pages the server actually has.
    let insights = client.get_insights(None, 10).await.unwrap();
    assert_eq!(insights.len(), 3);
    assert_eq!(insights[2].id.as_deref(), Some("c"));
}

#[tokio::test]
async fn get_insights_stops_at_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": objects(&["x"]), "nextPageToken": "again" }
        })))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let insights = client.get_insights(None, 3).await.unwrap();
    assert_eq!(insights.len(), 3);
}

#[tokio::test]
async fn server_error_on_second_page_discards_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "objects": (0..20).map(|i| json!({"id": format!("I-{i}")})).collect::<Vec<_>>(),
                "total": 100,
                "hasNextPage": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/insights"))
        .and(query_param("offset", "20"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "internal error" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.query_insights(None, 100).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("internal error"));
}

#[tokio::test]
async fn unauthorized_is_authentication_not_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights/all"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_insights(None, 5).await.unwrap_err();
    assert!(err.is_authentication());
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn forbidden_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/rules"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no entitlement"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_rules(None, 0, 20).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));
    assert_eq!(err.response_body(), Some("no entitlement"));
}

#[tokio::test]
async fn error_message_extracted_from_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights/MISSING"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "insight not found" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_insight("MISSING").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert!(err.to_string().contains("insight not found"));
}

#[tokio::test]
async fn plain_text_error_body_is_clipped_into_message() {
    let server = MockServer::start().await;
    let long_body = "x".repeat(500);
    Mock::given(method("GET"))
        .and(path("/v1/tag-schemas"))
        .respond_with(ResponseTemplate::new(400).set_body_string(long_body.clone()))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_tag_schemas(100, None).await.unwrap_err();
    let CseError::Api { status, message, body } = err else {
        panic!("expected Api error");
    };
    assert_eq!(status, Some(400));
    assert_eq!(message.len(), 200);
    assert_eq!(body.as_deref(), Some(long_body.as_str()));
}

#[tokio::test]
async fn malformed_success_body_is_data_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights-configuration"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.get_insights_configuration().await.unwrap_err();
    assert!(matches!(err, CseError::Data(_)));
}

#[tokio::test]
async fn requests_carry_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tag-schemas"))
        .and(basic_auth("test-id", "test-key"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": objects(&["schema-1"]), "nextPageToken": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let page = client.get_tag_schemas(100, None).await.unwrap();
    assert_eq!(page.records.len(), 1);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn collection_token_is_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/entity-groups"))
        .and(query_param("limit", "50"))
        .and(query_param("token", "cursor-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": [], "nextPageToken": null }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let page = client.get_entity_groups(50, Some("cursor-1")).await.unwrap();
    assert!(page.records.is_empty());
}

#[tokio::test]
async fn update_resolution_status_puts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/insights/INSIGHT-9/status"))
        .and(body_json(json!({ "resolution": "False Positive", "status": "closed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "INSIGHT-9", "status": { "name": "closed" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updated = client
        .update_insight_resolution_status("INSIGHT-9", "False Positive", "closed")
        .await
        .unwrap();
    assert_eq!(updated.id.as_deref(), Some("INSIGHT-9"));
    assert_eq!(updated.extra_nested_str("status", "name"), Some("closed"));
}

#[tokio::test]
async fn add_comment_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/insights/INSIGHT-9/comments"))
        .and(body_json(json!({ "body": "triaged, benign" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "comment-1", "body": "triaged, benign" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let comment = client
        .add_insight_comment("INSIGHT-9", "triaged, benign")
        .await
        .unwrap();
    assert_eq!(comment.id.as_deref(), Some("comment-1"));
}

#[tokio::test]
async fn query_filter_reaches_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insights"))
        .and(query_param("q", "severity:\"HIGH\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "objects": objects(&["hit"]), "total": 1, "hasNextPage": false }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let insights = client
        .query_insights(Some("severity:\"HIGH\""), 20)
        .await
        .unwrap();
    assert_eq!(insights.len(), 1);
}

#[tokio::test]
async fn unpaged_status_collection_parses_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/insight-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": "s1", "name": "new" },
                { "id": "s2", "name": "closed" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let statuses = client.get_insight_statuses().await.unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[1].name.as_deref(), Some("closed"));
}

#[tokio::test]
async fn post_file_uploads_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/match-lists/ml-1/items"))
        .and(query_param("merge", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": "batch-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = std::env::temp_dir().join("sumocse-upload-test.csv");
    std::fs::write(&file, "value\n10.0.0.1\n").unwrap();

    let client = client_for(&server).await;
    let value = client
        .transport()
        .post_file("/match-lists/ml-1/items", &file, "items.csv", false, None)
        .await
        .unwrap();
    std::fs::remove_file(&file).ok();
    assert_eq!(value["data"]["id"], "batch-1");
}

#[tokio::test]
async fn post_file_missing_file_is_data_error() {
    let server = MockServer::start().await;
    let client = client_for(&server).await;
    let err = client
        .transport()
        .post_file(
            "/match-lists/ml-1/items",
            Path::new("/nonexistent/upload.csv"),
            "upload.csv",
            false,
            None,
        )
        .await
        .unwrap_err();
    // Fails before any request is issued.
    assert!(matches!(err, CseError::Data(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_body_on_success_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ping"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client
        .transport()
        .request(reqwest::Method::GET, "/ping", &[], None, None)
        .await
        .unwrap();
    assert_eq!(value, json!({}));
}
