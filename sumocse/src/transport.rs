//! Single-request transport over the CSE REST API.

use std::path::Path;

use base64::Engine;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::config::CseConfig;
use crate::error::{CseError, CseResult};

/// Default API version segment for request URLs.
pub const DEFAULT_API_VERSION: &str = "v1";

/// How much of a non-JSON error body is carried into the error message.
const ERROR_SNIPPET_LEN: usize = 200;

/// Issues one HTTP request per call against a versioned base endpoint.
///
/// Owns the connection pool and the precomputed authorization header. All
/// response triage (status classification, error-message extraction, JSON
/// parsing) happens here, so callers only ever see [`CseError`] categories.
#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    endpoint: String,
    auth_header: String,
}

// Credentials never appear in debug output.
impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Build a transport from a validated configuration.
    pub fn new(config: &CseConfig) -> CseResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| CseError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let credentials = format!("{}:{}", config.access_id, config.access_key);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_header: format!("Basic {encoded}"),
        })
    }

    /// The resolved base URL this transport talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue a single request and return the parsed JSON body.
    ///
    /// The call URL is `endpoint + "/" + version + path`, with `version`
    /// defaulting to [`DEFAULT_API_VERSION`]. Query parameters are sent on
    /// GET and DELETE; `body` is JSON-encoded on POST and PUT. An empty
    /// response body parses as an empty object.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        version: Option<&str>,
    ) -> CseResult<Value> {
        let url = self.url_for(path, version);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json");

        if method == Method::GET || method == Method::DELETE {
            if !query.is_empty() {
                request = request.query(query);
            }
        } else if let Some(body) = body {
            request = request.json(body);
        }

        let context = format!("{method} {path}");
        let response = request.send().await.map_err(|e| CseError::Api {
            status: None,
            message: format!("network error during {context}: {e}"),
            body: None,
        })?;

        self.triage(response, &context).await
    }

    /// Upload a file as multipart form data.
    ///
    /// Reads the file from disk before sending; a missing or unreadable file
    /// fails with [`CseError::Data`] without issuing a request.
    pub async fn post_file(
        &self,
        path: &str,
        full_file_path: &Path,
        file_name: &str,
        merge: bool,
        version: Option<&str>,
    ) -> CseResult<Value> {
        let data = std::fs::read(full_file_path).map_err(|e| {
            CseError::Data(format!(
                "cannot read file {}: {e}",
                full_file_path.display()
            ))
        })?;
        debug!(bytes = data.len(), file = %full_file_path.display(), "read upload payload");

        let part = reqwest::multipart::Part::bytes(data).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let url = self.url_for(path, version);

        let context = format!("POST FILE {path}");
        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.auth_header)
            .query(&[("merge", merge.to_string())])
            .multipart(form)
            .send()
            .await
            .map_err(|e| CseError::Api {
                status: None,
                message: format!("network error during {context}: {e}"),
                body: None,
            })?;

        self.triage(response, &context).await
    }

    fn url_for(&self, path: &str, version: Option<&str>) -> String {
        let version = version.unwrap_or(DEFAULT_API_VERSION);
        format!("{}/{}{}", self.endpoint, version, path)
    }

    /// Classify a response: authentication failures, API errors, and
    /// unparseable bodies each surface as their own error category.
    async fn triage(&self, response: reqwest::Response, context: &str) -> CseResult<Value> {
        let status = response.status();
        debug!(%context, status = status.as_u16(), "response");

        let text = response.text().await.map_err(|e| CseError::Api {
            status: Some(status.as_u16()),
            message: format!("failed to read response body for {context}: {e}"),
            body: None,
        })?;

        match status.as_u16() {
            401 => Err(CseError::Authentication(
                "authentication failed, check your access ID and key".to_string(),
            )),
            403 => Err(CseError::Api {
                status: Some(403),
                message: "access denied, check your permissions".to_string(),
                body: Some(text),
            }),
            s @ 400..=599 => {
                let message = match extract_error_message(&text) {
                    Some(message) => message,
                    None if text.is_empty() => format!("API request failed: {context}"),
                    None => text.chars().take(ERROR_SNIPPET_LEN).collect(),
                };
                Err(CseError::Api {
                    status: Some(s),
                    message,
                    body: Some(text),
                })
            }
            _ => {
                if text.is_empty() {
                    return Ok(Value::Object(serde_json::Map::new()));
                }
                serde_json::from_str(&text).map_err(|e| {
                    CseError::Data(format!("invalid JSON response for {context}: {e}"))
                })
            }
        }
    }
}

/// Pull a `message` or `error` field out of a JSON error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"message": "rate limit exceeded"}"#),
            Some("rate limit exceeded".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error": "not found"}"#),
            Some("not found".to_string())
        );
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(r#"{"detail": "other"}"#), None);
    }

    #[test]
    fn test_url_assembly() {
        let config = CseConfig::builder()
            .access_id("id")
            .access_key("key")
            .endpoint("us2")
            .build()
            .unwrap();
        let transport = Transport::new(&config).unwrap();
        assert_eq!(
            transport.url_for("/insights/all", None),
            "https://api.us2.sumologic.com/api/sec/v1/insights/all"
        );
        assert_eq!(
            transport.url_for("/rules", Some("v2")),
            "https://api.us2.sumologic.com/api/sec/v2/rules"
        );
    }
}
