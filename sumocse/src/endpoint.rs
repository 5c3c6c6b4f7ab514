//! Endpoint resolution for CSE API deployments.

use crate::error::{CseError, CseResult};

/// Default API endpoint (the `prod`/`us1` deployment).
pub const DEFAULT_ENDPOINT: &str = "https://api.sumologic.com/api/sec";

/// Region codes with their own geo-routed deployment.
const REGION_CODES: [&str; 7] = ["au", "fra", "mum", "us2", "mon", "dub", "tky"];

/// Resolve a deployment selector into a canonical base URL.
///
/// Accepts a short region code (`au`, `fra`, `mum`, `us2`, `mon`, `dub`,
/// `tky`), the aliases `prod`/`us1`, a full URL, or nothing (which falls
/// back to [`DEFAULT_ENDPOINT`]). The result always starts with an http(s)
/// scheme and never ends with a slash.
///
/// Resolution is a pure table lookup; no discovery request is made to infer
/// a geo-routed deployment from a redirect.
pub fn resolve_endpoint(input: Option<&str>) -> CseResult<String> {
    let endpoint = match input {
        None => DEFAULT_ENDPOINT.to_string(),
        Some("prod") | Some("us1") => DEFAULT_ENDPOINT.to_string(),
        Some(code) if REGION_CODES.contains(&code) => {
            format!("https://api.{code}.sumologic.com/api/sec")
        }
        // Anything else is taken as a literal URL.
        Some(url) => url.to_string(),
    };

    if endpoint.ends_with('/') {
        return Err(CseError::Configuration(
            "endpoint must not end with a slash".to_string(),
        ));
    }
    if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
        return Err(CseError::Configuration(format!(
            "endpoint must be an http(s) URL, got `{endpoint}`"
        )));
    }
    url::Url::parse(&endpoint)
        .map_err(|e| CseError::Configuration(format!("invalid endpoint URL: {e}")))?;

    Ok(endpoint)
}
