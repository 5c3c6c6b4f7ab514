//! # sumocse
//!
//! Client library for the Sumo Logic Cloud SIEM (CSE) REST API.
//!
//! Wraps the HTTP surface behind typed methods for insights, rules,
//! entities, signals and the configuration collections, and turns the
//! paged, rate-limited list endpoints into single logical result sets with
//! two aggregation strategies:
//!
//! - **Token cursor**: follow an opaque continuation token until the server
//!   stops returning one, capped at a page budget.
//! - **Offset batch**: walk offset/limit windows, capping each request at
//!   the resource's page size, until the requested total is reached or the
//!   server reports no next page.
//!
//! Which strategy applies is a property of the server endpoint, not a
//! client choice; the façade wires each resource to the right one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sumocse::CseClient;
//!
//! # async fn example() -> Result<(), sumocse::CseError> {
//! // Credentials from SUMO_ACCESS_ID / SUMO_ACCESS_KEY
//! let client = CseClient::from_env()?;
//!
//! let insights = client.query_insights(Some("severity:\"HIGH\""), 50).await?;
//! for insight in &insights {
//!     println!("{:?} {:?}", insight.id, insight.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Selecting a deployment
//!
//! ```rust,no_run
//! use sumocse::{CseClient, CseConfig};
//!
//! # fn example() -> Result<(), sumocse::CseError> {
//! let config = CseConfig::builder()
//!     .access_id("suxxxxxxxxxxxx")
//!     .access_key("...")
//!     .endpoint("us2") // region code, `prod`, or a full URL
//!     .build()?;
//! let client = CseClient::new(config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! Every failure is one of four categories: [`CseError::Authentication`]
//! (bad or missing credentials), [`CseError::Configuration`] (invalid
//! endpoint or client setup), [`CseError::Api`] (error responses and
//! network failures, status and raw body preserved), and
//! [`CseError::Data`] (unparseable response payloads). Aggregations are
//! all-or-nothing: a failed page discards everything fetched before it.

mod client;
mod config;
mod endpoint;
mod error;
mod page;
mod paginate;
mod transport;

pub use client::CseClient;
pub use config::{CseConfig, CseConfigBuilder, ENV_ACCESS_ID, ENV_ACCESS_KEY};
pub use endpoint::{DEFAULT_ENDPOINT, resolve_endpoint};
pub use error::{CseError, CseResult};
pub use page::{OffsetPage, Record, TokenPage};
pub use paginate::{aggregate_by_offset, aggregate_by_token};
pub use transport::{DEFAULT_API_VERSION, Transport};

/// Prelude for common imports.
///
/// ```
/// use sumocse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::CseClient;
    pub use crate::config::{CseConfig, CseConfigBuilder};
    pub use crate::error::{CseError, CseResult};
    pub use crate::page::{OffsetPage, Record, TokenPage};
}
