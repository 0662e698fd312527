#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Cloud Controller gateway
//!
//! This crate is the shared transport layer underneath every Cloud Controller
//! resource repository:
//! - hyper-based HTTP client with rustls (HTTPS only by default)
//! - per-request timeout, User-Agent and access token injection via tower layers
//! - classification of non-success responses into [`GatewayError`]
//! - Cloud Controller JSON envelopes (`metadata` / `entity`, paginated `resources`)
//! - generic building blocks for one-resource-kind repositories
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cf_gateway::{CloudControllerGateway, Gateway, GatewayConfig, ListQuery};
//!
//! let config = GatewayConfig::load(Some(Path::new("cf.yaml")))?;
//! let gateway: Arc<dyn Gateway> = Arc::new(CloudControllerGateway::new(config)?);
//!
//! let query = ListQuery::new().filter("name", "my-group").inline_relations_depth(1);
//! let resources = gateway.list_resources("/app_security_groups", &query).await?;
//! ```

mod client;
mod config;
pub mod envelope;
mod error;
mod gateway;
mod layers;
mod query;
pub mod resource;
mod tls;

pub use client::{HttpClient, RawResponse};
pub use config::{ConfigError, DEFAULT_API_VERSION, DEFAULT_USER_AGENT, ENV_PREFIX, GatewayConfig};
pub use envelope::{ApiErrorBody, Metadata, PaginatedResources, Resource};
pub use error::{ERROR_BODY_PREVIEW_LIMIT, GatewayError};
pub use gateway::{CloudControllerGateway, Gateway, MAX_LIST_PAGES};
pub use layers::{AccessTokenLayer, AccessTokenService, UserAgentLayer, UserAgentService};
pub use query::ListQuery;
pub use resource::{
    Decodable, Encodable, Identifiable, ResourceError, ResourceKind, ResourceRepository,
};
