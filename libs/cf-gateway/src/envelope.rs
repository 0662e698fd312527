//! Cloud Controller v2 JSON envelopes.
//!
//! Every v2 resource is wrapped as `{"metadata": {...}, "entity": {...}}`, and
//! collection listings are paginated as `{"total_results": .., "next_url": ..,
//! "resources": [...]}`.

use serde::{Deserialize, Serialize};

/// Server-assigned resource metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub guid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A single resource: metadata plus the kind-specific entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    pub metadata: Metadata,
    pub entity: E,
}

/// One page of a collection listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginatedResources<E> {
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Absolute path (including the API version) of the next page, if any.
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default = "Vec::new")]
    pub resources: Vec<Resource<E>>,
}

/// Cloud Controller error document returned with non-success statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
