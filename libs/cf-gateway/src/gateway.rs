use crate::client::HttpClient;
use crate::config::GatewayConfig;
use crate::envelope::{PaginatedResources, Resource};
use crate::error::GatewayError;
use crate::query::ListQuery;
use async_trait::async_trait;
use bytes::Bytes;
use http::{Method, StatusCode};
use std::collections::HashSet;
use std::time::Instant;

/// Upper bound on pages fetched by one listing.
pub const MAX_LIST_PAGES: usize = 1000;

/// Generic Cloud Controller resource operations.
///
/// Paths are relative to the versioned API root (e.g. `/app_security_groups`).
/// Each operation succeeds only on its expected status; any other status is
/// returned as a classified [`GatewayError`]. Nothing is retried.
///
/// Resource repositories receive the gateway as a shared `Arc<dyn Gateway>`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// POST `body` to the collection at `path`; succeeds only on `201 Created`.
    async fn create_resource(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), GatewayError>;

    /// GET the collection at `path`, following `next_url` until the last page.
    ///
    /// Entities are returned undecoded; each page must answer `200 OK`.
    async fn list_resources(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Vec<Resource<serde_json::Value>>, GatewayError>;

    /// DELETE the resource at `path`; succeeds only on `204 No Content`.
    async fn delete_resource(&self, path: &str) -> Result<(), GatewayError>;
}

/// [`Gateway`] backed by the Cloud Controller HTTP API.
///
/// Injects the base URL, API version, access token and User-Agent on every
/// call (see [`GatewayConfig`]).
#[derive(Clone)]
pub struct CloudControllerGateway {
    http: HttpClient,
    api_endpoint: String,
    api_root: String,
}

impl CloudControllerGateway {
    /// # Errors
    /// Returns `GatewayError::InvalidUri` if `api_endpoint` is empty, or any
    /// error from building the HTTP client
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        if config.api_endpoint.trim().is_empty() {
            return Err(GatewayError::InvalidUri {
                url: config.api_endpoint,
                reason: "api endpoint is not configured".to_owned(),
            });
        }

        let http = HttpClient::from_config(&config)?;
        Ok(Self {
            http,
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_owned(),
            api_root: config.api_root(),
        })
    }

    fn resource_url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    /// Perform one request and return the body of the expected status.
    async fn perform(
        &self,
        method: Method,
        url: &str,
        body: Option<Bytes>,
        expected: StatusCode,
    ) -> Result<Bytes, GatewayError> {
        tracing::debug!(method = %method, url = %url, "cloud controller request");
        let started = Instant::now();

        let response = self.http.send(method, url, body).await?;

        tracing::debug!(
            status = response.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis(),
            "cloud controller response"
        );

        if response.status == expected {
            Ok(response.body)
        } else if response.status.is_success() {
            Err(GatewayError::UnexpectedStatus {
                expected,
                actual: response.status,
            })
        } else {
            Err(GatewayError::from_response(response.status, &response.body))
        }
    }
}

#[async_trait]
impl Gateway for CloudControllerGateway {
    async fn create_resource(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<(), GatewayError> {
        let body = Bytes::from(serde_json::to_vec(&body)?);
        self.perform(
            Method::POST,
            &self.resource_url(path),
            Some(body),
            StatusCode::CREATED,
        )
        .await?;
        Ok(())
    }

    async fn list_resources(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> Result<Vec<Resource<serde_json::Value>>, GatewayError> {
        let mut url = self.resource_url(path);
        if !query.is_empty() {
            url = format!("{url}?{}", query.to_query_string());
        }

        let mut resources = Vec::new();
        let mut visited = HashSet::new();
        loop {
            if visited.len() == MAX_LIST_PAGES {
                return Err(GatewayError::Pagination {
                    url,
                    reason: format!("more than {MAX_LIST_PAGES} pages"),
                });
            }
            let body = self.perform(Method::GET, &url, None, StatusCode::OK).await?;
            let page: PaginatedResources<serde_json::Value> = serde_json::from_slice(&body)?;
            resources.extend(page.resources);
            visited.insert(url);

            match page.next_url {
                Some(next) if !next.is_empty() => {
                    url = format!("{}{next}", self.api_endpoint);
                    if visited.contains(&url) {
                        return Err(GatewayError::Pagination {
                            url,
                            reason: "next_url points to an already fetched page".to_owned(),
                        });
                    }
                }
                _ => break,
            }
        }

        Ok(resources)
    }

    async fn delete_resource(&self, path: &str) -> Result<(), GatewayError> {
        self.perform(
            Method::DELETE,
            &self.resource_url(path),
            None,
            StatusCode::NO_CONTENT,
        )
        .await?;
        Ok(())
    }
}
