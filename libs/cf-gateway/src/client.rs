use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::layers::{AccessTokenLayer, UserAgentLayer};
use crate::tls;
use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneSyncService;
use tower::{ServiceBuilder, ServiceExt};

/// Type alias for the boxed response body.
pub type ResponseBody = BoxBody<Bytes, tower::BoxError>;

type HttpService = BoxCloneSyncService<Request<Full<Bytes>>, Response<ResponseBody>, GatewayError>;

/// Buffered outcome of one request: status and (size-limited) body.
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client with a tower middleware stack
///
/// Stack (outer to inner): Timeout → UserAgent → AccessToken → hyper client.
/// `send()` returns a response for every HTTP status; only transport, TLS and
/// timeout failures are errors at this level.
///
/// `HttpClient` is `Clone + Send + Sync`; cloning shares the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    service: HttpService,
    max_body_size: usize,
    allow_insecure_http: bool,
}

impl HttpClient {
    /// Build a client from the gateway configuration.
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or the user agent or
    /// access token are not valid header values
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        if config.allow_insecure_http {
            tracing::warn!(
                target: "cf_gateway::security",
                "insecure HTTP enabled; use only for testing with mock servers"
            );
        }

        let timeout = config.request_timeout;
        let https = tls::build_https_connector(config.allow_insecure_http)?;

        let hyper_client = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .build::<_, Full<Bytes>>(https);

        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(timeout))
            .layer(UserAgentLayer::try_new(&config.user_agent)?)
            .layer(AccessTokenLayer::try_new(config.access_token.as_ref())?)
            .service(hyper_client)
            .map_response(box_response_body)
            .map_err(move |e: tower::BoxError| map_tower_error(e, timeout));

        Ok(Self {
            service: BoxCloneSyncService::new(service),
            max_body_size: config.max_body_size,
            allow_insecure_http: config.allow_insecure_http,
        })
    }

    /// Send a request and buffer the response body.
    ///
    /// Success bodies are limited to `max_body_size`; non-success bodies are
    /// only read up to [`ERROR_BODY_PREVIEW_LIMIT`](crate::ERROR_BODY_PREVIEW_LIMIT).
    ///
    /// # Errors
    /// Returns `GatewayError` for invalid URLs, transport failures, timeouts,
    /// or oversized success bodies
    pub async fn send(
        &self,
        method: http::Method,
        url: &str,
        body: Option<Bytes>,
    ) -> Result<RawResponse, GatewayError> {
        let uri = self.validate_url(url)?;

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(http::header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(Full::new(body.unwrap_or_default()))?;

        let response = self.service.clone().oneshot(request).await?;
        let status = response.status();

        let body = if status.is_success() {
            read_body_limited(response, self.max_body_size).await?
        } else {
            let limit = self.max_body_size.min(crate::ERROR_BODY_PREVIEW_LIMIT);
            match read_body_limited(response, limit).await {
                Ok(bytes) => bytes,
                Err(GatewayError::BodyTooLarge { .. }) => {
                    Bytes::from_static(b"<body too large for preview>")
                }
                Err(e) => return Err(e),
            }
        };

        Ok(RawResponse { status, body })
    }

    /// Parse the URL and check its scheme against the transport security setting.
    fn validate_url(&self, url: &str) -> Result<http::Uri, GatewayError> {
        let uri: http::Uri = url.parse().map_err(|e: http::uri::InvalidUri| {
            GatewayError::InvalidUri {
                url: url.to_owned(),
                reason: e.to_string(),
            }
        })?;

        if uri.authority().is_none() {
            return Err(GatewayError::InvalidUri {
                url: url.to_owned(),
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") if self.allow_insecure_http => Ok(uri),
            Some(scheme) => Err(GatewayError::InvalidScheme {
                scheme: scheme.to_owned(),
            }),
            None => Err(GatewayError::InvalidUri {
                url: url.to_owned(),
                reason: "missing scheme".to_owned(),
            }),
        }
    }
}

fn box_response_body(response: Response<Incoming>) -> Response<ResponseBody> {
    response.map(|body| body.map_err(|e| Box::new(e) as tower::BoxError).boxed())
}

/// Map tower errors to `GatewayError` with the configured timeout duration.
fn map_tower_error(err: tower::BoxError, timeout: Duration) -> GatewayError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return GatewayError::Timeout(timeout);
    }

    match err.downcast::<GatewayError>() {
        Ok(gateway_err) => *gateway_err,
        Err(other) => GatewayError::Transport(other),
    }
}

/// Collect the body, failing with `BodyTooLarge` once `limit` bytes are exceeded.
async fn read_body_limited(
    response: Response<ResponseBody>,
    limit: usize,
) -> Result<Bytes, GatewayError> {
    let mut body = std::pin::pin!(response.into_body());
    let mut collected = Vec::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(GatewayError::Transport)?;
        if let Some(chunk) = frame.data_ref() {
            if collected.len() + chunk.len() > limit {
                return Err(GatewayError::BodyTooLarge {
                    limit,
                    actual: collected.len() + chunk.len(),
                });
            }
            collected.extend_from_slice(chunk);
        }
    }

    Ok(Bytes::from(collected))
}
