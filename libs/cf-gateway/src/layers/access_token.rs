use crate::error::GatewayError;
use http::header::AUTHORIZATION;
use http::{HeaderValue, Request};
use secrecy::{ExposeSecret, SecretString};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that injects the configured access token into outbound requests.
///
/// The token is sent verbatim as the `Authorization` header value (Cloud
/// Controller tokens are stored with their `bearer ` prefix). The header is
/// marked sensitive so it is redacted from `Debug` output. Without a token the
/// layer is a pass-through.
#[derive(Clone, Debug)]
pub struct AccessTokenLayer {
    authorization: Option<HeaderValue>,
}

impl AccessTokenLayer {
    /// # Errors
    /// Returns `GatewayError::InvalidHeaderValue` if the token contains bytes not
    /// allowed in a header value
    pub fn try_new(token: Option<&SecretString>) -> Result<Self, GatewayError> {
        let authorization = token
            .map(|secret| {
                let mut value = HeaderValue::from_str(secret.expose_secret())?;
                value.set_sensitive(true);
                Ok::<_, GatewayError>(value)
            })
            .transpose()?;
        Ok(Self { authorization })
    }
}

impl<S> Layer<S> for AccessTokenLayer {
    type Service = AccessTokenService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessTokenService {
            inner,
            authorization: self.authorization.clone(),
        }
    }
}

/// Created by [`AccessTokenLayer`].
#[derive(Clone, Debug)]
pub struct AccessTokenService<S> {
    inner: S,
    authorization: Option<HeaderValue>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for AccessTokenService<S>
where
    S: Service<Request<ReqBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        if let Some(value) = &self.authorization {
            req.headers_mut().insert(AUTHORIZATION, value.clone());
        }
        self.inner.call(req)
    }
}
