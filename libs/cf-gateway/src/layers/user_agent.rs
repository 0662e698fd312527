use crate::error::GatewayError;
use http::{HeaderValue, Request};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower layer that sets the User-Agent header unless the request already has one
#[derive(Clone, Debug)]
pub struct UserAgentLayer {
    user_agent: HeaderValue,
}

impl UserAgentLayer {
    /// # Errors
    /// Returns `GatewayError::InvalidHeaderValue` if the string is not a valid header value
    pub fn try_new(user_agent: impl AsRef<str>) -> Result<Self, GatewayError> {
        let user_agent = HeaderValue::from_str(user_agent.as_ref())?;
        Ok(Self { user_agent })
    }
}

impl<S> Layer<S> for UserAgentLayer {
    type Service = UserAgentService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        UserAgentService {
            inner,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Created by [`UserAgentLayer`].
#[derive(Clone, Debug)]
pub struct UserAgentService<S> {
    inner: S,
    user_agent: HeaderValue,
}

impl<S, ReqBody> Service<Request<ReqBody>> for UserAgentService<S>
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
        if !req.headers().contains_key(http::header::USER_AGENT) {
            req.headers_mut()
                .insert(http::header::USER_AGENT, self.user_agent.clone());
        }
        self.inner.call(req)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use tower::ServiceExt;

    /// Echoes the User-Agent header it received.
    #[derive(Clone)]
    struct EchoUa;

    impl Service<Request<()>> for EchoUa {
        type Response = Option<HeaderValue>;
        type Error = GatewayError;
        type Future = std::future::Ready<Result<Self::Response, Self::Error>>;

        fn poll_ready(&mut self, _: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: Request<()>) -> Self::Future {
            std::future::ready(Ok(req.headers().get(http::header::USER_AGENT).cloned()))
        }
    }

    #[tokio::test]
    async fn test_user_agent_added() {
        let service = UserAgentLayer::try_new("cf-test/1.0").unwrap().layer(EchoUa);
        let req = Request::builder().uri("http://example.com").body(()).unwrap();

        let ua = service.oneshot(req).await.unwrap();
        assert_eq!(ua, Some(HeaderValue::from_static("cf-test/1.0")));
    }

    #[tokio::test]
    async fn test_user_agent_not_overwritten() {
        let service = UserAgentLayer::try_new("cf-test/1.0").unwrap().layer(EchoUa);
        let req = Request::builder()
            .uri("http://example.com")
            .header(http::header::USER_AGENT, "custom/2.0")
            .body(())
            .unwrap();

        let ua = service.oneshot(req).await.unwrap();
        assert_eq!(ua, Some(HeaderValue::from_static("custom/2.0")));
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        let result = UserAgentLayer::try_new("invalid\x00agent");
        assert!(matches!(result, Err(GatewayError::InvalidHeaderValue(_))));
    }
}
