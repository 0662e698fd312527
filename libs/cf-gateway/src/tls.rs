//! TLS connector construction.

use crate::error::GatewayError;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use std::sync::Arc;

/// Get the crypto provider for TLS connections.
///
/// Uses the process-wide default provider when one is installed, otherwise an
/// aws-lc-rs provider that is not installed globally.
pub fn get_crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

/// Build the HTTPS connector with webpki roots.
///
/// Plain `http://` is only enabled when `allow_http` is set.
///
/// # Errors
///
/// Returns `GatewayError::Tls` if the crypto provider rejects the default protocol versions.
pub fn build_https_connector(
    allow_http: bool,
) -> Result<HttpsConnector<HttpConnector>, GatewayError> {
    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(get_crypto_provider())
        .map_err(|e| GatewayError::Tls(Box::new(e)))?;

    let connector = if allow_http {
        builder.https_or_http().enable_all_versions().build()
    } else {
        builder.https_only().enable_all_versions().build()
    };
    Ok(connector)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_connector_builds_in_both_modes() {
        assert!(build_https_connector(false).is_ok());
        assert!(build_https_connector(true).is_ok());
    }
}
