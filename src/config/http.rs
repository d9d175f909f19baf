//! HTTP transport settings.

use std::{path::PathBuf, time::Duration};

use crate::{Error, user_agent};

/// Settings for the HTTP client a [`Client`](crate::Client) builds for itself.
///
/// Ignored when the caller supplies its own `reqwest::Client` through
/// [`ClientBuilder::http_client`](crate::ClientBuilder::http_client).
///
/// ## Default Values
///
/// - `timeout`: 30s
/// - `connect_timeout`: 10s
/// - no extra CA certificates
/// - certificate verification on
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use ignis::HttpConfig;
///
/// let config = HttpConfig::builder()
///     .timeout(Duration::from_secs(10))
///     .ca_cert_file("/etc/ssl/corp-ca.pem")
///     .build();
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct HttpConfig {
    /// Total time allowed for one request.
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,

    /// Time allowed to establish a connection.
    #[builder(default = Duration::from_secs(10))]
    pub connect_timeout: Duration,

    /// Extra CA certificate file to trust.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Extra CA certificate PEM data to trust.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Whether to accept invalid server certificates.
    ///
    /// **WARNING**: Only for local development against self-signed hosts.
    #[builder(default = false)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HttpConfig {
    /// Returns `true` if an extra CA is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .user_agent(user_agent::user_agent());

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref path) = self.ca_cert_file {
            let pem = std::fs::read(path).map_err(|e| {
                Error::configuration(format!("failed to read certificate {:?}: {}", path, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&pem).map_err(|e| {
                Error::configuration(format!("invalid certificate {:?}: {}", path, e))
            })?;
            builder = builder.add_root_certificate(cert);
        }

        if let Some(ref pem) = self.ca_cert_pem {
            let cert = reqwest::Certificate::from_pem(pem.as_bytes())
                .map_err(|e| Error::configuration(format!("invalid CA certificate PEM: {}", e)))?;
            builder = builder.add_root_certificate(cert);
        }

        builder
            .build()
            .map_err(|e| Error::configuration(format!("failed to create HTTP client: {}", e)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_default() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(!config.has_custom_ca());
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_builder_overrides() {
        let config = HttpConfig::builder()
            .timeout(Duration::from_secs(5))
            .ca_cert_pem("-----BEGIN CERTIFICATE-----")
            .accept_invalid_certs(true)
            .build();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.has_custom_ca());
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_builds_default_client() {
        assert!(HttpConfig::default().build_client().is_ok());
    }

    #[test]
    fn test_missing_ca_file_is_configuration_error() {
        let config = HttpConfig::builder()
            .ca_cert_file("/nonexistent/ignis-test-ca.pem")
            .build();
        let err = config.build_client().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
