//! TLS material attached to a network config
//!
//! Certificates are not stored directly. Each side holds a resolver that is
//! asked for the certificate on demand, so two configs can only be compared
//! by resolving both and comparing the results.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Minimum accepted protocol version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TlsVersion {
    Tls10,
    Tls11,
    #[default]
    Tls12,
    Tls13,
}

/// A resolved certificate chain with its private key, DER encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Certificate {
    pub chain: Vec<Vec<u8>>,
    pub private_key: Vec<u8>,
}

/// Failure to produce a certificate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("certificate resolution failed: {0}")]
pub struct ResolveError(pub String);

/// Produces a certificate when asked.
///
/// Resolution happens outside of any handshake, so implementations get no
/// connection context.
pub trait CertificateResolver: Send + Sync {
    fn resolve(&self) -> Result<Certificate, ResolveError>;
}

impl<F> CertificateResolver for F
where
    F: Fn() -> Result<Certificate, ResolveError> + Send + Sync,
{
    fn resolve(&self) -> Result<Certificate, ResolveError> {
        self()
    }
}

impl CertificateResolver for Certificate {
    fn resolve(&self) -> Result<Certificate, ResolveError> {
        Ok(self.clone())
    }
}

/// Runtime TLS settings. Clones share their resolvers.
#[derive(Clone)]
pub struct TlsConfig {
    pub min_version: TlsVersion,
    pub server_certificate: Arc<dyn CertificateResolver>,
    pub client_certificate: Arc<dyn CertificateResolver>,
}

impl TlsConfig {
    pub fn new(
        min_version: TlsVersion,
        server_certificate: impl CertificateResolver + 'static,
        client_certificate: impl CertificateResolver + 'static,
    ) -> Self {
        Self {
            min_version,
            server_certificate: Arc::new(server_certificate),
            client_certificate: Arc::new(client_certificate),
        }
    }

    /// Serve and authenticate with the same certificate
    pub fn with_certificate(min_version: TlsVersion, certificate: Certificate) -> Self {
        Self::new(min_version, certificate.clone(), certificate)
    }
}

impl fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsConfig")
            .field("min_version", &self.min_version)
            .finish_non_exhaustive()
    }
}

/// Check if two optional TLS configs differ.
///
/// Present configs are equal only when the minimum version and both resolved
/// certificates match. A resolution error on either side counts as a change.
pub fn tls_differs(left: Option<&TlsConfig>, right: Option<&TlsConfig>) -> bool {
    match (left, right) {
        (None, None) => false,
        (None, Some(_)) | (Some(_), None) => true,
        (Some(left), Some(right)) => {
            left.min_version != right.min_version
                || !same_certificate(
                    left.server_certificate.as_ref(),
                    right.server_certificate.as_ref(),
                    "server",
                )
                || !same_certificate(
                    left.client_certificate.as_ref(),
                    right.client_certificate.as_ref(),
                    "client",
                )
        }
    }
}

fn same_certificate(
    left: &dyn CertificateResolver,
    right: &dyn CertificateResolver,
    role: &str,
) -> bool {
    match (left.resolve(), right.resolve()) {
        (Ok(left), Ok(right)) => left == right,
        (Err(e), _) | (_, Err(e)) => {
            log::debug!("Treating TLS config as changed, {role} certificate: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert(tag: u8) -> Certificate {
        Certificate {
            chain: vec![vec![tag; 4]],
            private_key: vec![tag, tag],
        }
    }

    #[test]
    fn test_absent_configs_equal() {
        assert!(!tls_differs(None, None));
    }

    #[test]
    fn test_one_absent_differs() {
        let tls = TlsConfig::with_certificate(TlsVersion::Tls12, cert(1));
        assert!(tls_differs(Some(&tls), None));
        assert!(tls_differs(None, Some(&tls)));
    }

    #[test]
    fn test_same_resolved_certificates_equal() {
        // Distinct resolvers that resolve to the same material.
        let left = TlsConfig::with_certificate(TlsVersion::Tls12, cert(1));
        let resolve = || -> Result<Certificate, ResolveError> { Ok(cert(1)) };
        let right = TlsConfig::new(TlsVersion::Tls12, resolve, resolve);
        assert!(!tls_differs(Some(&left), Some(&right)));
    }

    #[test]
    fn test_min_version_differs() {
        let left = TlsConfig::with_certificate(TlsVersion::Tls12, cert(1));
        let right = TlsConfig::with_certificate(TlsVersion::Tls13, cert(1));
        assert!(tls_differs(Some(&left), Some(&right)));
    }

    #[test]
    fn test_server_certificate_differs() {
        let left = TlsConfig::new(TlsVersion::Tls12, cert(1), cert(3));
        let right = TlsConfig::new(TlsVersion::Tls12, cert(2), cert(3));
        assert!(tls_differs(Some(&left), Some(&right)));
    }

    #[test]
    fn test_client_certificate_differs() {
        let left = TlsConfig::new(TlsVersion::Tls12, cert(1), cert(3));
        let right = TlsConfig::new(TlsVersion::Tls12, cert(1), cert(4));
        assert!(tls_differs(Some(&left), Some(&right)));
    }

    #[test]
    fn test_resolution_error_differs() {
        let failing = || -> Result<Certificate, ResolveError> {
            Err(ResolveError("no certificate loaded".to_string()))
        };
        let left = TlsConfig::new(TlsVersion::Tls12, failing, cert(1));
        let right = TlsConfig::new(TlsVersion::Tls12, failing, cert(1));
        assert!(tls_differs(Some(&left), Some(&right)));
    }

    #[test]
    fn test_debug_hides_resolvers() {
        let tls = TlsConfig::with_certificate(TlsVersion::Tls13, cert(1));
        assert_eq!(format!("{tls:?}"), "TlsConfig { min_version: Tls13, .. }");
    }
}
