//! TLS certificate introspection.
//!
//! Connects to an HTTPS endpoint and extracts the negotiated TLS version and
//! leaf-certificate details (issuer, expiry). Used by the https check to
//! enrich its payload; any failure here is reported to the caller, who
//! treats the details as optional.
//!
//! Uses `tokio-rustls` for the async handshake and `x509-parser` for
//! certificate parsing.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};

/// Details extracted from a completed TLS handshake.
#[derive(Debug, Clone)]
pub struct TlsDetails {
    /// Negotiated protocol version, e.g. "TLSv1_3"
    pub version: Option<String>,
    /// Leaf certificate issuer distinguished name
    pub issuer: Option<String>,
    /// Leaf certificate notAfter instant
    pub expires_at: Option<DateTime<Utc>>,
    /// Whole days until expiry (negative once expired)
    pub days_until_expiry: Option<i64>,
}

/// Performs a TLS handshake against `host:443` and reads the leaf certificate.
///
/// # Arguments
///
/// * `host` - The hostname to connect to (also used for SNI)
///
/// # Errors
///
/// Returns an error if the hostname is not a valid server name, the TCP
/// connect or handshake fails or times out, or no peer certificate parses.
pub async fn probe_certificate(host: &str) -> Result<TlsDetails> {
    log::debug!("Probing TLS certificate for {host}");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(host.to_string())
        .map_err(|e| anyhow::anyhow!("Invalid server name {host}: {e}"))?;

    let sock = tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host, 443)),
    )
    .await
    .map_err(|_| anyhow::anyhow!("TCP connection timeout for {host}:443"))?
    .map_err(|e| anyhow::anyhow!("Failed to connect to {host}:443 - {e}"))?;

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    .map_err(|_| anyhow::anyhow!("TLS handshake timeout for {host}"))?
    .map_err(|e| anyhow::anyhow!("TLS handshake failed for {host}: {e}"))?;

    let (_, session) = tls_stream.get_ref();

    let version = session.protocol_version().map(|v| format!("{v:?}"));

    let certs = session
        .peer_certificates()
        .ok_or_else(|| anyhow::anyhow!("No peer certificates presented by {host}"))?;
    let cert_der = certs
        .first()
        .ok_or_else(|| anyhow::anyhow!("Empty certificate chain from {host}"))?;

    let (_, cert) = x509_parser::parse_x509_certificate(cert_der.as_ref())?;
    let issuer = cert.tbs_certificate.issuer.to_string();

    let expires_at = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0);
    let days_until_expiry = expires_at.map(|at| (at - Utc::now()).num_days());

    Ok(TlsDetails {
        version,
        issuer: Some(issuer),
        expires_at,
        days_until_expiry,
    })
}
