//! HMAC request signing for the Verint user-management API.
//!
//! Every request carries an `Authorization` header of the form
//!
//! ```text
//! Vrnt-1-HMAC-SHA256 salt=<b64url>,iat=<YYYY-MM-DDTHH:MM:SSZ>,kid=<key id>,sig=<b64url>
//! ```
//!
//! where `sig` is an HMAC-SHA256 over the canonical string
//! `salt\nMETHOD\npath\ntimestamp\n\n`, keyed with the decoded API secret.
//! A fresh salt and timestamp are generated for every call.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;

use crate::Error;

/// Literal scheme prefix of the `Authorization` header.
pub const SIGNATURE_PREFIX: &str = "Vrnt-1-HMAC-SHA256";

const SALT_LEN: usize = 16;

type HmacSha256 = Hmac<Sha256>;

/// Signs outgoing requests with the configured API key.
///
/// The secret is decoded once at construction so a malformed secret is
/// reported before any request is attempted.
#[derive(Clone)]
pub struct Signer {
    key_id: String,
    mac: HmacSha256,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("key_id", &self.key_id)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Signer {
    /// Creates a signer from a key id and a URL-safe base64 encoded secret.
    pub fn new(key_id: &str, secret: &str) -> Result<Self, Error> {
        let key = decode_secret(secret)?;
        let mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| Error::AuthConfiguration(e.to_string()))?;
        Ok(Self {
            key_id: key_id.to_string(),
            mac,
        })
    }

    /// Returns the `Authorization` header value for a request, using a fresh
    /// random salt and the current UTC time.
    pub fn sign(&self, method: &str, path: &str) -> String {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt_bytes);
        let salt = URL_SAFE_NO_PAD.encode(salt_bytes);
        self.sign_with(method, path, &salt, Utc::now())
    }

    /// Builds the header value for an explicit salt and issue time.
    pub fn sign_with(
        &self,
        method: &str,
        path: &str,
        salt: &str,
        issued_at: DateTime<Utc>,
    ) -> String {
        let timestamp = format_timestamp(issued_at);
        let canonical = canonical_string(salt, method, path, &timestamp);
        let signature = self.signature(&canonical);
        format!(
            "{} salt={},iat={},kid={},sig={}",
            SIGNATURE_PREFIX, salt, timestamp, self.key_id, signature
        )
    }

    /// HMAC-SHA256 of `canonical`, URL-safe base64 without padding.
    pub fn signature(&self, canonical: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(canonical.as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }
}

/// The exact string the signature covers.
pub fn canonical_string(salt: &str, method: &str, path: &str, timestamp: &str) -> String {
    format!("{}\n{}\n{}\n{}\n\n", salt, method, path, timestamp)
}

/// Formats a timestamp as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Decodes a URL-safe base64 secret, restoring the standard alphabet and
/// padding first so both padded and unpadded secrets are accepted.
fn decode_secret(secret: &str) -> Result<Vec<u8>, Error> {
    let trimmed = secret.trim().trim_end_matches('=');
    if trimmed.is_empty() {
        return Err(Error::AuthConfiguration("secret is empty".to_string()));
    }
    let mut standard: String = trimmed
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let padding = (4 - standard.len() % 4) % 4;
    standard.extend(std::iter::repeat('=').take(padding));
    STANDARD
        .decode(standard.as_bytes())
        .map_err(|e| Error::AuthConfiguration(format!("secret is not URL-safe base64: {}", e)))
}
