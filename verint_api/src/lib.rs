//! Client for the Verint workforce-management user API.
//!
//! Provides the HMAC request signer, an authenticated HTTP client, and typed
//! views of the JSON:API-style documents the API returns.

pub mod auth;
mod client;
pub mod de;
mod errors;
pub mod types;

pub use self::auth::Signer;
pub use self::client::{decode, Client, DEFAULT_TIMEOUT};
pub use self::errors::Error;
pub use reqwest::Method;
