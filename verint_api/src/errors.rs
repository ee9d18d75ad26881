//! Error types for the API client.

/// Errors that can occur when signing or making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API key secret is missing or is not URL-safe base64.
    #[error("Invalid API key secret: {0}")]
    AuthConfiguration(String),
    /// The base URL and endpoint did not form a valid URL.
    #[error("Invalid URL for {endpoint}: {reason}")]
    InvalidUrl { endpoint: String, reason: String },
    /// The HTTP request could not be sent or the body could not be read.
    #[error("Request to {endpoint} failed")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API returned a non-success status with a body snippet.
    #[error("Request to {endpoint} failed with status {status}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// The response body was not the JSON shape we expected.
    #[error("Failed to parse response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },
}

impl Error {
    /// HTTP status code, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
