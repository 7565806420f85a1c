use thiserror::Error;

/// Errors raised while setting up a [`VerificationClient`](crate::client::VerificationClient)
/// or talking to the verification service.
///
/// Errors from an individual lookup never leave the client; they are turned
/// into [`LookupOutcome::Failure`](crate::common::messages::LookupOutcome).
#[derive(Error, Debug)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid URL scheme: {0} (expected http or https)")]
    InvalidScheme(String),
    #[error("no API key configured (set {0})")]
    MissingApiKey(&'static str),
    #[error("invalid API key header: {0}")]
    InvalidHeader(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
