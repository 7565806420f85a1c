//! # Verification Client
//!
//! This module contains the client that talks to the remote verification
//! service.
//!
//! ## Responsibility
//!
//! The [`VerificationClient`] struct focuses on a single, well-defined responsibility:
//! - Build the request body for the selected game
//! - Send exactly one authenticated POST to the configured endpoint
//! - Classify the reply as a [`LookupOutcome`]
//!
//! It does not validate the form, retry, deduplicate or track lookup state.
//! Those concerns belong to [`validation`](crate::validation) and the
//! [`LookupMiddleware`](super::middleware::LookupMiddleware).
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = VerificationClient::new(&config.service)?;
//! let outcome = client
//!     .check_identifier(&MOBILE_LEGENDS, "555", "9", DEFAULT_SERVER)
//!     .await;
//! ```

use log::{debug, warn};
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

use crate::catalog::GameDefinition;
use crate::common::config::{ServiceConfig, API_KEY_ENV};
use crate::common::messages::{LookupOutcome, LookupRequest, ServiceResponse};
use crate::error::{Error, Result};

/// Client for the remote verification service.
///
/// Cheap to share behind an `Arc`; every call builds its own request and
/// nothing is kept between calls.
pub struct VerificationClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key_header: HeaderName,
    api_key: HeaderValue,
}

impl VerificationClient {
    /// Creates a client from the service configuration.
    ///
    /// # Errors
    ///
    /// * [`Error::Url`] / [`Error::InvalidScheme`] if the endpoint is not an http(s) URL
    /// * [`Error::MissingApiKey`] if no key was configured
    /// * [`Error::InvalidHeader`] if the header name or key is not a legal header token
    /// * [`Error::Http`] if the HTTP client cannot be built
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        match endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(Error::InvalidScheme(other.to_string())),
        }

        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey(API_KEY_ENV))?;

        let api_key_header = HeaderName::from_bytes(config.api_key_header.as_bytes())
            .map_err(|_| Error::InvalidHeader(config.api_key_header.clone()))?;
        let mut api_key = HeaderValue::from_str(api_key)
            .map_err(|_| Error::InvalidHeader(format!("value for {}", config.api_key_header)))?;
        api_key.set_sensitive(true);

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint,
            api_key_header,
            api_key,
        })
    }

    /// The endpoint lookups are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Checks one account on the remote service.
    ///
    /// The caller must already have confirmed the form with
    /// [`is_submittable`](crate::validation::is_submittable); nothing is
    /// re-validated here.
    ///
    /// # Arguments
    ///
    /// * `game` - Selected game
    /// * `account_id` - In-game account identifier
    /// * `zone_id` - Zone identifier, sent only if the game requires one
    /// * `server` - Server region, sent only if the game requires one
    ///
    /// # Returns
    ///
    /// The classified outcome. Transport and decoding errors become
    /// `LookupOutcome::Failure`; this method never fails.
    pub async fn check_identifier(
        &self,
        game: &GameDefinition,
        account_id: &str,
        zone_id: &str,
        server: &str,
    ) -> LookupOutcome {
        let request = LookupRequest::for_game(game, account_id, zone_id, server);
        self.check(&request).await
    }

    /// Sends an already built request body and classifies the reply.
    pub async fn check(&self, request: &LookupRequest) -> LookupOutcome {
        match self.send(request).await {
            Ok(response) => LookupOutcome::from(response),
            Err(e) => {
                warn!("Lookup of {} account {} failed: {}", request.game, request.id, e);
                LookupOutcome::failure(e.to_string())
            }
        }
    }

    /// Issues the POST and decodes the body.
    ///
    /// The HTTP status is not inspected: a 4xx/5xx reply whose body still
    /// decodes as a service response is classified like any other.
    async fn send(&self, request: &LookupRequest) -> Result<ServiceResponse> {
        debug!("POST {} game={} id={}", self.endpoint, request.game, request.id);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(self.api_key_header.clone(), self.api_key.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Service replied {} ({} bytes)", status, body.len());

        Ok(serde_json::from_str(&body)?)
    }
}
