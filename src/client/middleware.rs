//! # Lookup Middleware
//!
//! This module contains the layer that drives a [`LookupSession`] through a
//! lookup using the [`VerificationClient`].
//!
//! ## Responsibilities
//!
//! The [`LookupMiddleware`] struct manages the coordination around one call:
//! - **Gating**: only tickets produced by an accepted submission are dispatched
//! - **Dispatch**: exactly one call to the verification client per ticket
//! - **Metrics**: records latency and outcome when metrics are attached
//! - **Resolution**: tags the outcome with the ticket's generation so the
//!   session can drop stale replies
//!
//! There is no retry: a failed lookup is final until the user submits again.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = Arc::new(VerificationClient::new(&config.service)?);
//! let middleware = LookupMiddleware::new(client);
//!
//! let session = LookupSession::new()
//!     .select_game(find_game("ml"))
//!     .set_account_id("555")
//!     .set_zone_id("9");
//! let session = middleware.run(session).await;
//! println!("{:?}", session.outcome());
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::client::client::VerificationClient;
use crate::client::metrics::LookupMetrics;
use crate::client::session::{LookupSession, LookupTicket, Resolution};
use crate::common::config::ServiceConfig;
use crate::common::messages::LookupOutcome;

/// Client configuration loaded from TOML file.
///
/// # Example TOML
///
/// ```toml
/// [service]
/// endpoint = "https://api.velixs.com/idgames-checker"
/// api_key_header = "X-VelixsAPI-Key"
/// ```
///
/// Any other tables in the file (such as `[web]`) are ignored, so the client
/// and the web proxy can share one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Middleware that dispatches lookup tickets and resolves sessions.
///
/// # Fields
///
/// * `client` - Shared verification client
/// * `metrics` - Optional shared counters, updated after every dispatch
#[derive(Clone)]
pub struct LookupMiddleware {
    client: Arc<VerificationClient>,
    metrics: Option<Arc<Mutex<LookupMetrics>>>,
}

impl LookupMiddleware {
    pub fn new(client: Arc<VerificationClient>) -> Self {
        Self {
            client,
            metrics: None,
        }
    }

    /// Attaches shared metrics that every dispatch will update.
    pub fn with_metrics(mut self, metrics: Arc<Mutex<LookupMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn metrics(&self) -> Option<&Arc<Mutex<LookupMetrics>>> {
        self.metrics.as_ref()
    }

    pub fn client(&self) -> &VerificationClient {
        &self.client
    }

    /// Sends the ticket's request and returns its outcome tagged with the
    /// ticket's generation.
    ///
    /// Each call is independent; overlapping dispatches are all sent and it is
    /// up to [`LookupSession::resolve`] to keep only the newest.
    pub async fn dispatch(&self, ticket: LookupTicket) -> Resolution {
        info!(
            "🔎 Checking {} account {} (lookup #{})",
            ticket.game.display_name, ticket.request.id, ticket.generation
        );

        let started = Instant::now();
        let outcome = self.client.check(&ticket.request).await;
        let latency = started.elapsed();

        match &outcome {
            LookupOutcome::Success { username } => info!(
                "✅ Lookup #{} found {} ({} ms)",
                ticket.generation,
                username,
                latency.as_millis()
            ),
            LookupOutcome::Failure { reason } => warn!(
                "❌ Lookup #{} failed: {} ({} ms)",
                ticket.generation,
                reason,
                latency.as_millis()
            ),
        }

        if let Some(metrics) = &self.metrics {
            match metrics.lock() {
                Ok(mut metrics) => metrics.record_lookup(ticket.game.id, latency, &outcome),
                Err(_) => warn!(
                    "Metrics lock poisoned; lookup #{} not recorded",
                    ticket.generation
                ),
            }
        }

        Resolution {
            generation: ticket.generation,
            outcome,
        }
    }

    /// Submits the session's form and, if accepted, waits for the lookup and
    /// applies it.
    ///
    /// A rejected form comes back unchanged; the rejection is logged.
    pub async fn run(&self, session: LookupSession) -> LookupSession {
        let (session, ticket) = session.submit();
        match ticket {
            Ok(ticket) => {
                let resolution = self.dispatch(ticket).await;
                session.resolve(resolution)
            }
            Err(e) => {
                warn!("Lookup not submitted: {}", e);
                session
            }
        }
    }
}
