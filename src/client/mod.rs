//! # Client Components
//!
//! The client is split into the pieces a lookup passes through:
//!
//! ## Verification Client ([`client`])
//! Builds the request body, sends one authenticated POST to the verification
//! service, and classifies the reply.
//!
//! ## Lookup Session ([`session`])
//! Form state plus the Idle/Pending/Resolved lifecycle, as plain values with
//! transition functions.
//!
//! ## Lookup Middleware ([`middleware`])
//! Drives a session through a lookup:
//! - Submission gating via the validation rules
//! - Dispatch through the verification client
//! - Stale-reply protection via generations
//! - Metrics recording
//!
//! ## Metrics ([`metrics`])
//! In-memory latency and outcome counters.

pub mod client;
pub mod metrics;
pub mod middleware;
pub mod session;

// Re-export for convenience
pub use client::VerificationClient;
pub use metrics::LookupMetrics;
pub use middleware::{ClientConfig, LookupMiddleware};
pub use session::{LookupForm, LookupPhase, LookupSession, LookupTicket, Resolution};
