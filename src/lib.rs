pub mod catalog;
pub mod client;
pub mod common;
pub mod error;
pub mod server;
pub mod validation;

pub use catalog::{find_game, GameDefinition, GAMES};
pub use client::{LookupMiddleware, LookupSession, VerificationClient};
pub use common::messages::{LookupOutcome, LookupRequest};
pub use error::{Error, Result};
pub use server::ProxyServer;
pub use validation::{check_submission, is_submittable, ValidationError};
