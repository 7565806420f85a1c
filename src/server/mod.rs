//! # Server Components
//!
//! The web proxy that keeps the verification service's API key on the server
//! side and exposes lookups to browser clients.
//!
//! - [`server`]: router, handlers and the serve loop
//! - [`config`]: proxy configuration (`[service]` plus `[web]`)

pub mod config;
pub mod server;

pub use config::{ServerConfig, WebConfig};
pub use server::{AppState, ProxyServer};
