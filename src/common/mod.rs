//! # Common Components
//!
//! Shared utilities and data structures used by both client and server components.
//!
//! ## Modules
//!
//! - [`messages`]: JSON bodies for the verification service and the web proxy
//! - [`config`]: Configuration parsing utilities
//! - [`logging`]: Logger setup shared by the binaries

pub mod config;
pub mod logging;
pub mod messages;
