//! # Explain10 Core Library
//!
//! Request-scoped domain values shared by the generation gateway and the
//! HTTP surface:
//!
//! - **Requests**: a topic plus an audience [`Level`] and an output [`Style`]
//! - **Results**: the fixed four-section [`ExplainResult`]
//! - **Errors**: the classified [`GatewayError`] taxonomy and its HTTP statuses
//! - **Configuration**: `explain10.toml` plus an environment overlay
//! - **Local fallback**: a canned explanation used when the upstream is unusable
//!
//! Nothing in this crate performs I/O except [`ExplainConfig::from_file`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod fallback;
pub mod types;

pub use config::ExplainConfig;
pub use error::{ErrorCode, GatewayError};
pub use types::*;
