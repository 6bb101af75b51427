//! Infrastructure layer providing external service integrations.
//!
//! This module contains the remote catalog client, favorite persistence,
//! environment configuration and log setup.

pub mod api;
pub mod config;
pub mod logging;
pub mod persistence;

pub use api::*;
pub use config::*;
pub use logging::*;
pub use persistence::*;
