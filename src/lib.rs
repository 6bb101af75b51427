//! rmdex - Rick and Morty catalog library
//!
//! Browses the public Rick and Morty character catalog from the terminal:
//! filterable, paginated listings, persistent favorites and episode details.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
