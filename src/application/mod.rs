//! Application layer managing state and business workflows.
//!
//! This module coordinates between the catalog client and the presentation
//! layer: the [`Coordinator`] owns loaded data and favorites, [`App`] adds
//! the terminal UI state on top, and [`Tasks`] moves network calls off the
//! UI thread.

pub mod coordinator;
pub mod state;
pub mod tasks;

#[cfg(test)]
pub(crate) mod fakes;

pub use coordinator::*;
pub use state::*;
pub use tasks::*;
