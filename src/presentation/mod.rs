//! Presentation layer handling terminal UI and user input.
//!
//! This module draws the catalog with ratatui and maps keyboard input to
//! application actions.

pub mod ui;
pub mod input;
pub mod terminal;

pub use ui::*;
pub use input::*;
pub use terminal::*;
