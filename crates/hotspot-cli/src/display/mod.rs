//! Terminal renderings of the hotspot panel.
//!
//! The core only knows the `Display` trait; these are the CLI's screens.

pub mod terminal;

pub use terminal::{JsonLinesDisplay, TerminalDisplay};
