//! Command implementations.

pub mod announce;
pub mod config;
pub mod scan;
pub mod serve;

pub use announce::run_announce;
pub use config::run_config;
pub use scan::run_scan;
pub use serve::run_serve;
