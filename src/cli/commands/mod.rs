//! CLI command implementations

pub mod hotdoc_config;
pub mod scan;

pub use hotdoc_config::execute as hotdoc_config;
pub use scan::execute as scan;
