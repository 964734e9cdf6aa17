//! GStreamer plugins documentation cache
//!
//! Keeps the plugin documentation cache in sync with freshly built plugins
//! and emits the per-plugin hotdoc configurations built from it.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod hotdoc;
pub mod reconcile;
pub mod scanner;

pub use error::{DocCacheError, DocCacheResult};
