//! External plugin scanner
//!
//! Provides the scanner seam used by the reconciler:
//! - `ProcessScanner`: runs the plugin introspection program
//! - search path helpers to expose freshly built plugins to it

mod process;
mod runtime;
pub mod search_path;

pub use process::ProcessScanner;
pub use runtime::{ScanRequest, Scanner};
pub use search_path::{extend_search_path, plugin_search_path, PATH_SEPARATOR};
