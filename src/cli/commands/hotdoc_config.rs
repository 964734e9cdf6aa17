//! hotdoc-config command - write per-plugin hotdoc configurations

use crate::cli::args::HotdocConfigArgs;
use crate::error::DocCacheResult;
use crate::hotdoc::{generate_plugin_configs, join_for_output, HotdocOptions};
use tracing::debug;

/// Execute the hotdoc-config command
///
/// Prints the generated files joined by the path separator, as a single
/// argument for the docs build.
pub async fn execute(args: HotdocConfigArgs) -> DocCacheResult<()> {
    let options = HotdocOptions::from(args);
    debug!("Reading plugins from {}", options.gst_cache_file.display());

    let files = generate_plugin_configs(&options).await?;
    println!("{}", join_for_output(&files));
    Ok(())
}
