//! Default command - scan plugins and merge them into the cache

use crate::cache::NormalizeRules;
use crate::cli::args::ScanArgs;
use crate::config::Config;
use crate::error::{DocCacheError, DocCacheResult};
use crate::reconcile::Reconciler;
use crate::scanner::ProcessScanner;
use tracing::debug;

/// Execute the scan + merge flow
pub async fn execute(args: ScanArgs, config: &Config) -> DocCacheResult<()> {
    let (cache_file, output_file) = match (args.cache_file, args.output_file) {
        (Some(cache_file), Some(output_file)) => (cache_file, output_file),
        _ => {
            return Err(DocCacheError::User(
                "expected <CACHE_FILE> <OUTPUT_FILE> [PLUGINS]...".to_string(),
            ));
        }
    };

    let program = args.scanner.unwrap_or_else(|| config.scanner.program.clone());
    let scanner = ProcessScanner::resolved(&program);
    debug!("Using scanner {}", scanner.program().display());

    let rules = NormalizeRules::from_config(&config.normalize);
    let reconciler = Reconciler::new(scanner, config.scanner.clone(), rules);

    let report = reconciler
        .run(&cache_file, &output_file, &args.plugins)
        .await?;
    debug!(
        "{} plugins scanned, {} cached, modified: {}",
        report.plugins, report.entries, report.modified
    );
    Ok(())
}
