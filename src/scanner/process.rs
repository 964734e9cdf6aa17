//! Scanner backed by the external plugin introspection program
//!
//! The program is called as `<program> <output> <plugin>...` and writes a
//! JSON object to `<output>`. Initializing the framework may print warnings
//! even on a clean run, so stderr goes to a log file and is only replayed
//! when the scanner fails.

use crate::cache::{self, PluginCache};
use crate::error::{DocCacheError, DocCacheResult};
use crate::scanner::runtime::{ScanRequest, Scanner};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Scanner running an external program
pub struct ProcessScanner {
    program: PathBuf,
}

impl ProcessScanner {
    /// Create a scanner running `program` as given
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Create a scanner, looking a bare program name up next to our executable
    ///
    /// Falls back to the name itself (resolved through `PATH`) when no such
    /// file sits beside the executable.
    pub fn resolved(program: &Path) -> Self {
        Self::new(resolve_program(program))
    }

    /// The program this scanner runs
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Copy the captured log to our own stderr
    async fn replay_log(&self, log: &Path) {
        match fs::read(log).await {
            Ok(content) => eprint!("{}", String::from_utf8_lossy(&content)),
            Err(e) => debug!("Could not read scanner log {}: {}", log.display(), e),
        }
    }
}

#[async_trait]
impl Scanner for ProcessScanner {
    async fn scan(&self, request: &ScanRequest) -> DocCacheResult<PluginCache> {
        let log = std::fs::File::create(&request.stderr_log).map_err(|e| {
            DocCacheError::io(
                format!("creating scanner log {}", request.stderr_log.display()),
                e,
            )
        })?;

        debug!(
            "Executing: {} {} ({} plugins)",
            self.program.display(),
            request.output.display(),
            request.plugins.len()
        );

        let status = Command::new(&self.program)
            .arg(&request.output)
            .args(&request.plugins)
            .envs(request.env.iter().cloned())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::from(log))
            .status()
            .await
            .map_err(|e| DocCacheError::scanner_spawn(self.name(), e))?;

        if !status.success() {
            self.replay_log(&request.stderr_log).await;
            return Err(match status.code() {
                Some(code) => DocCacheError::ScannerFailed {
                    program: self.name(),
                    code,
                },
                None => DocCacheError::ScannerSignaled(self.name()),
            });
        }

        info!("Scanned {} plugins", request.plugins.len());
        cache::load_ordered(&request.output).await
    }

    fn name(&self) -> String {
        self.program.display().to_string()
    }
}

fn resolve_program(program: &Path) -> PathBuf {
    if program.components().count() != 1 {
        return program.to_path_buf();
    }

    let sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(program)));

    match sibling {
        Some(candidate) if candidate.is_file() => candidate,
        _ => program.to_path_buf(),
    }
}
