//! File sink - Implements OutputSink with write-then-rename
//!
//! The document is written to a temporary file in the target directory and
//! renamed over the target once complete, so readers see either the old
//! file or the new one and never a partial write.

use std::io::Write;
use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::OutputSink;
use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

/// Output sink writing a single file atomically
#[derive(Debug, Clone)]
pub struct AtomicFileSink {
    path: PathBuf,
}

impl AtomicFileSink {
    /// Create a sink for `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl OutputSink for AtomicFileSink {
    #[instrument(skip(self, contents), fields(path = %self.path.display(), bytes = contents.len()))]
    async fn write(&self, contents: &str) -> Result<(), ApplicationError> {
        let path = self.path.clone();
        let contents = contents.to_owned();

        tokio::task::spawn_blocking(move || write_atomic(&path, contents.as_bytes()))
            .await
            .map_err(|e| ApplicationError::Write(format!("write task failed: {e}")))?
            .map_err(|e| ApplicationError::Write(format!("{}: {e}", self.path.display())))?;

        debug!("Output written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
