use std::{
    future::Future,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use crate::error::Result;

/// Append-only text storage for batch request files.
///
/// Paths are relative to whatever root the implementation manages.
pub trait FileStore: Send + Sync {
    /// Appends `contents` followed by a newline, creating the file if needed.
    fn append(&self, path: &Path, contents: &str) -> impl Future<Output = Result<()>> + Send;

    fn read_all(&self, path: &Path) -> impl Future<Output = Result<String>> + Send;

    /// Removing a file that does not exist is not an error.
    fn delete(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl FileStore for LocalFileStore {
    async fn append(&self, path: &Path, contents: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .await?;

        file.write_all(contents.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        Ok(())
    }

    async fn read_all(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(self.resolve(path)).await?)
    }

    async fn delete(&self, path: &Path) -> Result<()> {
        match fs::remove_file(self.resolve(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "Batch file already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
