use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::MessageStorage;
use crate::domain::DomainError;

/// Key of the single slot holding the conversation log.
pub const STORAGE_KEY: &str = "second_brain_chat_history";

/// Stores the conversation log as one JSON file inside the data directory.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target,
/// so a crash mid-write never leaves a truncated log behind.
pub struct FileMessageStorage {
    path: PathBuf,
}

impl FileMessageStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_dir>/second_brain_chat_history.json`
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(format!("{STORAGE_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MessageStorage for FileMessageStorage {
    async fn read(&self) -> Result<Option<String>, DomainError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write(&self, value: &str) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!("Wrote {} bytes to {}", value.len(), self.path.display());
        Ok(())
    }
}
