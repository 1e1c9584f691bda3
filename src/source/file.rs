//! Fonte que lê o payload de um arquivo JSON a cada fetch.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::PayloadSource;
use crate::{FreshcardError, FreshcardResult};

/// Lê um arquivo JSON escrito por outro processo.
///
/// Arquivo ausente ou vazio equivale a uma resposta sem dados.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            name: format!("file:{}", path.display()),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PayloadSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> FreshcardResult<Option<Value>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "payload file missing");
                return Ok(None);
            }
            Err(e) => return Err(FreshcardError::SourceFailed(self.name.clone(), e.to_string())),
        };

        if text.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&text)?;
        Ok(Some(value))
    }
}
