// Collaborator seams: the engine reads the corpus, it never writes it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::{Document, Frontmatter};
use crate::types::identifiers::DocumentPath;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Content unavailable for {path}: {reason}")]
    Unavailable { path: String, reason: String },
}

/// Cached metadata for one document: inline tags as written and the parsed
/// frontmatter, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub frontmatter: Option<Frontmatter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// On-demand document content. Reads may be slow or fail.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ContentError>;
}

/// The document corpus and its metadata store.
///
/// `list_paths` fixes the enumeration order; the engine preserves it.
pub trait Corpus: ContentSource {
    fn list_paths(&self) -> Vec<DocumentPath>;

    /// Synchronous metadata lookup. `None` means no tags and no frontmatter.
    fn cached_metadata(&self, path: &DocumentPath) -> Option<CachedMetadata>;

    fn stat(&self, path: &DocumentPath) -> Option<FileStat>;

    /// Snapshot every document in corpus order.
    fn list_documents(&self) -> Vec<Document> {
        self.list_paths()
            .into_iter()
            .map(|path| {
                let metadata = self.cached_metadata(&path);
                let stat = self.stat(&path);
                Document::assemble(path, metadata, stat)
            })
            .collect()
    }
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ContentError> {
        (**self).read_content(path).await
    }
}

impl<T: Corpus + ?Sized> Corpus for Arc<T> {
    fn list_paths(&self) -> Vec<DocumentPath> {
        (**self).list_paths()
    }

    fn cached_metadata(&self, path: &DocumentPath) -> Option<CachedMetadata> {
        (**self).cached_metadata(path)
    }

    fn stat(&self, path: &DocumentPath) -> Option<FileStat> {
        (**self).stat(path)
    }

    fn list_documents(&self) -> Vec<Document> {
        (**self).list_documents()
    }
}
