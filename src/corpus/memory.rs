use std::collections::HashMap;

use async_trait::async_trait;

use super::source::{CachedMetadata, ContentError, ContentSource, Corpus, FileStat};
use crate::types::identifiers::DocumentPath;

#[derive(Debug, Clone, Default)]
struct MemoryEntry {
    metadata: Option<CachedMetadata>,
    stat: Option<FileStat>,
    content: Option<String>,
}

/// An in-memory corpus. Enumeration follows insertion order; inserting an
/// existing path replaces its entry in place.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    order: Vec<DocumentPath>,
    entries: HashMap<DocumentPath, MemoryEntry>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document. `None` content makes every read of it fail.
    pub fn insert(
        &mut self,
        path: DocumentPath,
        metadata: Option<CachedMetadata>,
        stat: Option<FileStat>,
        content: Option<String>,
    ) {
        if !self.entries.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.entries.insert(
            path,
            MemoryEntry {
                metadata,
                stat,
                content,
            },
        );
    }

    pub fn remove(&mut self, path: &DocumentPath) -> bool {
        if self.entries.remove(path).is_none() {
            return false;
        }
        self.order.retain(|p| p != path);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[async_trait]
impl ContentSource for MemoryCorpus {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ContentError> {
        let entry = self
            .entries
            .get(path)
            .ok_or_else(|| ContentError::NotFound(path.to_string()))?;
        entry.content.clone().ok_or_else(|| ContentError::Unavailable {
            path: path.to_string(),
            reason: "no content stored".to_string(),
        })
    }
}

impl Corpus for MemoryCorpus {
    fn list_paths(&self) -> Vec<DocumentPath> {
        self.order.clone()
    }

    fn cached_metadata(&self, path: &DocumentPath) -> Option<CachedMetadata> {
        self.entries.get(path).and_then(|e| e.metadata.clone())
    }

    fn stat(&self, path: &DocumentPath) -> Option<FileStat> {
        self.entries.get(path).and_then(|e| e.stat)
    }
}
