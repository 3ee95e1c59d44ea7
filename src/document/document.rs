use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::metadata::Frontmatter;
use super::tags::collect_tags;
use crate::corpus::{CachedMetadata, FileStat};
use crate::types::identifiers::{DocumentPath, FolderPath};

/// Read-only snapshot of a document as seen by the filter engine.
///
/// Content is not part of the snapshot; it is read on demand through a
/// `ContentSource`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub path: DocumentPath,
    /// Normalized tags, each starting with `#`.
    pub tags: BTreeSet<String>,
    pub frontmatter: Option<Frontmatter>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl Document {
    /// Assemble a snapshot from what the corpus knows about a path.
    ///
    /// Missing metadata means no tags and no frontmatter; a missing stat
    /// leaves both timestamps unset.
    pub fn assemble(
        path: DocumentPath,
        metadata: Option<CachedMetadata>,
        stat: Option<FileStat>,
    ) -> Self {
        let (tags, frontmatter) = match metadata {
            Some(meta) => {
                let tags = collect_tags(
                    meta.tags.iter().map(String::as_str),
                    meta.frontmatter.as_ref(),
                );
                (tags, meta.frontmatter)
            }
            None => (BTreeSet::new(), None),
        };

        Document {
            path,
            tags,
            frontmatter,
            created_at: stat.map(|s| s.created_at),
            modified_at: stat.map(|s| s.modified_at),
        }
    }

    /// Base name without directory or extension.
    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn parent_folder(&self) -> FolderPath {
        self.path.parent()
    }

    /// Containing folder, `"/"` for the corpus root.
    pub fn parent_folder_path(&self) -> String {
        self.parent_folder().display_path().to_string()
    }

    pub fn has_tag(&self, normalized_tag: &str) -> bool {
        self.tags.contains(normalized_tag)
    }
}
