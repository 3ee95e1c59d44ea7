use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Corpus-relative path of a document, e.g. `Notes/2024/Draft.md`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentPathError {
    #[error("Document path is empty")]
    Empty,
    #[error("Document path names a folder: {0}")]
    Folder(String),
    #[error("Source path is outside the corpus root")]
    OutsideRoot,
    #[error("Path involves invalid UTF-8")]
    InvalidUtf8,
}

impl DocumentPath {
    pub fn parse(raw: &str) -> Result<Self, DocumentPathError> {
        if raw.ends_with('/') || raw.ends_with('\\') {
            return Err(DocumentPathError::Folder(raw.to_string()));
        }
        let normalized = normalize_separators(raw);
        if normalized.is_empty() {
            return Err(DocumentPathError::Empty);
        }
        Ok(DocumentPath(normalized))
    }

    /// Create a DocumentPath from a filesystem path below the corpus root.
    pub fn from_path(root: &Path, source: &Path) -> Result<Self, DocumentPathError> {
        let rel = source
            .strip_prefix(root)
            .map_err(|_| DocumentPathError::OutsideRoot)?;
        let s = rel.to_str().ok_or(DocumentPathError::InvalidUtf8)?;
        Self::parse(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name including extension.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Base name without directory or extension.
    pub fn name(&self) -> &str {
        let file_name = self.file_name();
        match file_name.rfind('.') {
            Some(idx) if idx > 0 => &file_name[..idx],
            _ => file_name,
        }
    }

    /// Immediate containing folder; the root is `FolderPath::root()`.
    pub fn parent(&self) -> FolderPath {
        match self.0.rfind('/') {
            Some(idx) => FolderPath(self.0[..idx].to_string()),
            None => FolderPath::root(),
        }
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = DocumentPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DocumentPath::parse(&value)
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized folder path. The corpus root is the empty string, so `"/"`,
/// `""` and `"./"` all name the same folder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FolderPath(String);

impl FolderPath {
    pub fn root() -> Self {
        FolderPath(String::new())
    }

    pub fn new(raw: &str) -> Self {
        let normalized = normalize_separators(raw);
        FolderPath(normalized.trim_end_matches('/').to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw prefix for subtree matching. Only the leading `/` and `./` are
    /// dropped, so `"Notes/"` keeps its trailing separator and `"/"` is the
    /// root (empty prefix).
    pub fn subtree_prefix(raw: &str) -> String {
        normalize_separators(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form: `"/"` for the root, otherwise the relative path.
    pub fn display_path(&self) -> &str {
        if self.is_root() {
            "/"
        } else {
            &self.0
        }
    }
}

fn normalize_separators(raw: &str) -> String {
    let replaced = raw.trim().replace('\\', "/");
    let mut rest = replaced.as_str();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
        } else {
            break;
        }
    }
    if rest == "." {
        rest = "";
    }
    rest.to_string()
}
