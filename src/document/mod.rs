pub mod document;
pub mod metadata;
pub mod tags;

pub use crate::types::identifiers::{DocumentPath, DocumentPathError, FolderPath};
pub use document::Document;
pub use metadata::{Frontmatter, MetadataValue};
pub use tags::{collect_tags, normalize_tag};
