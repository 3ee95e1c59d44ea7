//! Fail-closed filter query evaluation over a corpus of notes.
//!
//! `filter-core` decides whether a document matches a declarative query made
//! of grouped, negatable predicates (tag, frontmatter, folder, date range,
//! text content, file name) combined by a two-level AND/OR structure, and
//! enumerates the matching documents of a corpus in corpus order.
//!
//! Evaluation never fails: an unreadable document, an invalid pattern or a
//! missing date resolves to "does not match" for that predicate. Evaluation
//! time is an explicit input, so results are reproducible for a fixed `now`.

pub mod config;
pub mod corpus;
pub mod document;
pub mod filter;
pub mod types;

pub use config::{ConfigError, EvaluatorConfig, FolderMatch};
pub use corpus::{CachedMetadata, ContentError, ContentSource, Corpus, FileStat, MemoryCorpus};
pub use document::{Document, Frontmatter, MetadataValue};
pub use filter::{PredicateEvaluator, QueryEvaluator};
pub use types::{Filter, FilterGroup, FilterQuery, LogicalOperator};
