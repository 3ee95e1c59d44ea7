pub mod memory;
pub mod source;

pub use memory::MemoryCorpus;
pub use source::{CachedMetadata, ContentError, ContentSource, Corpus, FileStat};
