#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use filter_core::corpus::{CachedMetadata, ContentError, ContentSource, Corpus, FileStat, MemoryCorpus};
use filter_core::document::{Document, DocumentPath, Frontmatter};

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - chrono::Duration::days(days)
}

pub fn path(s: &str) -> DocumentPath {
    DocumentPath::parse(s).unwrap()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Builder for a single corpus entry.
pub struct DocSpec {
    pub path: DocumentPath,
    pub inline_tags: Vec<String>,
    pub frontmatter: Option<Frontmatter>,
    pub stat: Option<FileStat>,
    pub content: Option<String>,
    pub with_metadata: bool,
}

impl DocSpec {
    pub fn new(p: &str) -> Self {
        Self {
            path: path(p),
            inline_tags: Vec::new(),
            frontmatter: None,
            stat: Some(FileStat {
                created_at: days_ago(30),
                modified_at: days_ago(3),
            }),
            content: Some(String::new()),
            with_metadata: true,
        }
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.inline_tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn frontmatter(mut self, fm: Frontmatter) -> Self {
        self.frontmatter = Some(fm);
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn unreadable(mut self) -> Self {
        self.content = None;
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        if let Some(stat) = self.stat.as_mut() {
            stat.created_at = at;
        }
        self
    }

    pub fn modified(mut self, at: DateTime<Utc>) -> Self {
        if let Some(stat) = self.stat.as_mut() {
            stat.modified_at = at;
        }
        self
    }

    pub fn no_stat(mut self) -> Self {
        self.stat = None;
        self
    }

    pub fn no_metadata(mut self) -> Self {
        self.with_metadata = false;
        self
    }

    fn metadata(&self) -> Option<CachedMetadata> {
        self.with_metadata.then(|| CachedMetadata {
            tags: self.inline_tags.clone(),
            frontmatter: self.frontmatter.clone(),
        })
    }

    pub fn document(&self) -> Document {
        Document::assemble(self.path.clone(), self.metadata(), self.stat)
    }
}

pub fn corpus(specs: Vec<DocSpec>) -> MemoryCorpus {
    let mut corpus = MemoryCorpus::new();
    for spec in specs {
        let metadata = spec.metadata();
        corpus.insert(spec.path, metadata, spec.stat, spec.content);
    }
    corpus
}

/// Wraps a corpus, counting content reads and the peak number of reads in
/// flight. Each read yields to the runtime for `delay`.
pub struct InstrumentedCorpus {
    inner: MemoryCorpus,
    delay: Duration,
    reads: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl InstrumentedCorpus {
    pub fn new(inner: MemoryCorpus, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            reads: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentSource for InstrumentedCorpus {
    async fn read_content(&self, path: &DocumentPath) -> Result<String, ContentError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let result = self.inner.read_content(path).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl Corpus for InstrumentedCorpus {
    fn list_paths(&self) -> Vec<DocumentPath> {
        self.inner.list_paths()
    }

    fn cached_metadata(&self, path: &DocumentPath) -> Option<CachedMetadata> {
        self.inner.cached_metadata(path)
    }

    fn stat(&self, path: &DocumentPath) -> Option<FileStat> {
        self.inner.stat(path)
    }
}
