use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A frontmatter property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Null,
    Bool(bool),
    Number(i64),
    Float(f64),
    String(String),
    List(Vec<MetadataValue>),
    Map(BTreeMap<String, MetadataValue>),
}

impl MetadataValue {
    /// String form used for `equals`/`contains` comparisons.
    ///
    /// Lists join their elements with `,`, whole floats drop the fraction and
    /// maps render as JSON.
    pub fn to_filter_string(&self) -> String {
        match self {
            MetadataValue::Null => "null".to_string(),
            MetadataValue::Bool(b) => b.to_string(),
            MetadataValue::Number(n) => n.to_string(),
            MetadataValue::Float(f) => js_number_string(*f),
            MetadataValue::String(s) => s.clone(),
            MetadataValue::List(items) => items
                .iter()
                .map(|item| match item {
                    // Nested null/empty entries render as empty strings inside a list.
                    MetadataValue::Null => String::new(),
                    other => other.to_filter_string(),
                })
                .collect::<Vec<_>>()
                .join(","),
            MetadataValue::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// JavaScript `Number.prototype.toString` form: `1e+21`, `1e-7`, `0` for
/// negative zero.
fn js_number_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    ryu_js::Buffer::new().format(value).to_string()
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::String(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::String(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        MetadataValue::Number(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        MetadataValue::Bool(value)
    }
}

/// Structured properties of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frontmatter {
    inner: BTreeMap<String, MetadataValue>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Frontmatter {
            inner: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetadataValue>) {
        self.inner.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.inner.get(key)
    }
}
