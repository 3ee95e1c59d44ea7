use std::collections::BTreeSet;

use super::metadata::{Frontmatter, MetadataValue};

/// Frontmatter keys that carry tags.
const TAG_KEYS: [&str; 2] = ["tags", "tag"];

/// Ensure a tag starts with `#`. Idempotent.
pub fn normalize_tag(tag: &str) -> String {
    let trimmed = tag.trim();
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{trimmed}")
    }
}

/// Collect the tag set of a document from its inline tags and the tag
/// properties of its frontmatter. Duplicates collapse after normalization.
pub fn collect_tags<'a, I>(inline: I, frontmatter: Option<&Frontmatter>) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tags: BTreeSet<String> = inline
        .into_iter()
        .filter(|t| !t.trim().trim_start_matches('#').is_empty())
        .map(normalize_tag)
        .collect();

    if let Some(frontmatter) = frontmatter {
        for key in TAG_KEYS {
            if let Some(value) = frontmatter.get(key) {
                push_property_tags(value, &mut tags);
            }
        }
    }

    tags
}

fn push_property_tags(value: &MetadataValue, tags: &mut BTreeSet<String>) {
    match value {
        MetadataValue::String(s) => {
            for part in s.split(|c: char| c == ',' || c.is_whitespace()) {
                if !part.trim_start_matches('#').is_empty() {
                    tags.insert(normalize_tag(part));
                }
            }
        }
        MetadataValue::List(items) => {
            for item in items {
                push_property_tags(item, tags);
            }
        }
        MetadataValue::Number(n) => {
            tags.insert(normalize_tag(&n.to_string()));
        }
        _ => {}
    }
}
