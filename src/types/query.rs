use serde::{Deserialize, Serialize};

/// How a set of boolean outcomes is combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// A declarative query: groups combined by `global_operator`.
///
/// A query without groups matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
    #[serde(default)]
    pub global_operator: LogicalOperator,
}

impl FilterQuery {
    pub fn new(global_operator: LogicalOperator, groups: Vec<FilterGroup>) -> Self {
        Self {
            groups,
            global_operator,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Filters combined by a single operator. A group without filters matches
/// every document, whatever its operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub operator: LogicalOperator,
}

impl FilterGroup {
    pub fn new(operator: LogicalOperator, filters: Vec<Filter>) -> Self {
        Self { filters, operator }
    }

    pub fn all(filters: Vec<Filter>) -> Self {
        Self::new(LogicalOperator::And, filters)
    }

    pub fn any(filters: Vec<Filter>) -> Self {
        Self::new(LogicalOperator::Or, filters)
    }
}

/// A single predicate, optionally negated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default)]
    pub negate: bool,
    #[serde(flatten)]
    pub kind: FilterKind,
}

impl Filter {
    pub fn new(kind: impl Into<FilterKind>) -> Self {
        Self {
            negate: false,
            kind: kind.into(),
        }
    }

    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::new(TagFilter { tag: tag.into() })
    }

    pub fn folder(path: impl Into<String>, include_subfolders: bool) -> Self {
        Self::new(FolderFilter {
            path: path.into(),
            include_subfolders,
        })
    }

    pub fn file_name(pattern: impl Into<String>, is_regex: bool) -> Self {
        Self::new(FileNameFilter {
            pattern: pattern.into(),
            is_regex,
        })
    }

    pub fn text(query: impl Into<String>, search_mode: SearchMode, case_sensitive: bool) -> Self {
        Self::new(TextContentFilter {
            query: query.into(),
            search_mode,
            case_sensitive,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterKind {
    Tag(TagFilter),
    Frontmatter(FrontmatterFilter),
    Folder(FolderFilter),
    DateRange(DateRangeFilter),
    TextContent(TextContentFilter),
    FileName(FileNameFilter),
}

impl FilterKind {
    pub fn label(&self) -> &'static str {
        match self {
            FilterKind::Tag(_) => "tag",
            FilterKind::Frontmatter(_) => "frontmatter",
            FilterKind::Folder(_) => "folder",
            FilterKind::DateRange(_) => "dateRange",
            FilterKind::TextContent(_) => "textContent",
            FilterKind::FileName(_) => "fileName",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilter {
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontmatterOperator {
    Exists,
    NotExists,
    Equals,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontmatterFilter {
    pub property: String,
    pub operator: FrontmatterOperator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFilter {
    pub path: String,
    #[serde(default)]
    pub include_subfolders: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    Modified,
    Created,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateRangeType {
    LastNDays,
    Before,
    After,
    Custom,
}

/// Dates are kept as written and parsed at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeFilter {
    pub date_type: DateField,
    pub range_type: DateRangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl DateRangeFilter {
    pub fn last_n_days(date_type: DateField, days: i64) -> Self {
        Self {
            date_type,
            range_type: DateRangeType::LastNDays,
            days: Some(days),
            date: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Contains,
    Exact,
    Regex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContentFilter {
    pub query: String,
    pub search_mode: SearchMode,
    #[serde(default)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNameFilter {
    pub pattern: String,
    #[serde(default)]
    pub is_regex: bool,
}

macro_rules! impl_into_kind {
    ($($payload:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$payload> for FilterKind {
                fn from(value: $payload) -> Self {
                    FilterKind::$variant(value)
                }
            }
        )*
    };
}

impl_into_kind! {
    TagFilter => Tag,
    FrontmatterFilter => Frontmatter,
    FolderFilter => Folder,
    DateRangeFilter => DateRange,
    TextContentFilter => TextContent,
    FileNameFilter => FileName,
}
