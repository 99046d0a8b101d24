//! Wire shapes for Notion pages, properties and blocks.
//!
//! Pages keep their property bag as raw JSON. Each property is decoded on
//! access, so one malformed property never fails the whole page.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A database row or standalone page.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub created_time: String,
    #[serde(default)]
    pub parent: Option<Parent>,
    #[serde(default)]
    pub cover: Option<FileObject>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub in_trash: bool,
}

/// Where a page lives. Only database parents matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parent {
    #[serde(default)]
    pub database_id: Option<String>,
}

/// One typed property value. Variants carry only the fields this service reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Date {
        #[serde(default)]
        date: Option<DateRange>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    Status {
        #[serde(default)]
        status: Option<SelectOption>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileObject>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub equation: Option<Equation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub code: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Equation {
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DateRange {
    pub start: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// A file reference. Notion sets exactly one of `external` / `file`; if both
/// are present the external one is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileObject {
    #[serde(default)]
    pub external: Option<FileUrl>,
    #[serde(default)]
    pub file: Option<FileUrl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileUrl {
    #[serde(default)]
    pub url: String,
}

impl FileObject {
    pub fn url(&self) -> Option<&str> {
        [self.external.as_ref(), self.file.as_ref()]
            .into_iter()
            .flatten()
            .map(|f| f.url.as_str())
            .find(|url| !url.is_empty())
    }
}

/// Joins all segments of a rich-text array into plain text.
pub fn plain_text(segments: &[RichText]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}

impl Page {
    /// Decodes the named property, or `None` if it is absent or malformed.
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.properties
            .get(name)
            .and_then(|v| PropertyValue::deserialize(v).ok())
    }

    /// Archived and trashed pages are still returned by a direct retrieve,
    /// but database queries leave them out.
    pub fn is_deleted(&self) -> bool {
        self.archived || self.in_trash
    }

    pub fn database_id(&self) -> Option<&str> {
        self.parent.as_ref()?.database_id.as_deref()
    }
}

/// A content block. The payload lives under a key named after the block type.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Union of the payload fields read across all rendered block types.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockContent {
    pub rich_text: Vec<RichText>,
    pub caption: Vec<RichText>,
    pub checked: bool,
    pub language: Option<String>,
    pub icon: Option<Icon>,
    pub url: Option<String>,
    pub expression: Option<String>,
    pub external: Option<FileUrl>,
    pub file: Option<FileUrl>,
    pub name: Option<String>,
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub emoji: Option<String>,
}

impl Block {
    /// Decodes the type-specific payload; a missing or odd payload yields defaults.
    pub fn content(&self) -> BlockContent {
        self.fields
            .get(&self.kind)
            .and_then(|v| BlockContent::deserialize(v).ok())
            .unwrap_or_default()
    }
}

impl BlockContent {
    /// URL of a media block (image, video, file, pdf, audio).
    pub fn media_url(&self) -> Option<&str> {
        [self.external.as_ref(), self.file.as_ref()]
            .into_iter()
            .flatten()
            .map(|f| f.url.as_str())
            .chain(self.url.as_deref())
            .find(|url| !url.is_empty())
    }
}

/// One page of a paginated list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Compares two Notion ids ignoring hyphens and case.
pub fn same_id(a: &str, b: &str) -> bool {
    let norm = |s: &str| {
        s.chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect::<String>()
    };
    norm(a) == norm(b)
}

/// True if `s` looks like a Notion id: 32 hex digits, hyphens allowed.
pub fn is_notion_id(s: &str) -> bool {
    let hex: Vec<char> = s.chars().filter(|c| *c != '-').collect();
    hex.len() == 32 && hex.iter().all(|c| c.is_ascii_hexdigit())
}
