use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Keys every imported record must carry. Timestamps are optional on import.
pub const REQUIRED_FIELDS: [&str; 6] = ["id", "title", "author", "pages", "tag", "dateAdded"];

/// The user-editable fields of a record, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Author,
    Pages,
    Tag,
    DateAdded,
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Title,
            Field::Author,
            Field::Pages,
            Field::Tag,
            Field::DateAdded,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Pages => "pages",
            Field::Tag => "tag",
            Field::DateAdded => "dateAdded",
        }
    }

    /// Fields the search engine tests when deciding whether a record is visible.
    pub fn searchable() -> &'static [Field] {
        &[Field::Title, Field::Author, Field::Tag]
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "author" => Ok(Field::Author),
            "pages" => Ok(Field::Pages),
            "tag" | "category" => Ok(Field::Tag),
            "date" | "dateadded" | "date-added" => Ok(Field::DateAdded),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// One catalog entry.
///
/// Serialized with the camelCase keys of the storage/import format. Timestamps
/// are optional so that hand-written seed files round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    pub author: String,
    pub pages: u32,
    pub tag: String,
    pub date_added: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Builds a fresh record from already-validated input, assigning id and timestamps.
    pub fn new(title: String, author: String, pages: u32, tag: String, date_added: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_record_id(),
            title,
            author,
            pages,
            tag,
            date_added,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Text of a displayed cell.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Title => self.title.clone(),
            Field::Author => self.author.clone(),
            Field::Pages => self.pages.to_string(),
            Field::Tag => self.tag.clone(),
            Field::DateAdded => self.date_added.clone(),
        }
    }

    /// Merges a partial update and bumps `updated_at`.
    pub fn apply(&mut self, patch: &RecordPatch, pages: Option<u32>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(pages) = pages {
            self.pages = pages;
        }
        if let Some(tag) = &patch.tag {
            self.tag = tag.clone();
        }
        if let Some(date) = &patch.date_added {
            self.date_added = date.clone();
        }
        self.touch();
    }

    fn touch(&mut self) {
        let now = Utc::now();
        // updated_at never precedes created_at, even with a skewed clock
        self.updated_at = Some(match self.created_at {
            Some(created) if created > now => created,
            _ => now,
        });
    }
}

pub fn new_record_id() -> String {
    format!("book_{}", Uuid::new_v4().simple())
}

pub fn today_string() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Raw user input for a new record. Pages stay textual until validated.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub tag: String,
    pub date_added: Option<String>,
}

/// A partial edit. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<String>,
    pub tag: Option<String>,
    pub date_added: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.pages.is_none()
            && self.tag.is_none()
            && self.date_added.is_none()
    }
}
