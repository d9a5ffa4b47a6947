//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{ordering, types::ContentKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectRecord {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseRecord {
    pub id: Uuid,
    pub owner: String,
    pub subject_id: Uuid,
    pub subject_title: String,
    pub title: String,
    pub slug: String,
    pub overview: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub description: String,
    pub sort_order: i32,
}

impl ModuleRecord {
    /// Human-facing, 1-based position label.
    pub fn ordinal_label(&self) -> String {
        ordering::ordinal_label(self.sort_order)
    }

    pub fn display_name(&self) -> String {
        format!("{}. {}", self.sort_order, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItemRecord {
    pub id: Uuid,
    pub owner: String,
    pub kind: ContentKind,
    pub title: String,
    pub body: Option<String>,
    pub file_path: Option<String>,
    pub url: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: Uuid,
    pub module_id: Uuid,
    pub sort_order: i32,
    pub item: ContentItemRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload_text: Option<String>,
    pub created_at: OffsetDateTime,
}
