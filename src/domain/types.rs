//! Shared domain enumerations aligned with persisted database enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// The kinds of item a module content entry can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_kind", rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    File,
    Image,
    Video,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Text,
        ContentKind::Image,
        ContentKind::Video,
        ContentKind::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::File => "file",
            ContentKind::Image => "image",
            ContentKind::Video => "video",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::File => "File",
            ContentKind::Image => "Image",
            ContentKind::Video => "Video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ContentKind::Text),
            "file" => Ok(ContentKind::File),
            "image" => Ok(ContentKind::Image),
            "video" => Ok(ContentKind::Video),
            _ => Err(DomainError::not_found("content kind")),
        }
    }
}
