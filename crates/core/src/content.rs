//! Vocabularies for stored pipeline artifacts.
//!
//! The database keeps these as `TEXT` columns guarded by CHECK constraints;
//! the enums here are the typed view used by the pipeline and the API layer.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Content status
// ---------------------------------------------------------------------------

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid `project_contents.status` values.
pub const VALID_CONTENT_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_COMPLETED];

/// Lifecycle of a single `project_contents` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Draft,
    Completed,
}

impl ContentStatus {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid content status '{s}'. Must be one of: {}",
                VALID_CONTENT_STATUSES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

// ---------------------------------------------------------------------------
// Initial data types
// ---------------------------------------------------------------------------

pub const DATA_TYPE_TEXT: &str = "text";
pub const DATA_TYPE_URL: &str = "url";
pub const DATA_TYPE_PDF: &str = "pdf";
pub const DATA_TYPE_IMAGE: &str = "image";
pub const DATA_TYPE_SCREENSHOT: &str = "screenshot";

/// All valid `initial_data.data_type` values.
pub const VALID_DATA_TYPES: &[&str] = &[
    DATA_TYPE_TEXT,
    DATA_TYPE_URL,
    DATA_TYPE_PDF,
    DATA_TYPE_IMAGE,
    DATA_TYPE_SCREENSHOT,
];

/// Maximum number of tags on a single initial data item.
pub const MAX_INITIAL_DATA_TAGS: usize = 20;

/// Kind of source material collected in stage 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Url,
    Pdf,
    Image,
    Screenshot,
}

impl DataType {
    pub fn from_str_value(s: &str) -> Result<Self, CoreError> {
        match s {
            DATA_TYPE_TEXT => Ok(Self::Text),
            DATA_TYPE_URL => Ok(Self::Url),
            DATA_TYPE_PDF => Ok(Self::Pdf),
            DATA_TYPE_IMAGE => Ok(Self::Image),
            DATA_TYPE_SCREENSHOT => Ok(Self::Screenshot),
            _ => Err(CoreError::Validation(format!(
                "Invalid data type '{s}'. Must be one of: {}",
                VALID_DATA_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => DATA_TYPE_TEXT,
            Self::Url => DATA_TYPE_URL,
            Self::Pdf => DATA_TYPE_PDF,
            Self::Image => DATA_TYPE_IMAGE,
            Self::Screenshot => DATA_TYPE_SCREENSHOT,
        }
    }

    /// Japanese label used inside prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "テキスト",
            Self::Url => "URL",
            Self::Pdf => "PDF",
            Self::Image => "画像",
            Self::Screenshot => "スクリーンショット",
        }
    }
}

/// Validate the type-specific fields of an initial data item.
///
/// A `url` item must carry a `source_url` that looks like an http(s) URL.
/// Tags are trimmed by the caller; here only their count and emptiness are
/// checked.
pub fn validate_initial_data(
    data_type: DataType,
    source_url: Option<&str>,
    tags: &[String],
) -> Result<(), CoreError> {
    if data_type == DataType::Url {
        let url = source_url.map(str::trim).unwrap_or_default();
        if url.is_empty() {
            return Err(CoreError::Validation(
                "source_url is required for url items".into(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Validation(format!(
                "source_url must start with http:// or https://, got '{url}'"
            )));
        }
    }

    if tags.len() > MAX_INITIAL_DATA_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_INITIAL_DATA_TAGS} tags are allowed"
        )));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation("Tags must not be empty".into()));
    }

    Ok(())
}
