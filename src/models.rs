//! Data models for the wiki.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::borrow::Cow;

use crate::title::Title;

// ============================================================================
// Page
// ============================================================================

/// A single wiki page. Built fresh for every request; the file on disk is the
/// only source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: Title,
    /// Raw file contents, persisted verbatim.
    pub body: Vec<u8>,
    /// Body with `[Name]` links expanded, ready for HTML output.
    pub display_body: String,
    /// Last modification time of the backing file, if it was loaded from disk.
    pub modified: Option<DateTime<Utc>>,
    /// Set when the view follows a successful save.
    pub from_save: bool,
    /// Set when the view follows a successful delete.
    pub from_delete: bool,
}

impl Page {
    /// A page that does not exist on disk yet.
    pub fn new(title: Title) -> Self {
        Self::with_body(title, Vec::new())
    }

    pub fn with_body(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title,
            body: body.into(),
            display_body: String::new(),
            modified: None,
            from_save: false,
            from_delete: false,
        }
    }

    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn render_context(&self) -> PageContext<'_> {
        PageContext {
            title: self.title.as_str(),
            body: self.body_text(),
            display_body: &self.display_body,
            modified: self
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M UTC").to_string()),
            from_save: self.from_save,
            from_delete: self.from_delete,
        }
    }
}

/// What the `edit` and `view` templates get to see.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub body: Cow<'a, str>,
    pub display_body: &'a str,
    pub modified: Option<String>,
    pub from_save: bool,
    pub from_delete: bool,
}
