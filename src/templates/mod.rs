//! HTML templates for the wiki.
//!
//! Two named templates make up the rendering contract:
//!
//! - `edit` - a form with a textarea holding the raw page body, posting to `/save/<title>`
//! - `view` - the link-expanded body plus the save/delete confirmation banners
//!
//! They are parsed once at startup and shared read-only afterwards. A parse
//! failure is fatal; a render failure fails only the request.

use std::path::Path;

use tera::{Context, Tera};

use crate::error::{Result, WikiError};
use crate::models::Page;

pub const EDIT_TEMPLATE: &str = "edit.html";
pub const VIEW_TEMPLATE: &str = "view.html";

/// Which of the two page templates to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    Edit,
    View,
}

impl PageTemplate {
    pub fn file_name(self) -> &'static str {
        match self {
            PageTemplate::Edit => EDIT_TEMPLATE,
            PageTemplate::View => VIEW_TEMPLATE,
        }
    }
}

pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Load `edit.html` and `view.html` from `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tera = Tera::default();
        tera.add_template_files(vec![
            (dir.join(EDIT_TEMPLATE), Some(EDIT_TEMPLATE)),
            (dir.join(VIEW_TEMPLATE), Some(VIEW_TEMPLATE)),
        ])
        .map_err(WikiError::Template)?;

        tracing::debug!(dir = %dir.display(), "Loaded templates");
        Ok(Self { tera })
    }

    /// Build from in-memory sources, e.g. substitute templates in tests.
    pub fn from_raw(edit: &str, view: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(EDIT_TEMPLATE, edit), (VIEW_TEMPLATE, view)])
            .map_err(WikiError::Template)?;
        Ok(Self { tera })
    }

    pub fn render(&self, template: PageTemplate, page: &Page) -> Result<String> {
        let context = Context::from_serialize(page.render_context()).map_err(WikiError::Render)?;
        self.tera
            .render(template.file_name(), &context)
            .map_err(WikiError::Render)
    }
}
