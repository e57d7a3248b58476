//! Inter-page link expansion.
//!
//! A `[Name]` token in a page body becomes `<a href="/view/Name">Name</a>`
//! when the page is displayed. Everything between tokens is HTML-escaped so
//! the result can be dropped into a template unescaped.

use regex::{Captures, Regex};

const LINK_PATTERN: &str = r"\[([a-zA-Z0-9]*)\]";

#[derive(Debug, Clone)]
pub struct LinkExpander {
    pattern: Regex,
}

impl LinkExpander {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(LINK_PATTERN).expect("link pattern is a valid regex"),
        }
    }

    /// Expand every `[Name]` token in `body` into an anchor to `/view/Name`.
    pub fn expand(&self, body: &str) -> String {
        let mut out = String::with_capacity(body.len());
        let mut last = 0;

        for caps in self.pattern.captures_iter(body) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&html_escape(&body[last..whole.start()]));
            out.push_str(&anchor(&caps));
            last = whole.end();
        }
        out.push_str(&html_escape(&body[last..]));

        out
    }
}

impl Default for LinkExpander {
    fn default() -> Self {
        Self::new()
    }
}

// Names are alphanumeric by construction, no escaping needed.
fn anchor(caps: &Captures<'_>) -> String {
    let name = &caps[1];
    format!(r#"<a href="/view/{name}">{name}</a>"#)
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
