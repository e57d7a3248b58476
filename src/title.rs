//! Page titles.
//!
//! A title is one or more ASCII alphanumeric characters. It is used verbatim
//! as the stem of the page's file name, so nothing else may get through.

use std::fmt;
use std::str::FromStr;

use crate::error::WikiError;

/// Title of the page `/` redirects to and `delete` lands on.
pub const FRONT_PAGE: &str = "FrontPage";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self, WikiError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(WikiError::InvalidPath(raw.to_string()))
        }
    }

    pub fn front_page() -> Self {
        Self(FRONT_PAGE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name backing this page, e.g. `FrontPage.txt`.
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl FromStr for Title {
    type Err = WikiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
