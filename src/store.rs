//! Flat-file page storage.
//!
//! Each page lives in `<dir>/<title>.txt`. There is no cache and no locking:
//! every call goes straight to the filesystem, and concurrent writers to the
//! same title resolve however the OS resolves them.

use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, WikiError};
use crate::links::LinkExpander;
use crate::models::Page;
use crate::title::Title;

#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
    links: LinkExpander,
}

impl PageStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, links: LinkExpander) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, links })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.dir.join(title.file_name())
    }

    /// Load a page, expanding its links. `None` if the file is missing or unreadable.
    pub fn load(&self, title: &Title) -> Option<Page> {
        let path = self.path_for(title);
        let body = match fs::read(&path) {
            Ok(body) => body,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(title = %title, error = %e, "Failed to read page");
                }
                return None;
            }
        };

        let modified: Option<DateTime<Utc>> = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(Into::into);

        let display_body = self.links.expand(&String::from_utf8_lossy(&body));

        Some(Page {
            title: title.clone(),
            body,
            display_body,
            modified,
            from_save: false,
            from_delete: false,
        })
    }

    /// Whether anything occupies the page's file name. A directory there
    /// counts, so deleting it fails as an I/O error rather than a 404.
    pub fn exists(&self, title: &Title) -> bool {
        fs::symlink_metadata(self.path_for(title)).is_ok()
    }

    /// Write the page body verbatim, creating or truncating the file.
    /// New files are readable and writable by the owner only.
    pub fn save(&self, page: &Page) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(self.path_for(&page.title))?;
        file.write_all(&page.body)?;
        Ok(())
    }

    pub fn delete(&self, title: &Title) -> Result<()> {
        fs::remove_file(self.path_for(title)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WikiError::PageNotFound(title.to_string()),
            _ => WikiError::Io(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_store() -> (tempfile::TempDir, PageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::open(dir.path().join("data"), LinkExpander::new()).unwrap();
        (dir, store)
    }

    fn title(s: &str) -> Title {
        Title::parse(s).unwrap()
    }

    #[test]
    fn test_open_creates_directory() {
        let (_dir, store) = test_store();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_save_then_load_round_trips_body() {
        let (_dir, store) = test_store();
        for (name, body) in [
            ("FrontPage", "Hello [Other]"),
            ("Empty", ""),
            ("Multi", "line one\r\nline two\n\n[]"),
        ] {
            store.save(&Page::with_body(title(name), body)).unwrap();
            let page = store.load(&title(name)).unwrap();
            assert_eq!(page.body, body.as_bytes());
        }
    }

    #[test]
    fn test_save_writes_exact_bytes() {
        let (_dir, store) = test_store();
        store
            .save(&Page::with_body(title("FrontPage"), "Hello [Other]"))
            .unwrap();
        let on_disk = fs::read(store.dir().join("FrontPage.txt")).unwrap();
        assert_eq!(on_disk, b"Hello [Other]");
    }

    #[test]
    fn test_save_overwrites() {
        let (_dir, store) = test_store();
        store.save(&Page::with_body(title("A"), "a much longer body")).unwrap();
        store.save(&Page::with_body(title("A"), "short")).unwrap();
        assert_eq!(store.load(&title("A")).unwrap().body, b"short");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let (_dir, store) = test_store();
        store.save(&Page::with_body(title("Secret"), "x")).unwrap();
        let mode = fs::metadata(store.path_for(&title("Secret")))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_load_expands_links() {
        let (_dir, store) = test_store();
        store
            .save(&Page::with_body(title("FrontPage"), "Hello [Other]"))
            .unwrap();
        let page = store.load(&title("FrontPage")).unwrap();
        assert_eq!(page.display_body, r#"Hello <a href="/view/Other">Other</a>"#);
        assert!(page.modified.is_some());
    }

    #[test]
    fn test_load_missing_is_none() {
        let (_dir, store) = test_store();
        assert!(store.load(&title("Missing")).is_none());
        assert!(!store.exists(&title("Missing")));
    }

    #[test]
    fn test_delete_then_load_is_none() {
        let (_dir, store) = test_store();
        store.save(&Page::with_body(title("Gone"), "bye")).unwrap();
        assert!(store.exists(&title("Gone")));
        store.delete(&title("Gone")).unwrap();
        assert!(!store.exists(&title("Gone")));
        assert!(store.load(&title("Gone")).is_none());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, store) = test_store();
        assert!(matches!(
            store.delete(&title("Missing")),
            Err(WikiError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_delete_failure_is_io_error() {
        let (_dir, store) = test_store();
        fs::create_dir(store.path_for(&title("Stuck"))).unwrap();
        assert!(store.exists(&title("Stuck")));
        assert!(matches!(
            store.delete(&title("Stuck")),
            Err(WikiError::Io(_))
        ));
        assert!(store.path_for(&title("Stuck")).exists());
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let (_dir, store) = test_store();
        fs::remove_dir_all(store.dir()).unwrap();
        let err = store
            .save(&Page::with_body(title("Orphan"), "x"))
            .unwrap_err();
        assert!(matches!(err, WikiError::Io(_)));
    }
}
