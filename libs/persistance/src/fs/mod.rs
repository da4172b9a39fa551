pub mod config;
pub mod utils;

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use log::{debug, warn};
use models::{Draft, Page};
use thiserror::Error;
use tokio::fs;
use wikitext::{parse_meta, HeaderError, Note, TagsArray};

use crate::store::{PageStore, StoreError, WriteError};

const PAGE_EXTENSIONS: [&str; 2] = ["md", "txt"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not read wiki directory {0:?}")]
    ReadDir(PathBuf, #[source] io::Error),
    #[error("could not read page file {0:?}")]
    ReadFile(PathBuf, #[source] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Why a single page file was left out of the store.
#[derive(Debug)]
pub enum SkipReason {
    Header(HeaderError),
    Rejected(WriteError),
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<Page>,
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

/// Maps the `title`, `status` and `tags` header keys onto draft fields, the body becomes content.
pub fn draft_from_note(note: Note) -> Draft {
    let mut draft = Draft::default();
    draft.title = note.get("title").map(str::to_owned);
    draft.status = note.get("status").map(str::to_owned);
    draft.tags = note
        .get("tags")
        .map(|t| TagsArray::new(t).to_owned_vec())
        .unwrap_or_default();
    draft.content = Some(note.content);
    draft
}

fn is_page_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| PAGE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Reads every page file in `location` (sorted by file name) into the store.
///
/// Files with a broken header or fields that fail validation are skipped and reported, any io
/// or store failure stops the load.
pub async fn load_wiki<S: PageStore + ?Sized>(
    location: &Path,
    store: &S,
) -> Result<LoadReport, LoadError> {
    let mut entries = fs::read_dir(location)
        .await
        .map_err(|e| LoadError::ReadDir(location.to_owned(), e))?;
    let mut paths = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| LoadError::ReadDir(location.to_owned(), e))?
    {
        let path = entry.path();
        if !is_page_file(&path) {
            continue;
        }
        // follows symlinks, a linked page file still counts
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| LoadError::ReadFile(path.clone(), e))?;
        if metadata.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut report = LoadReport::default();
    for path in paths {
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|e| LoadError::ReadFile(path.clone(), e))?;
        let note = match parse_meta(raw.lines(), &path.to_string_lossy()) {
            Ok(note) => note,
            Err(e) => {
                warn!("skipping {:?}: {}", path, e);
                report.skipped.push((path, SkipReason::Header(e)));
                continue;
            }
        };
        match store.create(draft_from_note(note)).await {
            Ok(page) => {
                debug!("loaded {:?} as {}", path, page.url_title());
                report.loaded.push(page);
            }
            Err(WriteError::Store(e)) => return Err(LoadError::Store(e)),
            Err(e) => {
                warn!("skipping {:?}: {}", path, e);
                report.skipped.push((path, SkipReason::Rejected(e)));
            }
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::Predicate, MemoryStore};
    use models::{Field, Status};
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn write_note(dir: &Path, name: &str, header: &[(&str, &str)], body: &str) {
        let mut note = Note::default();
        for (key, value) in header {
            note.header.insert(key.to_string(), value.to_string());
        }
        note.content = body.to_owned();
        let raw: String = note.into();
        std_fs::write(dir.join(name), raw).unwrap();
    }

    #[tokio::test]
    async fn loads_page_files_into_the_store() {
        let dir = TempDir::new().unwrap();
        write_note(
            dir.path(),
            "a.md",
            &[("title", "tdd workshop"), ("tags", "[foo, bar]")],
            "# Heading\n\nbody",
        );
        write_note(
            dir.path(),
            "b.txt",
            &[("title", "closed page"), ("status", "closed"), ("tags", "foo tag1")],
            "text",
        );
        std_fs::write(dir.path().join("notes.json"), "{}").unwrap();

        let store = MemoryStore::new();
        let report = load_wiki(dir.path(), &store).await.unwrap();
        assert_eq!(report.loaded.len(), 2);
        assert!(report.skipped.is_empty());

        let first = &report.loaded[0];
        assert_eq!(first.url_title(), "tdd_workshop");
        assert_eq!(first.tags(), &["foo".to_string(), "bar".to_string()]);
        assert_eq!(first.content(), "# Heading\n\nbody");

        let closed = store
            .find_one(&Predicate::Status(Status::Closed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.tags(), &["foo".to_string(), "tag1".to_string()]);
    }

    #[tokio::test]
    async fn skips_invalid_files() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", &[("title", "ok")], "body");
        write_note(dir.path(), "b.md", &[("title", "bad"), ("status", "wrong")], "body");
        write_note(dir.path(), "c.md", &[("title", "ok")], "duplicate slug");
        std_fs::write(dir.path().join("d.md"), "no header here\n\nbody").unwrap();

        let store = MemoryStore::new();
        let report = load_wiki(dir.path(), &store).await.unwrap();
        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.skipped.len(), 3);
        match &report.skipped[0].1 {
            SkipReason::Rejected(WriteError::Invalid(errors)) => {
                assert!(errors.has(Field::Status))
            }
            other => panic!("unexpected skip reason {:?}", other),
        }
        match &report.skipped[1].1 {
            SkipReason::Rejected(WriteError::Invalid(errors)) => {
                assert!(errors.has(Field::UrlTitle))
            }
            other => panic!("unexpected skip reason {:?}", other),
        }
        assert!(matches!(report.skipped[2].1, SkipReason::Header(_)));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn ignores_directories_named_like_pages() {
        let dir = TempDir::new().unwrap();
        write_note(dir.path(), "a.md", &[("title", "ok")], "body");
        std_fs::create_dir(dir.path().join("drafts.md")).unwrap();

        let store = MemoryStore::new();
        let report = load_wiki(dir.path(), &store).await.unwrap();
        assert_eq!(report.loaded.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let err = load_wiki(&dir.path().join("nope"), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::ReadDir(_, _)));
    }

    #[test]
    fn converts_notes_to_drafts() {
        let note = parse_meta("title: a page\ntags: [x, y]\n\nbody".lines(), "raw_string").unwrap();
        let draft = draft_from_note(note);
        assert_eq!(draft.title.as_deref(), Some("a page"));
        assert_eq!(draft.tags, vec!["x", "y"]);
        assert_eq!(draft.status, None);
        assert_eq!(draft.content.as_deref(), Some("body"));
    }
}
