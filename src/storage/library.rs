//! JSON-file-backed book repository.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::domain::{Book, CatalogError, CatalogResult, SearchKey};

/// An ordered collection of books backed by one JSON document at a path.
///
/// A `Library` is a per-operation handle: it reloads from disk on
/// construction and is discarded when the operation completes. Every
/// mutation rewrites the whole backing file, so in-memory state and the
/// on-disk document stay synchronized.
pub struct Library {
    path: PathBuf,
    books: Vec<Book>,
}

impl Library {
    /// Loads the library at `path`. A missing file or a document that does
    /// not parse as a book array yields an empty library, not an error.
    pub fn load(path: impl Into<PathBuf>) -> Library {
        let path = path.into();
        let books = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Book>>(&contents) {
                Ok(books) => books,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "library file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };
        Library { path, books }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Every book as an exported record, in insertion order.
    pub fn list_all(&self) -> Vec<JsonValue> {
        self.books.iter().map(Book::to_record).collect()
    }

    /// Records matching ALL of the given (key, query) pairs. Match mode is
    /// decided per key: equality for `uuid`, substring for everything else.
    pub fn find_by(&self, criteria: &[(SearchKey, &str)]) -> Vec<JsonValue> {
        self.list_all()
            .into_iter()
            .filter(|record| criteria.iter().all(|(key, query)| key.matches(record, query)))
            .collect()
    }

    /// The first book with exactly this uuid.
    pub fn get_by_uuid(&self, uuid: &str) -> Option<&Book> {
        self.books.iter().find(|book| book.uuid == uuid)
    }

    /// Appends a book and persists the whole library.
    pub fn add(&mut self, book: Book) -> CatalogResult<()> {
        self.books.push(book);
        self.save()
    }

    /// Removes every entry with this uuid and persists. A miss is a no-op;
    /// the caller reports it from its own existence check.
    pub fn remove_by_uuid(&mut self, uuid: &str) -> CatalogResult<()> {
        self.books.retain(|book| book.uuid != uuid);
        self.save()
    }

    /// Applies a page update to the book with this uuid and persists.
    /// Same miss-is-a-no-op contract as `remove_by_uuid`.
    pub fn update_reading_status(&mut self, uuid: &str, page: u32) -> CatalogResult<()> {
        if let Some(book) = self.books.iter_mut().find(|book| book.uuid == uuid) {
            book.record_read_progress(page);
            self.save()?;
        }
        Ok(())
    }

    fn save(&self) -> CatalogResult<()> {
        let storage = |message: String| CatalogError::Storage {
            path: self.path.display().to_string(),
            message,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| storage(e.to_string()))?;
            }
        }

        let body =
            serde_json::to_string_pretty(&self.books).map_err(|e| storage(e.to_string()))?;
        fs::write(&self.path, body).map_err(|e| storage(e.to_string()))?;
        debug!(path = %self.path.display(), books = self.books.len(), "library persisted");
        Ok(())
    }
}
