//! Business rules over the global and user catalogs.
//!
//! Each operation is one validated transaction: construct fresh [`Library`]
//! instances from their paths, validate caller intent, delegate to storage,
//! and hand plain records back. Status-code selection and message rendering
//! belong to the transport layer.

use std::cmp::Ordering;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};
use tracing::info;

use crate::domain::{Book, CatalogError, CatalogResult, SearchKey};
use crate::storage::Library;

/// Exact key set a global-catalog ingestion record must carry — no more, no
/// fewer. `uuid` is deliberately absent: identity is minted at ingestion.
pub const REQUIRED_RECORD_KEYS: [&str; 11] = [
    "author",
    "country",
    "imageLink",
    "language",
    "link",
    "pages",
    "title",
    "year",
    "last_read_page",
    "percentage_read",
    "last_read_date",
];

/// Every book in the library at `library_path`, in file order.
pub fn list_books(library_path: &Path) -> Vec<JsonValue> {
    Library::load(library_path).list_all()
}

/// Books matching `value` under `key`. With a `target`, each match is
/// projected down to a single-entry `{target: value}` record; matches
/// lacking the target attribute are silently dropped.
pub fn find_book(
    key: &str,
    value: &str,
    library_path: &Path,
    target: Option<&str>,
) -> CatalogResult<Vec<JsonValue>> {
    let key = SearchKey::parse(key)?;
    let target = target.map(SearchKey::parse).transpose()?;

    let found = Library::load(library_path).find_by(&[(key, value)]);
    if found.is_empty() {
        return Err(CatalogError::NotFound(
            "No books found matching the criteria.".to_string(),
        ));
    }

    match target {
        None => Ok(found),
        Some(target) => Ok(found
            .iter()
            .filter_map(|record| target.value_in(record))
            .map(|value| {
                let mut projected = Map::new();
                projected.insert(target.as_str().to_string(), value.clone());
                JsonValue::Object(projected)
            })
            .collect()),
    }
}

/// Copies the book with `uuid` from the global catalog into the user
/// catalog. The uuid is carried over unchanged: the user-library entry is
/// the same logical book, not a new identity.
pub fn add_book_to_user(
    uuid: &str,
    global_path: &Path,
    user_path: &Path,
) -> CatalogResult<JsonValue> {
    let mut user = Library::load(user_path);
    if user.get_by_uuid(uuid).is_some() {
        return Err(CatalogError::Duplicate(
            "Book already exists in the user's library.".to_string(),
        ));
    }

    let global = Library::load(global_path);
    let record = global
        .get_by_uuid(uuid)
        .map(Book::to_record)
        .ok_or_else(|| {
            CatalogError::NotFound("Book not found in the global library.".to_string())
        })?;

    user.add(Book::from_record(&record)?)?;
    info!(%uuid, "book copied into user library");
    Ok(record)
}

/// Ingests a new book into the global catalog. The record must carry
/// exactly [`REQUIRED_RECORD_KEYS`]; a fresh uuid is generated.
pub fn add_book_to_global(record: &JsonValue, global_path: &Path) -> CatalogResult<JsonValue> {
    validate_record_shape(record)?;

    let book = Book::from_record(record)?;
    let added = book.to_record();
    Library::load(global_path).add(book)?;
    info!(uuid = added["uuid"].as_str().unwrap_or_default(), "book added to global catalog");
    Ok(added)
}

/// Removes the book with `uuid` from the user catalog and returns its
/// pre-removal record.
pub fn remove_book_from_user(uuid: &str, user_path: &Path) -> CatalogResult<JsonValue> {
    let mut user = Library::load(user_path);
    let removed = user
        .get_by_uuid(uuid)
        .map(Book::to_record)
        .ok_or_else(|| {
            CatalogError::NotFound("Book not found in the user library.".to_string())
        })?;

    user.remove_by_uuid(uuid)?;
    info!(%uuid, "book removed from user library");
    Ok(removed)
}

/// The book in the user catalog with the maximum value of `target`. Books
/// lacking the attribute rank below every present value; ties keep the
/// first occurrence.
pub fn find_top_book(user_path: &Path, target: &str) -> CatalogResult<JsonValue> {
    let target = SearchKey::parse(target)?;

    let records = Library::load(user_path).list_all();
    if records.is_empty() {
        return Err(CatalogError::NotFound(
            "No books in the user's library.".to_string(),
        ));
    }

    let mut best: Option<(&JsonValue, &JsonValue)> = None;
    for record in &records {
        let Some(value) = target.value_in(record) else {
            continue;
        };
        match best {
            None => best = Some((record, value)),
            Some((_, best_value)) => {
                let ordering = compare_attribute(value, best_value).ok_or_else(|| {
                    CatalogError::Validation(format!(
                        "Error finding the top book based on the attribute '{}'.",
                        target.as_str()
                    ))
                })?;
                if ordering == Ordering::Greater {
                    best = Some((record, value));
                }
            }
        }
    }

    best.map(|(record, _)| record.clone()).ok_or_else(|| {
        CatalogError::Validation(format!(
            "No books with the attribute '{}' found in the user's library.",
            target.as_str()
        ))
    })
}

/// Records that the user is now at `page_number` in the book with `uuid`,
/// then re-reads the library and verifies the write actually landed.
pub fn change_page(uuid: &str, page_number: i64, user_path: &Path) -> CatalogResult<JsonValue> {
    let page = u32::try_from(page_number).ok().filter(|page| *page > 0).ok_or_else(|| {
        CatalogError::Validation("Page number must be a positive integer.".to_string())
    })?;

    let mut user = Library::load(user_path);
    let total_pages = user.get_by_uuid(uuid).map(|book| book.pages).ok_or_else(|| {
        CatalogError::NotFound(
            "No book with the specified UUID exists in the user's library.".to_string(),
        )
    })?;

    if total_pages == 0 {
        return Err(CatalogError::Validation(
            "The book does not have a page count.".to_string(),
        ));
    }
    if page > total_pages {
        return Err(CatalogError::Validation(
            "Page number exceeds total pages of the book.".to_string(),
        ));
    }

    user.update_reading_status(uuid, page)?;

    // The persisted state decides whether the update took effect.
    let reloaded = Library::load(user_path);
    match reloaded.get_by_uuid(uuid) {
        Some(updated) if updated.last_read_page == page => {
            info!(%uuid, page, "reading progress updated");
            Ok(updated.to_record())
        }
        _ => Err(CatalogError::Update(format!(
            "Page update for book {uuid} failed."
        ))),
    }
}

/// `None` when the two attribute values cannot be ordered against each
/// other (mixed JSON types).
fn compare_attribute(a: &JsonValue, b: &JsonValue) -> Option<Ordering> {
    match (a, b) {
        (JsonValue::Number(a), JsonValue::Number(b)) => {
            a.as_f64()?.partial_cmp(&b.as_f64()?)
        }
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn validate_record_shape(record: &JsonValue) -> CatalogResult<()> {
    let object = record.as_object().ok_or_else(|| {
        CatalogError::Validation("Book payload must be a JSON object.".to_string())
    })?;

    let missing: Vec<&str> = REQUIRED_RECORD_KEYS
        .iter()
        .copied()
        .filter(|key| !object.contains_key(*key))
        .collect();
    let extra: Vec<&str> = object
        .keys()
        .map(String::as_str)
        .filter(|key| !REQUIRED_RECORD_KEYS.contains(key))
        .collect();

    if missing.is_empty() && extra.is_empty() {
        return Ok(());
    }

    let mut messages = Vec::new();
    if !missing.is_empty() {
        messages.push(format!("Missing keys: {}", missing.join(", ")));
    }
    if !extra.is_empty() {
        messages.push(format!("Extra keys: {}", extra.join(", ")));
    }
    Err(CatalogError::Validation(format!(
        "Invalid book payload. {}",
        messages.join(" ")
    )))
}
