//! The `Book` entity: immutable identity plus mutable reading progress.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::domain::error::{CatalogError, CatalogResult};

fn fresh_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// One catalog entry. Field order matches the persisted record layout;
/// `imageLink` keeps its camel-cased wire name for compatibility with the
/// existing data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Book {
    pub author: String,
    pub country: String,
    #[serde(rename = "imageLink")]
    pub image_link: String,
    pub language: String,
    pub link: String,
    pub pages: u32,
    pub title: String,
    pub year: i32,
    /// Generated at ingestion when absent; immutable afterwards.
    #[serde(default = "fresh_uuid")]
    pub uuid: String,
    #[serde(default)]
    pub last_read_page: u32,
    #[serde(default)]
    pub percentage_read: f64,
    /// Seconds since the Unix epoch, set by `record_read_progress`.
    #[serde(default)]
    pub last_read_date: Option<f64>,
}

impl Book {
    /// Decodes a book from a string-keyed record (e.g. one element of a
    /// library file). Missing required fields, non-numeric `pages`/`year`
    /// and unknown keys are validation failures.
    pub fn from_record(record: &JsonValue) -> CatalogResult<Book> {
        serde_json::from_value(record.clone())
            .map_err(|e| CatalogError::Validation(format!("Invalid book record: {e}")))
    }

    /// Exports every field as a flat record. Exact inverse of `from_record`.
    pub fn to_record(&self) -> JsonValue {
        serde_json::to_value(self).expect("a Book always serializes to a JSON object")
    }

    /// Sets the last-read page, recomputes the derived percentage and stamps
    /// the read date. Bounds against `pages` are the caller's job.
    pub fn record_read_progress(&mut self, page: u32) {
        self.last_read_page = page;
        self.percentage_read = if self.pages > 0 {
            f64::from(page) / f64::from(self.pages) * 100.0
        } else {
            0.0
        };
        // Millisecond precision keeps "latest read" ordering meaningful
        // when two updates land within the same second.
        self.last_read_date = Some(Utc::now().timestamp_millis() as f64 / 1000.0);
    }
}
