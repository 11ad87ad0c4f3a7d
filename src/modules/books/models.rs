use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use kelola_http::AppError;
use kelola_resource::{extract::require_text, PathKey, Validate, Violation};
use kelola_store::{Record, RecordKey};

/// Length of a book identifier, in characters.
pub const BOOK_ID_LEN: usize = 24;

/// Document-store style identifier: 24 lowercase hex characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl RecordKey for BookId {
    /// 4-byte timestamp, 5 random bytes, 3-byte counter.
    fn generate(sequence: u64) -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX))
            .unwrap_or_default();
        let random = Uuid::new_v4();
        let counter = (sequence & 0x00FF_FFFF) as u32;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&random.as_bytes()[..5]);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        BookId(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
    }
}

impl PathKey for BookId {
    /// Segments of any other length do not address a book at all, hence 404 rather than 400.
    fn from_path(segment: &str) -> Result<Self, AppError> {
        if segment.chars().count() != BOOK_ID_LEN {
            return Err(AppError::not_found(format!(
                "book id must be {} characters, got '{}'",
                BOOK_ID_LEN, segment
            )));
        }
        Ok(BookId(segment.to_string()))
    }

    fn schema() -> serde_json::Value {
        serde_json::json!({
            "type": "string",
            "minLength": BOOK_ID_LEN,
            "maxLength": BOOK_ID_LEN
        })
    }
}

/// A book as kept in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub author: String,
}

impl Record for Book {
    type Key = BookId;
    const COLLECTION: &'static str = "books";

    fn key(&self) -> &BookId {
        &self.id
    }

    fn set_key(&mut self, key: BookId) {
        self.id = key;
    }
}

/// Wire shape of a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    /// Assigned by the store; ignored in request bodies
    #[serde(default)]
    #[schema(value_type = Option<String>, read_only)]
    pub id: Option<BookId>,
    /// Title of the book
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
}

impl Validate for BookDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "name", &self.name);
        if self.price < 0.0 {
            violations.push(Violation::new("price", "must_not_be_negative"));
        }
        violations
    }
}
