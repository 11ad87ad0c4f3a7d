use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use kelola_resource::{extract::require_text, Validate, Violation};
use kelola_store::Record;

/// A teacher as kept in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Guru {
    pub id: i64,
    pub nama: String,
    /// Name of the class the teacher is assigned to. Not checked against stored kelas.
    pub kelas: String,
    /// National employee number (NIP)
    pub nip: String,
}

impl Record for Guru {
    type Key = i64;
    const COLLECTION: &'static str = "guru";

    fn key(&self) -> &i64 {
        &self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GuruDto {
    #[serde(default)]
    #[schema(read_only)]
    pub id: Option<i64>,
    pub nama: String,
    #[serde(default)]
    pub kelas: String,
    #[serde(default)]
    pub nip: String,
}

impl Validate for GuruDto {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        require_text(&mut violations, "nama", &self.nama);
        violations
    }
}
