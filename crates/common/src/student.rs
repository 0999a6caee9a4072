//! The student record as stored and returned by the service.

use serde::{Deserialize, Serialize};

/// A persisted student record.
///
/// `id` is assigned by the storage layer on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// The fields of a student that are ready to insert.
///
/// The service builds this from a request only after validation succeeds;
/// the type itself does not re-check the field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

impl NewStudent {
    /// Attach a storage-assigned id, producing the full record.
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
