//! [`MemoryStorage`]: in-process backend keyed by id.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use common::Student;
use tokio::sync::RwLock;

use super::{Storage, StorageError};

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    students: BTreeMap<i64, Student>,
}

/// Thread-safe in-memory store.
///
/// Ids start at 1 and increase monotonically, mirroring SQLite's
/// `AUTOINCREMENT`. Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    /// Create a new, empty [`MemoryStorage`].
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_student(
        &self,
        name: &str,
        email: &str,
        age: i64,
    ) -> Result<i64, StorageError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.students.insert(
            id,
            Student {
                id,
                name: name.to_owned(),
                email: email.to_owned(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StorageError> {
        self.inner
            .read()
            .await
            .students
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }
}
