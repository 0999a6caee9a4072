//! Persistence for student records.
//!
//! [`Storage`] is the only seam where backends vary. Handlers hold an
//! `Arc<dyn Storage>` and never see which implementation sits behind it.
//!
//! | `storage_path` | Backend |
//! |---|---|
//! | `:memory:` | [`MemoryStorage`] (lost on exit) |
//! | anything else | [`SqliteStorage`] at that path |

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use std::sync::Arc;

use async_trait::async_trait;
use common::Student;
use thiserror::Error;

use crate::config::Config;

/// `storage_path` value that selects the in-process backend.
pub const MEMORY_PATH: &str = ":memory:";

/// Errors produced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No record exists with the requested id.
    #[error("no student found with id {0}")]
    NotFound(i64),

    /// The database rejected or failed the query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The database file or its directory could not be prepared.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create and look up student records.
///
/// Implementations must be safe to share across request tasks; any locking
/// they need is internal.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert a student and return the newly assigned id (always positive).
    async fn create_student(&self, name: &str, email: &str, age: i64)
        -> Result<i64, StorageError>;

    /// Fetch a student by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if there is no such record.
    async fn get_student_by_id(&self, id: i64) -> Result<Student, StorageError>;
}

/// Open the backend selected by `cfg.storage_path`.
pub async fn open(cfg: &Config) -> Result<Arc<dyn Storage>, StorageError> {
    if cfg.storage_path == MEMORY_PATH {
        return Ok(Arc::new(MemoryStorage::new()));
    }
    Ok(Arc::new(SqliteStorage::new(&cfg.storage_path).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, HttpServer};

    fn cfg(storage_path: &str) -> Config {
        Config {
            env: Environment::Local,
            storage_path: storage_path.into(),
            http_server: HttpServer {
                addr: "127.0.0.1:0".into(),
            },
            log_level: "info".into(),
        }
    }

    #[tokio::test]
    async fn open_memory_backend() {
        let storage = open(&cfg(MEMORY_PATH)).await.unwrap();
        let id = storage
            .create_student("Alice", "alice@example.com", 20)
            .await
            .unwrap();
        assert_eq!(storage.get_student_by_id(id).await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn open_sqlite_backend_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("students.db");
        let storage = open(&cfg(path.to_str().unwrap())).await.unwrap();
        storage
            .create_student("Bob", "bob@example.com", 22)
            .await
            .unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn not_found_message_names_id() {
        assert_eq!(
            StorageError::NotFound(9).to_string(),
            "no student found with id 9"
        );
    }
}
