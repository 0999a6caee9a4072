//! Common types, protocol definitions, and errors shared across `students-api` crates.

pub mod error;
pub mod protocol;
pub mod student;

pub use error::ServiceError;
pub use student::{NewStudent, Student};
