//! Field-level validation of decoded request bodies.
//!
//! Every field is checked and all violations are returned together, in
//! field declaration order, so callers can report them in one response.

use std::fmt;

use common::{
    protocol::{join_messages, CreateStudentRequest, FieldError},
    NewStudent,
};
use validator::ValidateEmail;

/// The kind of constraint a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Field absent, `null`, or blank.
    Required,
    /// Field present but not a syntactically valid email address.
    Email,
    /// Numeric field not strictly greater than zero.
    Positive,
}

/// One failed constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub constraint: Constraint,
}

impl Violation {
    /// Human-readable reason suitable for returning to the caller.
    pub fn message(&self) -> String {
        match self.constraint {
            Constraint::Required => format!("{} is a required field", self.field),
            Constraint::Email => format!("{} must be a valid email address", self.field),
            Constraint::Positive => format!("{} must be greater than 0", self.field),
        }
    }
}

impl From<&Violation> for FieldError {
    fn from(v: &Violation) -> Self {
        FieldError::new(v.field, v.message())
    }
}

/// The ordered, non-empty set of violations for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn to_field_errors(&self) -> Vec<FieldError> {
        self.0.iter().map(FieldError::from).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_messages(&self.to_field_errors()))
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects violations while passing through the values that satisfied
/// their constraints.
#[derive(Debug, Default)]
struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn fail(&mut self, field: &'static str, constraint: Constraint) {
        self.violations.push(Violation { field, constraint });
    }

    fn required(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.fail(field, Constraint::Required);
                None
            }
        }
    }

    fn email(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = self.required(field, value)?;
        if value.validate_email() {
            Some(value)
        } else {
            self.fail(field, Constraint::Email);
            None
        }
    }

    fn positive(&mut self, field: &'static str, value: Option<i64>) -> Option<i64> {
        match value {
            None => {
                self.fail(field, Constraint::Required);
                None
            }
            Some(v) if v <= 0 => {
                self.fail(field, Constraint::Positive);
                None
            }
            Some(v) => Some(v),
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(v) if self.violations.is_empty() => Ok(v),
            _ => Err(ValidationErrors(self.violations)),
        }
    }
}

/// Validate a create request: `name` required, `email` required and well
/// formed, `age` required and positive.
///
/// # Errors
///
/// Returns every violated constraint, in the order name, email, age.
pub fn validate_new_student(req: CreateStudentRequest) -> Result<NewStudent, ValidationErrors> {
    let mut v = Validator::default();
    let name = v.required("name", req.name);
    let email = v.email("email", req.email);
    let age = v.positive("age", req.age);

    let student = match (name, email, age) {
        (Some(name), Some(email), Some(age)) => Some(NewStudent { name, email, age }),
        _ => None,
    };
    v.finish(student)
}
