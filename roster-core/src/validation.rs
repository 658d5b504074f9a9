//! Draft validation.
//!
//! Every check runs independently so a single pass reports all problems.
//! Failures are data (a field → message map), never errors.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::{Field, StudentDraft};

/// Unanchored: any `x@y.z` run of non-space characters inside the text passes.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Per-field validation messages. Empty means the draft is acceptable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a draft for missing required fields and a malformed email.
///
/// `gender` and `status` are always valid.
pub fn validate(draft: &StudentDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if is_blank(&draft.first_name) {
        errors.insert(Field::FirstName, "First name is required");
    }
    if is_blank(&draft.last_name) {
        errors.insert(Field::LastName, "Last name is required");
    }

    if is_blank(&draft.email) {
        errors.insert(Field::Email, "Email is required");
    } else if !EMAIL_PATTERN.is_match(&draft.email) {
        errors.insert(Field::Email, "Email is invalid");
    }

    if is_blank(&draft.phone_number) {
        errors.insert(Field::PhoneNumber, "Phone number is required");
    }
    if is_blank(&draft.major) {
        errors.insert(Field::Major, "Major is required");
    }
    if is_blank(&draft.grade) {
        errors.insert(Field::Grade, "Grade is required");
    }
    if is_blank(&draft.enrollment_date) {
        errors.insert(Field::EnrollmentDate, "Enrollment date is required");
    }
    if is_blank(&draft.address) {
        errors.insert(Field::Address, "Address is required");
    }

    errors
}
