//! Editable draft with touched-field tracking.
//!
//! Errors for a field become visible only once that field has been edited or
//! blurred, or after a submit attempt (which touches every field).

use std::collections::HashSet;

use crate::validation::{validate, ValidationErrors};
use crate::{Field, Gender, RosterError, Status, StudentDraft, StudentRecord};

/// Blank draft for a new student: enrolled today (UTC), active, gender `other`.
pub fn empty_draft() -> StudentDraft {
    StudentDraft {
        enrollment_date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        status: Status::Active,
        gender: Gender::Other,
        ..StudentDraft::default()
    }
}

#[derive(Debug, Clone)]
pub struct DraftForm {
    draft: StudentDraft,
    errors: ValidationErrors,
    touched: HashSet<Field>,
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DraftForm {
    pub fn new() -> Self {
        Self::from_draft(empty_draft())
    }

    /// Start from an existing record's fields.
    pub fn edit(record: &StudentRecord) -> Self {
        Self::from_draft(record.data.clone())
    }

    /// Start from an arbitrary draft, e.g. one parsed from JSON.
    pub fn from_draft(draft: StudentDraft) -> Self {
        Self {
            draft,
            errors: ValidationErrors::default(),
            touched: HashSet::new(),
        }
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), RosterError> {
        self.draft.set(field, value)?;
        self.touched.insert(field);
        Ok(())
    }

    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        self.errors = validate(&self.draft);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Validate and touch every field. Returns the draft when it is acceptable.
    pub fn submit(&mut self) -> Result<StudentDraft, ValidationErrors> {
        self.errors = validate(&self.draft);
        self.touched.extend(Field::ALL);

        if self.errors.is_valid() {
            Ok(self.draft.clone())
        } else {
            log::debug!("Draft rejected: {}", self.errors);
            Err(self.errors.clone())
        }
    }

    /// Last computed errors, restricted to touched fields.
    pub fn visible_errors(&self) -> Vec<(Field, &'static str)> {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
            .collect()
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
