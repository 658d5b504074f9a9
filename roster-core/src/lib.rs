//! # roster-core — Student record model and pure list logic
//!
//! Everything in this crate is synchronous and side-effect free apart from
//! id generation. The async collection store lives in `roster-store`.
//!
//! ## Modules
//!
//! - [`validation`] — per-field draft validation
//! - [`id`] — record identifier generators
//! - [`query`] — search filter, field sort and sort toggling
//! - [`form`] — editable draft with touched-field tracking
//! - [`fixtures`] — the five-record demo roster

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod fixtures;
pub mod form;
pub mod id;
pub mod query;
pub mod validation;

pub use error::RosterError;
pub use fixtures::sample_students;
pub use form::DraftForm;
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use query::{filter, sort, Query, SortKey, SortOrder, SortSpec};
pub use validation::{validate, ValidationErrors};

/// Enrollment status of a student.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Active,
    Inactive,
    Graduated,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Active, Status::Inactive, Status::Graduated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
            Status::Graduated => "graduated",
        }
    }

    /// Capitalized badge text.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
            Status::Graduated => "Graduated",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidStatus(s.to_string()))
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RosterError::InvalidGender(s.to_string()))
    }
}

/// Editable fields of a student record (everything except the id).
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Grade,
    Major,
    EnrollmentDate,
    Status,
    Gender,
    PhoneNumber,
    Address,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Grade,
        Field::Major,
        Field::EnrollmentDate,
        Field::Status,
        Field::Gender,
        Field::PhoneNumber,
        Field::Address,
    ];

    /// camelCase name as used in JSON payloads and error maps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Grade => "grade",
            Field::Major => "major",
            Field::EnrollmentDate => "enrollmentDate",
            Field::Status => "status",
            Field::Gender => "gender",
            Field::PhoneNumber => "phoneNumber",
            Field::Address => "address",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RosterError::UnknownField(s.to_string()))
    }
}

/// A student's field set without an identifier. Input to create and update.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub grade: String,
    pub major: String,
    /// ISO `YYYY-MM-DD`
    pub enrollment_date: String,
    pub status: Status,
    pub gender: Gender,
    pub phone_number: String,
    pub address: String,
}

impl StudentDraft {
    /// Text form of a field; enum fields read as their lowercase name.
    pub fn get(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::FirstName => Cow::Borrowed(&self.first_name),
            Field::LastName => Cow::Borrowed(&self.last_name),
            Field::Email => Cow::Borrowed(&self.email),
            Field::Grade => Cow::Borrowed(&self.grade),
            Field::Major => Cow::Borrowed(&self.major),
            Field::EnrollmentDate => Cow::Borrowed(&self.enrollment_date),
            Field::Status => Cow::Borrowed(self.status.as_str()),
            Field::Gender => Cow::Borrowed(self.gender.as_str()),
            Field::PhoneNumber => Cow::Borrowed(&self.phone_number),
            Field::Address => Cow::Borrowed(&self.address),
        }
    }

    /// Set a field from text. Enum fields must parse.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> Result<(), RosterError> {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Email => self.email = value,
            Field::Grade => self.grade = value,
            Field::Major => self.major = value,
            Field::EnrollmentDate => self.enrollment_date = value,
            Field::Status => self.status = value.parse()?,
            Field::Gender => self.gender = value.parse()?,
            Field::PhoneNumber => self.phone_number = value,
            Field::Address => self.address = value,
        }
        Ok(())
    }

    /// Parse a draft from a JSON object with camelCase keys.
    pub fn from_json(json: &str) -> Result<Self, RosterError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// One enrolled student. The id is assigned on creation and never changes.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: String,
    #[serde(flatten)]
    pub data: StudentDraft,
}

impl StudentRecord {
    pub fn new(id: impl Into<String>, data: StudentDraft) -> Self {
        Self { id: id.into(), data }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.data.first_name, self.data.last_name)
    }
}
