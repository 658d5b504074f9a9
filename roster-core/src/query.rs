//! Query engine: derives the displayed list from a snapshot of records.
//!
//! Filtering always precedes sorting. Nothing here mutates its input; every
//! call returns a fresh, discardable vector.

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{Field, RosterError, StudentRecord};

/// Record attribute a list can be ordered by.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    FirstName,
    #[default]
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

impl SortKey {
    pub const ALL: [SortKey; 11] = [
        SortKey::Id,
        SortKey::FirstName,
        SortKey::LastName,
        SortKey::Email,
        SortKey::Grade,
        SortKey::Major,
        SortKey::EnrollmentDate,
        SortKey::Status,
        SortKey::Gender,
        SortKey::PhoneNumber,
        SortKey::Address,
    ];

    /// The draft field behind this key; `None` for the id.
    pub fn field(&self) -> Option<Field> {
        match self {
            SortKey::Id => None,
            SortKey::FirstName => Some(Field::FirstName),
            SortKey::LastName => Some(Field::LastName),
            SortKey::Email => Some(Field::Email),
            SortKey::Grade => Some(Field::Grade),
            SortKey::Major => Some(Field::Major),
            SortKey::EnrollmentDate => Some(Field::EnrollmentDate),
            SortKey::Status => Some(Field::Status),
            SortKey::Gender => Some(Field::Gender),
            SortKey::PhoneNumber => Some(Field::PhoneNumber),
            SortKey::Address => Some(Field::Address),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.field().map_or("id", |field| field.as_str())
    }

    /// Text form of this attribute on a record.
    pub fn text<'a>(&self, record: &'a StudentRecord) -> Cow<'a, str> {
        match self.field() {
            Some(field) => record.data.get(field),
            None => Cow::Borrowed(&record.id),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| RosterError::UnknownSortKey(s.to_string()))
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Active sort key and direction. Defaults to last name, ascending.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }

    /// Column-header click: same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.order = self.order.reversed();
        } else {
            self.key = key;
            self.order = SortOrder::Asc;
        }
    }
}

/// Search term plus sort spec; the full input of a derived view.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pub term: String,
    pub sort: SortSpec,
}

impl Query {
    pub fn apply(&self, records: &[StudentRecord]) -> Vec<StudentRecord> {
        let filtered = filter(records, &self.term);
        sort(&filtered, self.sort.key, self.sort.order)
    }
}

/// Case-insensitive substring search over first name, last name, email and major.
///
/// A blank term (after trimming) keeps every record.
pub fn filter(records: &[StudentRecord], term: &str) -> Vec<StudentRecord> {
    let term = term.trim();
    if term.is_empty() {
        return records.to_vec();
    }

    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| {
            let data = &record.data;
            [&data.first_name, &data.last_name, &data.email, &data.major]
                .into_iter()
                .any(|value| value.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// Stable sort by the lowercased text of `key`, in Unicode collation order.
///
/// Descending order reverses the comparison, so ties keep their input order
/// in both directions.
pub fn sort(records: &[StudentRecord], key: SortKey, order: SortOrder) -> Vec<StudentRecord> {
    let collator = TextCollator::new();
    let mut keyed: Vec<(String, &StudentRecord)> = records
        .iter()
        .map(|record| (key.text(record).to_lowercase(), record))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match order {
        SortOrder::Asc => collator.compare(a, b),
        SortOrder::Desc => collator.compare(b, a),
    });

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

/// Root-locale collator with default options: tertiary strength, spaces and
/// punctuation weighted (non-ignorable) and ordered before letters.
struct TextCollator {
    collator: Option<CollatorBorrowed<'static>>,
}

impl TextCollator {
    fn new() -> Self {
        let collator = match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Some(collator),
            Err(e) => {
                log::warn!("Collation data unavailable, sorting by code point: {e}");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}
