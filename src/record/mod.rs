//! Record Module
//!
//! Multi-field records and their serialized wire form.
//!
//! A record is a group of named byte-string fields stored as ONE value under
//! ONE key. The engines underneath only see opaque blobs; this module owns
//! the blob layout.
//!
//! ## Wire Blob Format
//! ```text
//! ┌──────────────┬───────────┬──────────────┬────────────┐
//! │ NameLen (4)  │   Name    │ ValueLen (4) │   Value    │
//! └──────────────┴───────────┴──────────────┴────────────┘
//! ... (repeated for each field, no trailing terminator)
//! ```
//!
//! Lengths are big-endian u32. There is no overall framing: the blob's end
//! is the end of the stored value, so consumers must know the total length
//! externally.

mod codec;

pub use codec::{deserialize, serialize, serialize_into};

use std::collections::HashSet;

use bytes::Bytes;

/// A named-field group stored as one value under one key
///
/// Field names are unique within a record. Insertion order is preserved for
/// iteration and serialization, but equality compares the name→value
/// mapping, not the order.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Bytes)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert a field, replacing any existing field with the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Bytes>) {
        let name = name.into();
        let value = value.into();

        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    /// Get a field value by name
    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Check whether a field exists
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl PartialEq for Record {
    /// Equality by name→value mapping; insertion order does not matter
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl Eq for Record {}

impl<N: Into<String>, V: Into<Bytes>> FromIterator<(N, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Selects which fields a read or scan materializes
#[derive(Debug, Clone)]
pub enum FieldFilter {
    /// Decode every field (the universal set)
    All,

    /// Decode only fields whose names are in the set (projection)
    Only(HashSet<String>),
}

impl FieldFilter {
    /// Build a projection filter from field names
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(names.into_iter().map(Into::into).collect())
    }

    /// Whether a field with this name should be materialized
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.contains(name),
        }
    }
}
