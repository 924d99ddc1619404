//! Identity record fields and the canonical record container.
//!
//! A [`CanonicalRecord`] is an ordered sequence of [`Field`]s. The order is
//! semantically significant: it is part of the signed payload and is never
//! reordered. Records are assembled by the caller and consumed once by
//! [`CanonicalRecord::encode`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::canonical::RecordEncoder;
use crate::error::Error;

/// A tagged field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    /// Fixed-width signed integer.
    Integer32(i32),
    /// Mandatory timestamp, encoded as GeneralizedTime.
    Timestamp(DateTime<Utc>),
    /// Identifier-class integer, encoded as its decimal digit string.
    LargeInteger(i64),
    /// Text; `None` encodes identically to the empty string.
    Text(Option<String>),
    /// Floating-point value, encoded as fixed 6-decimal text.
    Decimal(f64),
}

/// An ordered sequence of fields with a deterministic byte encoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanonicalRecord {
    fields: Vec<Field>,
}

impl CanonicalRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record from fields in their declared order.
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Append a field, preserving insertion order.
    pub fn push(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }

    /// The fields in declared order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields. Empty records do not encode.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Produce the canonical byte encoding of this record.
    ///
    /// Byte-identical for identical logical input across all invocations.
    /// Fails with [`Error::Encoding`] for an empty record.
    pub fn encode(&self) -> Result<Vec<u8>, Error> {
        let mut encoder = RecordEncoder::new();
        for field in &self.fields {
            match field {
                Field::Integer32(v) => encoder.add_integer(*v),
                Field::Timestamp(v) => encoder.add_date(Some(*v))?,
                Field::LargeInteger(v) => encoder.add_long(*v),
                Field::Text(v) => encoder.add_string(v.as_deref()),
                Field::Decimal(v) => encoder.add_double(*v),
            }
        }
        encoder.finish()
    }
}

impl From<Vec<Field>> for CanonicalRecord {
    fn from(fields: Vec<Field>) -> Self {
        Self::from_fields(fields)
    }
}
