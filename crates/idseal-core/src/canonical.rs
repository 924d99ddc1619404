//! Canonical DER encoding for deterministic serialization.
//!
//! This module implements a DER (tag, definite length, value) discipline:
//! - Minimal two's-complement INTEGER content
//! - Definite lengths only
//! - UTF8String / NumericString / GeneralizedTime primitive forms
//! - One outer constructed SEQUENCE wrapping the fields in declared order
//!
//! The canonical encoding is critical: it ensures that the same record
//! produces identical bytes (and thus identical signatures) across all
//! platforms and implementations.

use chrono::{DateTime, Utc};

use crate::error::Error;

/// DER universal tags used by record fields.
mod tags {
    pub const INTEGER: u8 = 0x02;
    pub const UTF8_STRING: u8 = 0x0C;
    pub const NUMERIC_STRING: u8 = 0x12;
    pub const GENERALIZED_TIME: u8 = 0x18;
    /// SEQUENCE with the constructed bit set.
    pub const SEQUENCE: u8 = 0x30;
}

/// Accumulating builder for one canonical record encoding.
///
/// Owned exclusively by a single builder until [`RecordEncoder::finish`]
/// consumes it. Field order is preserved verbatim; it is part of the
/// signed payload.
#[derive(Debug, Default)]
pub struct RecordEncoder {
    buf: Vec<u8>,
    fields: usize,
}

impl RecordEncoder {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields appended so far.
    pub fn field_count(&self) -> usize {
        self.fields
    }

    /// Append a fixed-width signed integer as a DER INTEGER.
    pub fn add_integer(&mut self, value: i32) {
        let content = integer_content(value);
        self.push_field(tags::INTEGER, &content);
    }

    /// Append a timestamp as GeneralizedTime (`YYYYMMDDHHMMSSZ`, UTC).
    ///
    /// The timestamp is mandatory: `None` fails with [`Error::InvalidInput`]
    /// rather than being skipped, so absent and present dates can never
    /// collide in the signed bytes.
    pub fn add_date(&mut self, date: Option<DateTime<Utc>>) -> Result<(), Error> {
        let date = date.ok_or(Error::InvalidInput("date"))?;
        let text = date.format("%Y%m%d%H%M%SZ").to_string();
        self.push_field(tags::GENERALIZED_TIME, text.as_bytes());
        Ok(())
    }

    /// Append a large integer as a NumericString of its base-10 digits.
    ///
    /// Identifier-class integers are kept as digit strings so dumped
    /// encodings stay human-auditable.
    pub fn add_long(&mut self, value: i64) {
        let text = value.to_string();
        self.push_field(tags::NUMERIC_STRING, text.as_bytes());
    }

    /// Append text as a UTF8String.
    ///
    /// An absent string encodes exactly as the empty string. Fields are
    /// never skipped based on emptiness; otherwise records differing only
    /// in absent-vs-empty representation would sign identically placed
    /// neighbours differently.
    pub fn add_string(&mut self, value: Option<&str>) {
        let text = value.unwrap_or("");
        self.push_field(tags::UTF8_STRING, text.as_bytes());
    }

    /// Append a floating-point value as fixed 6-decimal-place text.
    ///
    /// A bias of 1e-7 is added before formatting to neutralize binary
    /// representation error at the 6th decimal. Existing signatures depend
    /// on this exact behavior.
    pub fn add_double(&mut self, value: f64) {
        // The bias also moves every representable tie at the 6th decimal
        // (a dyadic such as 0.0078125) off the rounding boundary, so the
        // half-to-even behavior of `{:.6}` and the original's half-up
        // formatting cannot diverge.
        let text = format!("{:.6}", value + 0.0000001);
        self.push_field(tags::UTF8_STRING, text.as_bytes());
    }

    /// Consume the encoder, wrapping all fields in an outer SEQUENCE.
    ///
    /// Fails with [`Error::Encoding`] for a zero-field record.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        if self.fields == 0 {
            return Err(Error::Encoding("record has no fields".into()));
        }
        let mut out = Vec::with_capacity(self.buf.len() + 4);
        out.push(tags::SEQUENCE);
        write_len(&mut out, self.buf.len());
        out.extend_from_slice(&self.buf);
        Ok(out)
    }

    fn push_field(&mut self, tag: u8, content: &[u8]) {
        self.buf.push(tag);
        write_len(&mut self.buf, content.len());
        self.buf.extend_from_slice(content);
        self.fields += 1;
    }
}

/// Write a DER definite length.
fn write_len(buf: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        buf.push(len as u8);
    } else {
        let bytes = (len as u64).to_be_bytes();
        let skip = bytes.iter().take_while(|b| **b == 0).count();
        buf.push(0x80 | (8 - skip) as u8);
        buf.extend_from_slice(&bytes[skip..]);
    }
}

/// Minimal two's-complement content octets for a DER INTEGER.
fn integer_content(value: i32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < 3 {
        let redundant = (bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        start += 1;
    }
    bytes[start..].to_vec()
}

/// A primitive value read back from a canonical record encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// DER INTEGER.
    Integer(i32),
    /// GeneralizedTime text, e.g. `20260114120000Z`.
    GeneralizedTime(String),
    /// NumericString text (base-10 digits).
    NumericString(String),
    /// UTF8String text.
    Utf8String(String),
}

/// Decode the fields of a canonical record encoding.
///
/// Accepts exactly one outer SEQUENCE containing the primitive forms
/// emitted by [`RecordEncoder`]. Used for cross-implementation checks and
/// golden-vector tests; record semantics (which UTF8String was a decimal)
/// are the caller's schema to apply.
pub fn decode_fields(bytes: &[u8]) -> Result<Vec<RawValue>, Error> {
    let (tag, content, rest) = read_tlv(bytes)?;
    if tag != tags::SEQUENCE {
        return Err(Error::InvalidFormat(format!(
            "expected sequence tag 0x30, got 0x{tag:02x}"
        )));
    }
    if !rest.is_empty() {
        return Err(Error::InvalidFormat("trailing bytes after sequence".into()));
    }

    let mut fields = Vec::new();
    let mut remaining = content;
    while !remaining.is_empty() {
        let (tag, content, rest) = read_tlv(remaining)?;
        fields.push(decode_primitive(tag, content)?);
        remaining = rest;
    }
    Ok(fields)
}

fn decode_primitive(tag: u8, content: &[u8]) -> Result<RawValue, Error> {
    match tag {
        tags::INTEGER => {
            if content.is_empty() || content.len() > 4 {
                return Err(Error::InvalidFormat(format!(
                    "integer content of {} bytes",
                    content.len()
                )));
            }
            // Sign-extend the minimal content back to 4 bytes.
            let fill = if content[0] & 0x80 != 0 { 0xFF } else { 0x00 };
            let mut bytes = [fill; 4];
            bytes[4 - content.len()..].copy_from_slice(content);
            Ok(RawValue::Integer(i32::from_be_bytes(bytes)))
        }
        tags::GENERALIZED_TIME => Ok(RawValue::GeneralizedTime(utf8(content)?)),
        tags::NUMERIC_STRING => Ok(RawValue::NumericString(utf8(content)?)),
        tags::UTF8_STRING => Ok(RawValue::Utf8String(utf8(content)?)),
        other => Err(Error::InvalidFormat(format!(
            "unsupported field tag 0x{other:02x}"
        ))),
    }
}

fn utf8(content: &[u8]) -> Result<String, Error> {
    String::from_utf8(content.to_vec())
        .map_err(|e| Error::InvalidFormat(format!("invalid utf-8 in field: {e}")))
}

/// Read one tag-length-value, returning (tag, content, rest).
fn read_tlv(bytes: &[u8]) -> Result<(u8, &[u8], &[u8]), Error> {
    let (&tag, rest) = bytes
        .split_first()
        .ok_or_else(|| Error::InvalidFormat("truncated field tag".into()))?;
    let (&first, mut rest) = rest
        .split_first()
        .ok_or_else(|| Error::InvalidFormat("truncated field length".into()))?;

    let len = if first < 0x80 {
        first as usize
    } else {
        let count = (first & 0x7F) as usize;
        if count == 0 || count > 8 || rest.len() < count {
            return Err(Error::InvalidFormat("invalid definite length".into()));
        }
        let mut len = 0usize;
        for &b in &rest[..count] {
            len = len
                .checked_mul(256)
                .and_then(|l| l.checked_add(b as usize))
                .ok_or_else(|| Error::InvalidFormat("length overflow".into()))?;
        }
        rest = &rest[count..];
        len
    };

    if rest.len() < len {
        return Err(Error::InvalidFormat(format!(
            "field length {len} exceeds remaining {} bytes",
            rest.len()
        )));
    }
    Ok((tag, &rest[..len], &rest[len..]))
}
