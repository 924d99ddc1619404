//! Proptest generators for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use idseal_core::{CanonicalRecord, Field};
use proptest::prelude::*;

/// Generate a timestamp with second precision (the encoding's resolution).
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    // 1970-01-01 through 2100-01-01.
    (0i64..4_102_444_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

/// Generate an optional text value, including the absent case.
pub fn text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(".{0,32}")
}

/// Generate a finite decimal in a range the 6-decimal rendering can carry.
pub fn decimal() -> impl Strategy<Value = f64> {
    -1.0e9..1.0e9f64
}

/// Generate a single record field.
pub fn field() -> impl Strategy<Value = Field> {
    prop_oneof![
        any::<i32>().prop_map(Field::Integer32),
        timestamp().prop_map(Field::Timestamp),
        any::<i64>().prop_map(Field::LargeInteger),
        text().prop_map(Field::Text),
        decimal().prop_map(Field::Decimal),
    ]
}

/// Generate a non-empty record of up to `max_fields` fields.
pub fn record(max_fields: usize) -> impl Strategy<Value = CanonicalRecord> {
    prop::collection::vec(field(), 1..=max_fields).prop_map(CanonicalRecord::from_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use idseal_core::{decode_fields, RawValue, RecordEncoder};

    proptest! {
        #[test]
        fn encoding_is_deterministic(record in record(8)) {
            prop_assert_eq!(record.encode().unwrap(), record.encode().unwrap());
        }

        #[test]
        fn encoded_records_decode_with_same_arity(record in record(8)) {
            let bytes = record.encode().unwrap();
            let fields = decode_fields(&bytes).unwrap();
            prop_assert_eq!(fields.len(), record.len());
        }

        #[test]
        fn large_integers_render_as_digits(value in any::<i64>()) {
            let mut encoder = RecordEncoder::new();
            encoder.add_long(value);
            let fields = decode_fields(&encoder.finish().unwrap()).unwrap();
            prop_assert_eq!(fields, vec![RawValue::NumericString(value.to_string())]);
        }

        #[test]
        fn integers_survive_roundtrip(value in any::<i32>()) {
            let mut encoder = RecordEncoder::new();
            encoder.add_integer(value);
            let fields = decode_fields(&encoder.finish().unwrap()).unwrap();
            prop_assert_eq!(fields, vec![RawValue::Integer(value)]);
        }

        #[test]
        fn absent_text_equals_empty_text(front in prop::collection::vec(field(), 0..4)) {
            let mut absent = CanonicalRecord::from_fields(front.clone());
            absent.push(Field::Text(None));
            let mut empty = CanonicalRecord::from_fields(front);
            empty.push(Field::Text(Some(String::new())));
            prop_assert_eq!(absent.encode().unwrap(), empty.encode().unwrap());
        }
    }
}
