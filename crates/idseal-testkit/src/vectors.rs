//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding and the content digests so that
//! any drift from the cross-implementation byte format shows up as a test
//! failure, not as an unverifiable signature in the field.

use chrono::TimeZone;
use chrono::Utc;
use idseal_core::{CanonicalRecord, Field, HashAlgorithm, SignatureEngine};

/// A golden canonical-encoding vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Record fields in declared order.
    pub fields: Vec<Field>,
    /// Expected canonical encoding, hex.
    pub expected_hex: &'static str,
}

/// Get all golden canonical-encoding vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "integer, text, and large integer",
            fields: vec![
                Field::Integer32(7),
                Field::Text(Some("alice".into())),
                Field::LargeInteger(123456789012345),
            ],
            expected_hex: "301b0201070c05616c696365120f313233343536373839303132333435",
        },
        GoldenVector {
            name: "zero integer",
            fields: vec![Field::Integer32(0)],
            expected_hex: "3003020100",
        },
        GoldenVector {
            name: "negative integer",
            fields: vec![Field::Integer32(-1)],
            expected_hex: "30030201ff",
        },
        GoldenVector {
            name: "decimal with epsilon bias",
            fields: vec![Field::Decimal(0.1)],
            expected_hex: "300a0c08302e313030303030",
        },
        GoldenVector {
            name: "generalized time",
            fields: vec![Field::Timestamp(
                Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap(),
            )],
            expected_hex: "3011180f32303236303131343132303030305a",
        },
        GoldenVector {
            name: "empty text",
            fields: vec![Field::Text(Some(String::new()))],
            expected_hex: "30020c00",
        },
        GoldenVector {
            name: "absent text encodes as empty text",
            fields: vec![Field::Text(None)],
            expected_hex: "30020c00",
        },
    ]
}

/// Encode the record a golden vector describes.
pub fn encode_vector(vector: &GoldenVector) -> Vec<u8> {
    CanonicalRecord::from_fields(vector.fields.clone())
        .encode()
        .expect("golden vector encodes")
}

/// Check every golden vector, returning the names of any that drifted.
pub fn verify_all_vectors() -> Result<(), Vec<&'static str>> {
    let failed: Vec<&'static str> = all_vectors()
        .iter()
        .filter(|v| hex::encode(encode_vector(v)) != v.expected_hex)
        .map(|v| v.name)
        .collect();
    if failed.is_empty() {
        Ok(())
    } else {
        Err(failed)
    }
}

/// A fixed content-digest vector.
#[derive(Debug, Clone, Copy)]
pub struct DigestVector {
    pub content: &'static [u8],
    pub algorithm: HashAlgorithm,
    /// Expected base64 digest.
    pub expected: &'static str,
}

/// Get all fixed digest vectors.
pub fn digest_vectors() -> Vec<DigestVector> {
    vec![
        DigestVector {
            content: b"hello",
            algorithm: HashAlgorithm::Sha256,
            expected: "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=",
        },
        DigestVector {
            content: b"hello",
            algorithm: HashAlgorithm::Md5,
            expected: "XUFAKrxLKna5cZ2REBfFkg==",
        },
        DigestVector {
            content: b"",
            algorithm: HashAlgorithm::Sha256,
            expected: "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use idseal_core::{decode_fields, RawValue};

    #[test]
    fn test_all_golden_vectors_hold() {
        verify_all_vectors().expect("golden vectors drifted");
    }

    #[test]
    fn test_golden_vectors_decode() {
        for vector in all_vectors() {
            let bytes = encode_vector(&vector);
            let fields = decode_fields(&bytes).unwrap_or_else(|e| {
                panic!("vector {:?} failed to decode: {e}", vector.name);
            });
            assert_eq!(fields.len(), vector.fields.len(), "{}", vector.name);
        }
    }

    #[test]
    fn test_decimal_vector_text() {
        let vector = &all_vectors()[3];
        let fields = decode_fields(&encode_vector(vector)).unwrap();
        assert_eq!(fields, vec![RawValue::Utf8String("0.100000".into())]);
    }

    #[test]
    fn test_digest_vectors_hold() {
        let engine = SignatureEngine::new();
        for vector in digest_vectors() {
            assert_eq!(
                engine.hash(vector.content, vector.algorithm),
                vector.expected,
                "digest vector for {:?}",
                vector.algorithm
            );
        }
    }
}
