//! Error types for the idseal core.

use thiserror::Error;

/// Errors surfaced by encoding, key transport, and signing operations.
///
/// A signature that fails to verify is *not* an error; `verify` reports
/// that as `Ok(false)`. Error variants are reserved for operations that
/// could not run at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing mandatory value: {0}")]
    InvalidInput(&'static str),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("invalid transport text: {0}")]
    InvalidFormat(String),

    #[error("invalid {kind} key material: {detail}")]
    InvalidKeyMaterial { kind: &'static str, detail: String },

    #[error("key algorithm unavailable: {0}")]
    KeySetup(String),

    #[error("verification setup failed for {algorithm}: {detail}")]
    VerificationSetup { algorithm: String, detail: String },

    #[error("signing with {algorithm} failed: {detail}")]
    Signing { algorithm: String, detail: String },

    #[error("unknown digest algorithm: {0}")]
    Hashing(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let e = Error::Signing {
            algorithm: "SHA256WithRSA".into(),
            detail: "key too small".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("SHA256WithRSA"));
        assert!(msg.contains("key too small"));
    }

    #[test]
    fn test_invalid_input_names_field() {
        let e = Error::InvalidInput("date");
        assert_eq!(e.to_string(), "missing mandatory value: date");
    }
}
