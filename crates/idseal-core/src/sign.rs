//! Signing, verification, and content hashing over byte payloads.
//!
//! The algorithm is an explicit parameter on every call; callers decide
//! security posture. MD5-based identifiers exist only so signatures on
//! legacy records can still be verified; never sign new content with them.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use md5::Md5;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::Error;

/// A (hash, signature) algorithm pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    /// SHA-256 digest, PKCS#1 v1.5 RSA signature.
    Sha256WithRsa,
    /// MD5 digest, PKCS#1 v1.5 RSA signature. Legacy verification only.
    Md5WithRsa,
}

impl SignatureAlgorithm {
    /// Look up an algorithm by its external name. Casing is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SHA256WithRSA" => Some(Self::Sha256WithRsa),
            "MD5withRSA" => Some(Self::Md5WithRsa),
            _ => None,
        }
    }

    /// The external algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256WithRsa => "SHA256WithRSA",
            Self::Md5WithRsa => "MD5withRSA",
        }
    }

    fn digest(self, payload: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256WithRsa => Sha256::digest(payload).to_vec(),
            Self::Md5WithRsa => Md5::digest(payload).to_vec(),
        }
    }

    fn padding(self) -> Pkcs1v15Sign {
        match self {
            Self::Sha256WithRsa => Pkcs1v15Sign::new::<Sha256>(),
            Self::Md5WithRsa => Pkcs1v15Sign::new::<Md5>(),
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hash-only algorithm for content digests without signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    Sha256,
    /// Legacy digests only.
    Md5,
}

impl HashAlgorithm {
    /// Look up an algorithm by its external name. Casing is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "SHA-256" => Some(Self::Sha256),
            "MD5" => Some(Self::Md5),
            _ => None,
        }
    }

    /// The external algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Md5 => "MD5",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces and verifies signatures and content hashes.
///
/// Stateless; an instance can be shared freely across threads. Key handles
/// are borrowed read-only for the duration of a call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureEngine;

impl SignatureEngine {
    pub fn new() -> Self {
        Self
    }

    /// Sign a payload, returning the signature as standard base64 text.
    ///
    /// PKCS#1 v1.5 RSA signing is deterministic per (payload, algorithm,
    /// key); do not assume this generalizes to future algorithms. Any
    /// cryptographic failure is [`Error::Signing`]; never a partial result.
    pub fn sign(
        &self,
        payload: &[u8],
        algorithm: SignatureAlgorithm,
        key: &RsaPrivateKey,
    ) -> Result<String, Error> {
        let digest = algorithm.digest(payload);
        match key.sign(algorithm.padding(), &digest) {
            Ok(signature) => Ok(BASE64.encode(signature)),
            Err(e) => {
                tracing::error!(
                    algorithm = algorithm.name(),
                    payload_len = payload.len(),
                    error = %e,
                    "signing failed"
                );
                Err(Error::Signing {
                    algorithm: algorithm.name().to_string(),
                    detail: e.to_string(),
                })
            }
        }
    }

    /// Check a base64 signature against a payload and public key.
    ///
    /// Returns `Ok(true)` iff the signature was produced by the matching
    /// private key over exactly this payload and algorithm. A wrong,
    /// tampered, or garbled signature is `Ok(false)`, never an error, so
    /// callers can distinguish "signature is wrong" from "verification
    /// could not run" (see [`SignatureEngine::verify_named`]).
    pub fn verify(
        &self,
        payload: &[u8],
        algorithm: SignatureAlgorithm,
        key: &RsaPublicKey,
        signature: &str,
    ) -> Result<bool, Error> {
        let signature = match BASE64.decode(signature) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(algorithm = algorithm.name(), error = %e, "signature is not valid base64");
                return Ok(false);
            }
        };
        let digest = algorithm.digest(payload);
        Ok(key.verify(algorithm.padding(), &digest, &signature).is_ok())
    }

    /// Compute a keyless content digest, returned as standard base64 text.
    pub fn hash(&self, content: &[u8], algorithm: HashAlgorithm) -> String {
        let digest = match algorithm {
            HashAlgorithm::Sha256 => Sha256::digest(content).to_vec(),
            HashAlgorithm::Md5 => Md5::digest(content).to_vec(),
        };
        BASE64.encode(digest)
    }

    /// [`SignatureEngine::sign`] keyed by an opaque external algorithm name.
    pub fn sign_named(
        &self,
        payload: &[u8],
        algorithm: &str,
        key: &RsaPrivateKey,
    ) -> Result<String, Error> {
        let alg = SignatureAlgorithm::from_name(algorithm).ok_or_else(|| Error::Signing {
            algorithm: algorithm.to_string(),
            detail: "unknown signature algorithm".to_string(),
        })?;
        self.sign(payload, alg, key)
    }

    /// [`SignatureEngine::verify`] keyed by an opaque external algorithm name.
    ///
    /// An unknown name is [`Error::VerificationSetup`], distinct from the
    /// `Ok(false)` mismatch result.
    pub fn verify_named(
        &self,
        payload: &[u8],
        algorithm: &str,
        key: &RsaPublicKey,
        signature: &str,
    ) -> Result<bool, Error> {
        let alg =
            SignatureAlgorithm::from_name(algorithm).ok_or_else(|| Error::VerificationSetup {
                algorithm: algorithm.to_string(),
                detail: "unknown signature algorithm".to_string(),
            })?;
        self.verify(payload, alg, key, signature)
    }

    /// [`SignatureEngine::hash`] keyed by an opaque external algorithm name.
    pub fn hash_named(&self, content: &[u8], algorithm: &str) -> Result<String, Error> {
        let alg = HashAlgorithm::from_name(algorithm)
            .ok_or_else(|| Error::Hashing(algorithm.to_string()))?;
        Ok(self.hash(content, alg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::OnceLock;

    fn keypair(which: u8) -> &'static (RsaPrivateKey, RsaPublicKey) {
        static KEYS: OnceLock<[(RsaPrivateKey, RsaPublicKey); 2]> = OnceLock::new();
        &KEYS.get_or_init(|| {
            let gen = |seed: u8| {
                let mut rng = StdRng::from_seed([seed; 32]);
                let private = RsaPrivateKey::new(&mut rng, 2048).expect("rsa generation");
                let public = RsaPublicKey::from(&private);
                (private, public)
            };
            [gen(0x01), gen(0x02)]
        })[which as usize]
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();
        let payload = b"identity record bytes";

        let signature = engine
            .sign(payload, SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        assert!(engine
            .verify(payload, SignatureAlgorithm::Sha256WithRsa, public, &signature)
            .unwrap());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let (private, _) = keypair(0);
        let engine = SignatureEngine::new();
        let s1 = engine
            .sign(b"payload", SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        let s2 = engine
            .sign(b"payload", SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_tampered_payload_rejected_as_false() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();
        let signature = engine
            .sign(b"payload", SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        // Single byte flipped.
        assert!(!engine
            .verify(b"payloae", SignatureAlgorithm::Sha256WithRsa, public, &signature)
            .unwrap());
    }

    #[test]
    fn test_wrong_key_rejected_as_false() {
        let (private, _) = keypair(0);
        let (_, other_public) = keypair(1);
        let engine = SignatureEngine::new();
        let signature = engine
            .sign(b"payload", SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        assert!(!engine
            .verify(b"payload", SignatureAlgorithm::Sha256WithRsa, other_public, &signature)
            .unwrap());
    }

    #[test]
    fn test_wrong_algorithm_rejected_as_false() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();
        let signature = engine
            .sign(b"payload", SignatureAlgorithm::Sha256WithRsa, private)
            .unwrap();
        assert!(!engine
            .verify(b"payload", SignatureAlgorithm::Md5WithRsa, public, &signature)
            .unwrap());
    }

    #[test]
    fn test_garbled_signature_text_is_false_not_error() {
        let (_, public) = keypair(0);
        let engine = SignatureEngine::new();
        assert!(!engine
            .verify(b"payload", SignatureAlgorithm::Sha256WithRsa, public, "!!not base64!!")
            .unwrap());
    }

    #[test]
    fn test_legacy_md5_roundtrip() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();
        let signature = engine
            .sign(b"legacy record", SignatureAlgorithm::Md5WithRsa, private)
            .unwrap();
        assert!(engine
            .verify(b"legacy record", SignatureAlgorithm::Md5WithRsa, public, &signature)
            .unwrap());
    }

    #[test]
    fn test_hash_stability() {
        let engine = SignatureEngine::new();
        assert_eq!(
            engine.hash(b"hello", HashAlgorithm::Sha256),
            "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ="
        );
        assert_eq!(
            engine.hash(b"hello", HashAlgorithm::Md5),
            "XUFAKrxLKna5cZ2REBfFkg=="
        );
    }

    #[test]
    fn test_algorithm_names_exact_casing() {
        assert_eq!(SignatureAlgorithm::Sha256WithRsa.name(), "SHA256WithRSA");
        assert_eq!(SignatureAlgorithm::Md5WithRsa.name(), "MD5withRSA");
        assert_eq!(HashAlgorithm::Sha256.name(), "SHA-256");
        assert_eq!(HashAlgorithm::Md5.name(), "MD5");

        // Lookup is exact; close-but-wrong casing does not resolve.
        assert!(SignatureAlgorithm::from_name("sha256withrsa").is_none());
        assert!(SignatureAlgorithm::from_name("MD5WithRSA").is_none());
        assert!(HashAlgorithm::from_name("sha-256").is_none());
        assert_eq!(
            SignatureAlgorithm::from_name("SHA256WithRSA"),
            Some(SignatureAlgorithm::Sha256WithRsa)
        );
    }

    #[test]
    fn test_named_entry_points_map_unknown_names() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();

        let err = engine.sign_named(b"p", "RSASSA-PSS", private).unwrap_err();
        assert!(matches!(err, Error::Signing { .. }));

        let err = engine.verify_named(b"p", "RSASSA-PSS", public, "sig").unwrap_err();
        assert!(matches!(err, Error::VerificationSetup { .. }));

        let err = engine.hash_named(b"p", "SHA-512").unwrap_err();
        assert!(matches!(err, Error::Hashing(_)));

        assert!(engine.hash_named(b"p", "SHA-256").is_ok());
    }

    #[test]
    fn test_named_roundtrip_with_opaque_strings() {
        let (private, public) = keypair(0);
        let engine = SignatureEngine::new();
        let signature = engine.sign_named(b"payload", "SHA256WithRSA", private).unwrap();
        assert!(engine
            .verify_named(b"payload", "SHA256WithRSA", public, &signature)
            .unwrap());
    }
}
