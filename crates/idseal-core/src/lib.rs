//! # idseal Core
//!
//! Deterministic encoding and signing primitives for identity records.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over in-memory buffers and key handles.
//!
//! ## Pipeline
//!
//! 1. Assemble a [`CanonicalRecord`] (or drive a [`RecordEncoder`] directly)
//!    and encode it to canonical DER bytes.
//! 2. Sign those bytes with [`SignatureEngine::sign`] using a private key
//!    obtained through [`KeyCodec`].
//! 3. A receiver re-derives the canonical bytes and calls
//!    [`SignatureEngine::verify`] with the counterpart public key.
//!
//! ## Determinism
//!
//! The same logical record always encodes to the same bytes, on every
//! platform; signatures over canonical bytes are therefore reproducible
//! and verifiable across implementations. See the [`canonical`] module.

pub mod canonical;
pub mod error;
pub mod keys;
pub mod record;
pub mod sign;

pub use canonical::{decode_fields, RawValue, RecordEncoder};
pub use error::Error;
pub use keys::{KeyAlgorithm, KeyCodec};
pub use record::{CanonicalRecord, Field};
pub use sign::{HashAlgorithm, SignatureAlgorithm, SignatureEngine};

// Key handles are the `rsa` crate's types; re-exported so downstream code
// does not need a direct dependency for the common path.
pub use rsa::{RsaPrivateKey, RsaPublicKey};
