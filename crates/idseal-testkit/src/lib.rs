//! # idseal Testkit
//!
//! Testing utilities for idseal.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: known records with pinned canonical encodings and
//!   fixed digest outputs for cross-platform verification
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: helper structs for setting up signing scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors ensure deterministic canonicalization across
//! implementations:
//!
//! ```rust
//! use idseal_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().expect("canonical encoding drifted");
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use idseal_testkit::generators::record;
//!
//! proptest! {
//!     #[test]
//!     fn canonical_bytes_are_stable(record in record(8)) {
//!         prop_assert_eq!(record.encode().unwrap(), record.encode().unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up signing scenarios (key generation takes a moment):
//!
//! ```rust,no_run
//! use idseal_core::SignatureAlgorithm;
//! use idseal_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let record = fixture.make_record();
//! let (bytes, signature) = fixture.sign_record(&record, SignatureAlgorithm::Sha256WithRsa);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::{field, record};
pub use vectors::{all_vectors, digest_vectors, encode_vector, verify_all_vectors, GoldenVector};
