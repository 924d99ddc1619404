//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: a keypair plus ready-made
//! codec and engine instances.

use idseal_core::{
    CanonicalRecord, Field, KeyCodec, RsaPrivateKey, RsaPublicKey, SignatureAlgorithm,
    SignatureEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// RSA modulus size used for test keys.
pub const TEST_KEY_BITS: usize = 2048;

/// A test fixture with an RSA keypair, key codec, and signature engine.
pub struct TestFixture {
    pub codec: KeyCodec,
    pub engine: SignatureEngine,
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl TestFixture {
    /// Create a fixture with a random keypair.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, TEST_KEY_BITS).expect("rsa generation");
        Self::from_private(private)
    }

    /// Create with a deterministic keypair from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        let mut rng = StdRng::from_seed(seed);
        let private = RsaPrivateKey::new(&mut rng, TEST_KEY_BITS).expect("rsa generation");
        Self::from_private(private)
    }

    fn from_private(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        Self {
            codec: KeyCodec::default(),
            engine: SignatureEngine::new(),
            private,
            public,
        }
    }

    /// The fixture's private key handle.
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    /// The fixture's public key handle.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// A small identity record with one field of each common kind.
    pub fn make_record(&self) -> CanonicalRecord {
        CanonicalRecord::from_fields(vec![
            Field::Integer32(7),
            Field::Text(Some("alice".into())),
            Field::LargeInteger(123456789012345),
        ])
    }

    /// Encode a record and sign its canonical bytes.
    ///
    /// Returns the canonical bytes alongside the base64 signature.
    pub fn sign_record(
        &self,
        record: &CanonicalRecord,
        algorithm: SignatureAlgorithm,
    ) -> (Vec<u8>, String) {
        let bytes = record.encode().expect("record encodes");
        let signature = self
            .engine
            .sign(&bytes, algorithm, &self.private)
            .expect("record signs");
        (bytes, signature)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple fixtures with distinct deterministic keys.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xA5;
            TestFixture::with_seed(seed)
        })
        .collect()
}
