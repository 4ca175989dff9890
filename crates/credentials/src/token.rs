//! Opaque bearer-token generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;

use crate::DEFAULT_TOKEN_BYTES;

/// Issues opaque bearer-token values.
///
/// Tokens are unstructured strings with no decodable meaning; ownership
/// and validity live entirely in the store.
pub trait TokenIssuer: Send + Sync {
    /// Generates a fresh token value.
    fn issue(&self) -> String;
}

/// Issuer producing URL-safe base64 over cryptographically random bytes.
#[derive(Debug, Clone)]
pub struct OpaqueTokenIssuer {
    bytes: usize,
}

impl OpaqueTokenIssuer {
    /// Creates an issuer generating `bytes` random bytes per token.
    pub fn new(bytes: usize) -> Self {
        Self { bytes }
    }
}

impl Default for OpaqueTokenIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_BYTES)
    }
}

impl TokenIssuer for OpaqueTokenIssuer {
    fn issue(&self) -> String {
        let mut rng = rand::rng();
        let bytes: Vec<u8> = (0..self.bytes).map(|_| rng.random::<u8>()).collect();
        URL_SAFE_NO_PAD.encode(&bytes)
    }
}
