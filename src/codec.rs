//! Message encoding and signature byte identities.
//!
//! Defines the exact bytes that get signed and verified:
//! - `encode_message` produces the canonical byte sequence for a text challenge
//! - `PublicKey` / `Signature` are fixed-length opaque byte identities
//!
//! Signatures are opaque: there is no decode operation. Verification consumes
//! raw bytes directly (see `verifier`).

use std::fmt;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 detached signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// Encode a text challenge into the canonical byte sequence that is signed.
///
/// Deterministic UTF-8 encoding: no normalization, no length limit. The same
/// text always produces bit-identical output.
pub fn encode_message(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// A 32-byte Ed25519 public key identifying a wallet account.
///
/// Immutable once obtained from a provider. Comparison is byte-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Create from a fixed-length byte array.
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, returning `None` on length mismatch.
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; PUBLIC_KEY_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Short display form: first and last four hex characters.
    pub fn truncated(&self) -> String {
        let full = hex::encode(self.0);
        format!("{}..{}", &full[..4], &full[full.len() - 4..])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A 64-byte Ed25519 detached signature.
///
/// Opaque: not a message, not decodable. Only meaningful as input to
/// detached verification together with the exact message bytes that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Create from a fixed-length byte array.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, returning `None` on length mismatch.
    pub fn try_from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; SIGNATURE_LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
