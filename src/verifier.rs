//! Detached Ed25519 signature verification.
//!
//! Pure functions over (message, signature, public key) byte triples.
//! Malformed input is a verification failure, not an exceptional condition:
//! wrong-length signatures or keys return `false`, never an error.

use crate::codec::{PublicKey, Signature, PUBLIC_KEY_LEN, SIGNATURE_LEN};
use ring::signature::{UnparsedPublicKey, ED25519};

/// Verify a detached Ed25519 signature over raw bytes.
///
/// Returns `false` when `signature` is not exactly 64 bytes or `public_key`
/// is not exactly 32 bytes, and for any signature not produced by the key's
/// corresponding private key. Deterministic and side-effect-free.
pub fn verify_detached(message: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    if signature.len() != SIGNATURE_LEN || public_key.len() != PUBLIC_KEY_LEN {
        return false;
    }

    UnparsedPublicKey::new(&ED25519, public_key)
        .verify(message, signature)
        .is_ok()
}

/// Typed variant of [`verify_detached`] for already length-checked inputs.
pub fn verify(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    verify_detached(message, signature.as_bytes(), public_key.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ring::signature::{Ed25519KeyPair, KeyPair};

    /// Deterministic test keypair from a 32-byte seed.
    fn keypair_from_seed(seed: &[u8; 32]) -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed_unchecked(seed).expect("valid 32-byte seed")
    }

    fn public_key_bytes(keypair: &Ed25519KeyPair) -> [u8; 32] {
        keypair
            .public_key()
            .as_ref()
            .try_into()
            .expect("Ed25519 public key is 32 bytes")
    }

    #[test]
    fn test_valid_signature_verifies() {
        let keypair = keypair_from_seed(&[7u8; 32]);
        let message = b"attest this";
        let sig = keypair.sign(message);

        assert!(verify_detached(
            message,
            sig.as_ref(),
            &public_key_bytes(&keypair)
        ));
    }

    #[test]
    fn test_wrong_key_rejects() {
        let signer = keypair_from_seed(&[7u8; 32]);
        let other = keypair_from_seed(&[8u8; 32]);
        let message = b"attest this";
        let sig = signer.sign(message);

        assert!(!verify_detached(
            message,
            sig.as_ref(),
            &public_key_bytes(&other)
        ));
    }

    #[test]
    fn test_wrong_message_rejects() {
        let keypair = keypair_from_seed(&[7u8; 32]);
        let sig = keypair.sign(b"attest this");

        assert!(!verify_detached(
            b"attest that",
            sig.as_ref(),
            &public_key_bytes(&keypair)
        ));
    }

    #[test]
    fn test_length_mismatch_is_false_not_panic() {
        let keypair = keypair_from_seed(&[7u8; 32]);
        let message = b"attest this";
        let sig = keypair.sign(message);
        let pk = public_key_bytes(&keypair);

        // Truncated / extended signature
        assert!(!verify_detached(message, &sig.as_ref()[..63], &pk));
        assert!(!verify_detached(message, &[0u8; 65], &pk));
        assert!(!verify_detached(message, &[], &pk));

        // Truncated / extended public key
        assert!(!verify_detached(message, sig.as_ref(), &pk[..31]));
        assert!(!verify_detached(message, sig.as_ref(), &[0u8; 33]));
        assert!(!verify_detached(message, sig.as_ref(), &[]));
    }

    #[test]
    fn test_verify_typed_matches_raw() {
        let keypair = keypair_from_seed(&[9u8; 32]);
        let message = b"typed";
        let sig = keypair.sign(message);

        let signature = Signature::try_from_slice(sig.as_ref()).unwrap();
        let public_key = PublicKey::from_bytes(public_key_bytes(&keypair));

        assert!(verify(message, &signature, &public_key));
        assert_eq!(
            verify(message, &signature, &public_key),
            verify_detached(message, sig.as_ref(), public_key.as_bytes())
        );
    }

    #[test]
    fn test_verify_is_deterministic() {
        let keypair = keypair_from_seed(&[3u8; 32]);
        let message = b"repeat";
        let sig = keypair.sign(message);
        let pk = public_key_bytes(&keypair);

        let first = verify_detached(message, sig.as_ref(), &pk);
        for _ in 0..16 {
            assert_eq!(first, verify_detached(message, sig.as_ref(), &pk));
        }
    }

    // Property: round trip — any message signed by a seed-derived key verifies
    proptest! {
        #[test]
        fn prop_sign_then_verify(message in proptest::collection::vec(any::<u8>(), 0..256), seed in any::<[u8; 32]>()) {
            let keypair = keypair_from_seed(&seed);
            let sig = keypair.sign(&message);

            prop_assert!(verify_detached(&message, sig.as_ref(), &public_key_bytes(&keypair)));
        }
    }

    // Property: flipping any single bit of the signature rejects
    proptest! {
        #[test]
        fn prop_signature_bit_flip_rejects(
            message in proptest::collection::vec(any::<u8>(), 0..256),
            seed in any::<[u8; 32]>(),
            bit in 0usize..512,
        ) {
            let keypair = keypair_from_seed(&seed);
            let sig = keypair.sign(&message);

            let mut mutated: Vec<u8> = sig.as_ref().to_vec();
            mutated[bit / 8] ^= 1 << (bit % 8);

            prop_assert!(!verify_detached(&message, &mutated, &public_key_bytes(&keypair)));
        }
    }

    // Property: flipping any single bit of the public key rejects
    proptest! {
        #[test]
        fn prop_public_key_bit_flip_rejects(
            message in proptest::collection::vec(any::<u8>(), 0..256),
            seed in any::<[u8; 32]>(),
            bit in 0usize..256,
        ) {
            let keypair = keypair_from_seed(&seed);
            let sig = keypair.sign(&message);

            let mut mutated = public_key_bytes(&keypair);
            mutated[bit / 8] ^= 1 << (bit % 8);

            prop_assert!(!verify_detached(&message, sig.as_ref(), &mutated));
        }
    }
}
