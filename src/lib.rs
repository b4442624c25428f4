//! Attest - Wallet Ownership Attestation
//!
//! Authenticates a user's control of a cryptographic keypair held by an
//! external signing agent ("wallet") without the application ever touching
//! the private key.
//!
//! Key principles:
//! - Providers are detected, never assumed (host-environment inspection)
//! - One session, one provider, one outstanding operation at a time
//! - Verification is local and independent of the signing agent
//! - A stale completion never mutates a newer session

pub mod codec;
pub mod session;
pub mod verifier;
pub mod wallet;
