//! In-process signing agent.
//!
//! Holds an ephemeral Ed25519 key generated at construction and approves
//! every request without prompting. This is the agent the demo binary
//! injects into its host environment so the whole protocol — detection
//! included — runs end-to-end in one process.
//!
//! The private seed never leaves this module and is zeroized on drop.

use crate::codec::{PublicKey, Signature};
use crate::wallet::traits::{WalletError, WalletProvider, WalletResult};
use async_trait::async_trait;
use ring::rand::{SecureRandom, SystemRandom};
use ring::signature::{Ed25519KeyPair, KeyPair};
use std::sync::atomic::{AtomicBool, Ordering};
use zeroize::Zeroize;

/// Auto-approving signing agent with an ephemeral key.
pub struct LocalKeyAgent {
    seed: [u8; 32],
    public_key: PublicKey,
    connected: AtomicBool,
}

impl LocalKeyAgent {
    /// Generate a fresh agent with a random Ed25519 key.
    pub fn generate() -> Result<Self, WalletError> {
        let mut seed = [0u8; 32];
        SystemRandom::new()
            .fill(&mut seed)
            .map_err(|_| WalletError::SigningFailed("system RNG unavailable".to_string()))?;
        Ok(Self::from_seed(seed))
    }

    /// Build an agent from an explicit seed (tests).
    pub fn from_seed(seed: [u8; 32]) -> Self {
        let keypair =
            Ed25519KeyPair::from_seed_unchecked(&seed).expect("valid 32-byte Ed25519 seed");
        let public_key = PublicKey::try_from_slice(keypair.public_key().as_ref())
            .expect("Ed25519 public key is 32 bytes");

        Self {
            seed,
            public_key,
            connected: AtomicBool::new(false),
        }
    }

    /// The agent's account key.
    pub fn account(&self) -> PublicKey {
        self.public_key
    }
}

impl Drop for LocalKeyAgent {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

#[async_trait]
impl WalletProvider for LocalKeyAgent {
    async fn connect(&self) -> WalletResult<PublicKey> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.public_key)
    }

    async fn disconnect(&self) -> WalletResult<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_message(&self, message: &[u8]) -> WalletResult<Signature> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(WalletError::NotConnected);
        }

        let keypair =
            Ed25519KeyPair::from_seed_unchecked(&self.seed).expect("valid 32-byte Ed25519 seed");
        let signature = Signature::try_from_slice(keypair.sign(message).as_ref())
            .expect("Ed25519 signature is 64 bytes");
        Ok(signature)
    }

    fn public_key(&self) -> Option<PublicKey> {
        self.connected
            .load(Ordering::SeqCst)
            .then_some(self.public_key)
    }
}
