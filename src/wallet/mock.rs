//! Mock wallet provider for testing.
//!
//! Signs with a real Ed25519 key derived from a fixed seed, so produced
//! signatures genuinely verify. Failure modes (rejection, agent error,
//! held signing prompts) are scriptable per instance.

use crate::codec::{PublicKey, Signature};
use crate::wallet::traits::{WalletError, WalletProvider, WalletResult};
use async_trait::async_trait;
use ring::signature::{Ed25519KeyPair, KeyPair};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock signing agent for tests.
#[derive(Clone)]
pub struct MockWalletProvider {
    state: Arc<Mutex<MockState>>,
    /// Gate for held signing prompts; `release_signature` notifies.
    sign_gate: Arc<Notify>,
    seed: [u8; 32],
    public_key: PublicKey,
}

#[derive(Default)]
struct MockState {
    connected: bool,
    reject_connect: bool,
    reject_sign: bool,
    fail_sign: bool,
    fail_disconnect: bool,
    hold_signatures: bool,
    connect_count: u32,
    disconnect_count: u32,
    signed_messages: Vec<Vec<u8>>,
}

impl MockWalletProvider {
    /// Create a mock agent whose key is derived from the given seed.
    pub fn new(seed: [u8; 32]) -> Self {
        let keypair =
            Ed25519KeyPair::from_seed_unchecked(&seed).expect("valid 32-byte Ed25519 seed");
        let public_key = PublicKey::try_from_slice(keypair.public_key().as_ref())
            .expect("Ed25519 public key is 32 bytes");

        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            sign_gate: Arc::new(Notify::new()),
            seed,
            public_key,
        }
    }

    /// The agent's account key, readable regardless of connection state
    /// (for test assertions).
    pub fn account(&self) -> PublicKey {
        self.public_key
    }

    /// Script the next connect attempts to be declined.
    pub fn set_reject_connect(&self, reject: bool) {
        self.state.lock().unwrap().reject_connect = reject;
    }

    /// Script signing requests to be declined by the user.
    pub fn set_reject_sign(&self, reject: bool) {
        self.state.lock().unwrap().reject_sign = reject;
    }

    /// Script signing requests to fail with an agent error.
    pub fn set_fail_sign(&self, fail: bool) {
        self.state.lock().unwrap().fail_sign = fail;
    }

    /// Script agent-side disconnect to fail.
    pub fn set_fail_disconnect(&self, fail: bool) {
        self.state.lock().unwrap().fail_disconnect = fail;
    }

    /// Hold signing requests until [`release_signature`](Self::release_signature)
    /// is called, simulating an agent waiting on its confirmation dialog.
    pub fn hold_signatures(&self, hold: bool) {
        self.state.lock().unwrap().hold_signatures = hold;
    }

    /// Let one held signing request proceed.
    pub fn release_signature(&self) {
        self.sign_gate.notify_one();
    }

    /// Number of successful connects.
    pub fn connect_count(&self) -> u32 {
        self.state.lock().unwrap().connect_count
    }

    /// Number of disconnect calls received.
    pub fn disconnect_count(&self) -> u32 {
        self.state.lock().unwrap().disconnect_count
    }

    /// Messages the agent has signed, in order.
    pub fn signed_messages(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().signed_messages.clone()
    }

    /// Whether the agent currently considers itself connected.
    pub fn is_connected(&self) -> bool {
        self.state.lock().unwrap().connected
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    async fn connect(&self) -> WalletResult<PublicKey> {
        let mut state = self.state.lock().unwrap();
        if state.reject_connect {
            return Err(WalletError::ConnectRejected(
                "user declined connection".to_string(),
            ));
        }
        state.connected = true;
        state.connect_count += 1;
        Ok(self.public_key)
    }

    async fn disconnect(&self) -> WalletResult<()> {
        let mut state = self.state.lock().unwrap();
        state.connected = false;
        state.disconnect_count += 1;
        if state.fail_disconnect {
            return Err(WalletError::Disconnect("agent teardown failed".to_string()));
        }
        Ok(())
    }

    async fn sign_message(&self, message: &[u8]) -> WalletResult<Signature> {
        let held = {
            let state = self.state.lock().unwrap();
            if !state.connected {
                return Err(WalletError::NotConnected);
            }
            if state.reject_sign {
                return Err(WalletError::SigningRejected(
                    "user declined signature".to_string(),
                ));
            }
            if state.fail_sign {
                return Err(WalletError::SigningFailed("agent error".to_string()));
            }
            state.hold_signatures
        };

        // Simulate the unbounded wait on the agent's confirmation dialog.
        // The lock is not held across this await.
        if held {
            self.sign_gate.notified().await;
        }

        let keypair =
            Ed25519KeyPair::from_seed_unchecked(&self.seed).expect("valid 32-byte Ed25519 seed");
        let signature = Signature::try_from_slice(keypair.sign(message).as_ref())
            .expect("Ed25519 signature is 64 bytes");

        let mut state = self.state.lock().unwrap();
        state.signed_messages.push(message.to_vec());
        Ok(signature)
    }

    fn public_key(&self) -> Option<PublicKey> {
        let state = self.state.lock().unwrap();
        state.connected.then_some(self.public_key)
    }
}
