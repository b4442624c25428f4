//! Wallet provider trait abstraction.
//!
//! Every signing agent integration — injected browser-style agents, the
//! in-process key agent, test mocks — satisfies the same capability
//! contract: connect, sign a message, disconnect. The private key never
//! crosses this boundary; only the public key and detached signatures do.

use crate::codec::{PublicKey, Signature};
use async_trait::async_trait;

/// Result type for wallet provider operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Errors originating from a signing agent.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// User or agent declined the connection request.
    #[error("Connection rejected: {0}")]
    ConnectRejected(String),

    /// User or agent declined the signing request.
    #[error("Signing rejected: {0}")]
    SigningRejected(String),

    /// Agent errored while producing the signature.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Agent-side teardown failed.
    #[error("Disconnect failed: {0}")]
    Disconnect(String),

    /// Operation requires an established connection.
    #[error("Wallet not connected")]
    NotConnected,
}

/// Capability interface over a signing agent.
///
/// Operations are asynchronous and may suspend for an unbounded time while
/// the agent awaits human interaction (e.g. a confirmation dialog). The
/// controller is responsible for never racing two outstanding requests
/// against the same agent.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Establish a session with the agent. Returns the account public key.
    async fn connect(&self) -> WalletResult<PublicKey>;

    /// Tear down the agent-side session.
    async fn disconnect(&self) -> WalletResult<()>;

    /// Request a detached signature over the given message bytes.
    async fn sign_message(&self, message: &[u8]) -> WalletResult<Signature>;

    /// The account public key, present only once connected.
    fn public_key(&self) -> Option<PublicKey>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_error_display() {
        assert_eq!(
            format!("{}", WalletError::ConnectRejected("user closed dialog".to_string())),
            "Connection rejected: user closed dialog"
        );
        assert_eq!(
            format!("{}", WalletError::NotConnected),
            "Wallet not connected"
        );
        assert_eq!(
            format!("{}", WalletError::SigningFailed("internal".to_string())),
            "Signing failed: internal"
        );
    }
}
