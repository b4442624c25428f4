//! Session controller: connect → sign → verify → disconnect.
//!
//! Owns the single active wallet session and mediates every call into the
//! selected provider. Provider operations suspend for unbounded time (the
//! agent may be waiting on human interaction), so the controller:
//!
//! - allows exactly one provider operation in flight at a time
//! - never holds its state lock across an `.await`
//! - stamps each operation with the session generation, so a completion
//!   arriving after a disconnect is recognized as stale and discarded
//!   instead of mutating a newer (or absent) session

use crate::codec::{encode_message, PublicKey, Signature};
use crate::verifier;
use crate::wallet::host::HostEnvironment;
use crate::wallet::registry::{Detection, IntegrationDescriptor, ProviderRegistry};
use crate::wallet::traits::{WalletError, WalletProvider};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Session controller errors.
///
/// Agent-originated failures keep the underlying [`WalletError`] as source.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No matching agent detected. Recoverable: redirect the user to the
    /// install URL.
    #[error("No {name} agent detected; install from {install_url}")]
    ProviderUnavailable { name: String, install_url: String },

    /// The requested name is not a known integration.
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),

    /// User or agent declined the connection. Recoverable: re-offer connect.
    #[error("Connection rejected")]
    ConnectRejected(#[source] WalletError),

    /// User or agent declined to sign. Session remains connected.
    #[error("Signing rejected")]
    SigningRejected(#[source] WalletError),

    /// Agent errored while signing. Session remains connected.
    #[error("Signing failed")]
    SigningFailed(#[source] WalletError),

    /// Operation requires an active session.
    #[error("No active session")]
    NotConnected,

    /// `sign` requires a pending message.
    #[error("No pending message to sign")]
    NothingToSign,

    /// `sign` requires a non-empty pending message.
    #[error("Pending message is empty")]
    EmptyMessage,

    /// `verify` requires a captured signature.
    #[error("No signature to verify")]
    NothingToVerify,

    /// Another provider operation is outstanding.
    #[error("Another wallet operation is in flight")]
    OperationInFlight,
}

/// Controller state machine phases.
///
/// `Verified` loops back to allow re-signing; any phase with a live session
/// may drop to `Disconnected` via `disconnect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
    SigningRequested,
    Signed,
    Verifying,
    Verified,
}

/// Tri-state verification outcome.
///
/// `Unknown` means "not yet checked" — distinct from a definite
/// cryptographic `Invalid`. Absent signature always means `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verification {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

/// The live association with one connected provider.
struct Session {
    provider: Arc<dyn WalletProvider>,
    account: PublicKey,
    last_message: Option<Vec<u8>>,
    last_signature: Option<Signature>,
    verified: Verification,
}

impl Session {
    /// Fresh session: no signing artifacts, verification unknown.
    fn new(provider: Arc<dyn WalletProvider>, account: PublicKey) -> Self {
        Self {
            provider,
            account,
            last_message: None,
            last_signature: None,
            verified: Verification::Unknown,
        }
    }
}

struct ControllerState {
    phase: SessionPhase,
    session: Option<Session>,
    pending_message: Option<String>,
    /// Bumped on every session teardown and creation. An async completion
    /// whose captured generation no longer matches is stale and discarded.
    generation: u64,
    /// Exactly one provider operation may be outstanding at a time.
    in_flight: bool,
}

/// Orchestrates the signing protocol over a detected provider.
pub struct SessionController<E: HostEnvironment> {
    registry: ProviderRegistry<E>,
    state: Mutex<ControllerState>,
}

impl<E: HostEnvironment> SessionController<E> {
    /// Create a disconnected controller over the given host environment.
    pub fn new(env: E) -> Self {
        Self {
            registry: ProviderRegistry::new(env),
            state: Mutex::new(ControllerState {
                phase: SessionPhase::Disconnected,
                session: None,
                pending_message: None,
                generation: 0,
                in_flight: false,
            }),
        }
    }

    /// Known integrations, in presentation order.
    pub fn integrations(&self) -> &'static [IntegrationDescriptor] {
        self.registry.integrations()
    }

    /// Detect and connect the named integration.
    ///
    /// A session already in place is torn down first; connecting a different
    /// integration mid-session is the disconnect sequence followed by a
    /// fresh connect. On success the returned public key identifies the
    /// session account and all prior signing artifacts are gone.
    pub async fn connect(&self, name: &str) -> Result<PublicKey, SessionError> {
        {
            let state = self.state.lock().unwrap();
            if state.in_flight {
                return Err(SessionError::OperationInFlight);
            }
        }

        // Replacing a connected provider requires the disconnect sequence
        // first.
        if let Some(provider) = self.take_session() {
            Self::provider_disconnect(provider).await;
        }

        // Fresh detection on every attempt: the environment may have
        // changed since the last call.
        let provider = match self.registry.detect(name) {
            Detection::Available(provider) => provider,
            Detection::Unavailable { install_url } => {
                info!(integration = name, install_url, "No signing agent detected");
                return Err(SessionError::ProviderUnavailable {
                    name: name.to_string(),
                    install_url: install_url.to_string(),
                });
            }
            Detection::UnknownIntegration => {
                return Err(SessionError::UnknownIntegration(name.to_string()));
            }
        };

        {
            let mut state = self.state.lock().unwrap();
            state.phase = SessionPhase::Connecting;
            state.in_flight = true;
        }

        let connected = provider.connect().await;

        let mut state = self.state.lock().unwrap();
        state.in_flight = false;
        match connected {
            Ok(account) => {
                state.generation += 1;
                state.session = Some(Session::new(provider, account));
                state.phase = SessionPhase::Connected;
                info!(integration = name, account = %account.truncated(), "Session connected");
                Ok(account)
            }
            Err(err) => {
                state.phase = SessionPhase::Disconnected;
                info!(integration = name, error = %err, "Connection rejected");
                Err(SessionError::ConnectRejected(err))
            }
        }
    }

    /// Store plaintext for a future `sign`. Does not touch the provider.
    pub fn set_message(&self, text: &str) -> Result<(), SessionError> {
        let mut state = self.state.lock().unwrap();
        if state.session.is_none() {
            return Err(SessionError::NotConnected);
        }
        state.pending_message = Some(text.to_string());
        Ok(())
    }

    /// Encode the pending message and request a signature from the provider.
    ///
    /// Fails immediately, without a provider call, when no session is
    /// active, the pending message is absent or empty, or another provider
    /// operation is outstanding. A completion that arrives after the
    /// session was torn down is discarded.
    pub async fn sign(&self) -> Result<Signature, SessionError> {
        let (provider, encoded, generation) = {
            let mut state = self.state.lock().unwrap();
            if state.in_flight {
                return Err(SessionError::OperationInFlight);
            }
            let Some(session) = state.session.as_ref() else {
                return Err(SessionError::NotConnected);
            };
            let message = match state.pending_message.as_deref() {
                None => return Err(SessionError::NothingToSign),
                Some("") => return Err(SessionError::EmptyMessage),
                Some(text) => text,
            };

            let encoded = encode_message(message);
            let provider = Arc::clone(&session.provider);
            let generation = state.generation;
            state.phase = SessionPhase::SigningRequested;
            state.in_flight = true;
            (provider, encoded, generation)
        };

        let signed = provider.sign_message(&encoded).await;

        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            // Disconnected (and possibly reconnected) while the request was
            // outstanding. The session that issued it is gone; the result
            // must not touch the current state.
            debug!("Discarding stale signing completion");
            return Err(SessionError::NotConnected);
        }
        state.in_flight = false;

        match signed {
            Ok(signature) => {
                let session = state
                    .session
                    .as_mut()
                    .expect("generation unchanged implies session present");
                session.last_message = Some(encoded);
                session.last_signature = Some(signature);
                session.verified = Verification::Unknown;
                state.phase = SessionPhase::Signed;
                info!("Message signed");
                Ok(signature)
            }
            Err(err) => {
                // No partial state: session stays connected, artifacts
                // untouched.
                state.phase = SessionPhase::Connected;
                info!(error = %err, "Signing did not complete");
                match err {
                    WalletError::SigningRejected(_) => Err(SessionError::SigningRejected(err)),
                    _ => Err(SessionError::SigningFailed(err)),
                }
            }
        }
    }

    /// Verify the captured signature against the session account.
    ///
    /// Cryptographic rejection is a valid `false` result, not a fault; the
    /// only failure modes are missing preconditions.
    pub fn verify(&self) -> Result<bool, SessionError> {
        let mut state = self.state.lock().unwrap();
        if state.session.is_none() {
            return Err(SessionError::NotConnected);
        }
        if state.phase != SessionPhase::Signed {
            return Err(SessionError::NothingToVerify);
        }

        state.phase = SessionPhase::Verifying;
        let session = state
            .session
            .as_mut()
            .expect("session presence checked above");
        let (message, signature) = match (&session.last_message, &session.last_signature) {
            (Some(message), Some(signature)) => (message, signature),
            // Signed phase always carries both artifacts
            _ => {
                state.phase = SessionPhase::Connected;
                return Err(SessionError::NothingToVerify);
            }
        };

        let valid = verifier::verify(message, signature, &session.account);
        session.verified = if valid {
            Verification::Valid
        } else {
            Verification::Invalid
        };
        state.phase = SessionPhase::Verified;
        info!(valid, "Signature verified against session account");
        Ok(valid)
    }

    /// Tear down the session.
    ///
    /// Local state clears immediately and unconditionally; an outstanding
    /// signing request is orphaned (its completion will be discarded). An
    /// agent-side teardown failure is reported in the log but never blocks
    /// the local transition to `Disconnected`.
    pub async fn disconnect(&self) -> Result<(), SessionError> {
        let Some(provider) = self.take_session() else {
            return Err(SessionError::NotConnected);
        };
        Self::provider_disconnect(provider).await;
        Ok(())
    }

    /// Current state machine phase.
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().unwrap().phase
    }

    /// Public key of the connected account, if any.
    pub fn account(&self) -> Option<PublicKey> {
        let state = self.state.lock().unwrap();
        state.session.as_ref().map(|s| s.account)
    }

    /// The most recent signature, if one was captured this session.
    pub fn last_signature(&self) -> Option<Signature> {
        let state = self.state.lock().unwrap();
        state.session.as_ref().and_then(|s| s.last_signature)
    }

    /// Tri-state verification outcome for the current session.
    pub fn verification(&self) -> Verification {
        let state = self.state.lock().unwrap();
        state
            .session
            .as_ref()
            .map(|s| s.verified)
            .unwrap_or(Verification::Unknown)
    }

    /// The stored plaintext awaiting `sign`, if any.
    pub fn pending_message(&self) -> Option<String> {
        self.state.lock().unwrap().pending_message.clone()
    }

    /// Clear the session and return the provider handle for agent-side
    /// teardown. Bumping the generation orphans any outstanding operation.
    fn take_session(&self) -> Option<Arc<dyn WalletProvider>> {
        let mut state = self.state.lock().unwrap();
        let session = state.session.take()?;
        state.generation += 1;
        state.in_flight = false;
        state.pending_message = None;
        state.phase = SessionPhase::Disconnected;
        info!(account = %session.account.truncated(), "Session disconnected");
        Some(session.provider)
    }

    async fn provider_disconnect(provider: Arc<dyn WalletProvider>) {
        if let Err(err) = provider.disconnect().await {
            // Agent-side teardown failure is non-fatal; local state is
            // already cleared.
            warn!(error = %err, "Provider disconnect failed");
        }
    }
}
