//! Registry of known signing-agent integrations.
//!
//! Each integration is a named detector over the host environment: a
//! namespace to inspect, an optional self-identification marker the agent
//! must carry, and the URL to send the user to when the agent is absent.
//! Detection is re-run on every call — the host environment can change
//! between calls (agent installed mid-session), so nothing is cached.

use crate::wallet::host::HostEnvironment;
use crate::wallet::traits::WalletProvider;
use std::sync::Arc;
use tracing::debug;

/// A known signing-agent integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrationDescriptor {
    /// Integration name, used by callers to request a connection.
    pub name: &'static str,
    /// Host-environment namespace the agent injects itself under.
    pub namespace: &'static str,
    /// Self-identification marker the injected agent must carry, if any.
    pub marker: Option<&'static str>,
    /// Where to send the user when the agent is not installed.
    pub install_url: &'static str,
}

/// Known integrations, in presentation order.
pub const KNOWN_INTEGRATIONS: &[IntegrationDescriptor] = &[
    IntegrationDescriptor {
        name: "phantom",
        namespace: "phantom.solana",
        marker: Some("isPhantom"),
        install_url: "https://phantom.app/",
    },
    IntegrationDescriptor {
        name: "coinbase",
        namespace: "coinbaseSolana",
        marker: None,
        install_url: "https://www.coinbase.com/wallet",
    },
];

/// Outcome of a detection attempt.
pub enum Detection {
    /// Agent present and self-identified as the expected integration.
    Available(Arc<dyn WalletProvider>),
    /// No matching agent in the environment. Reported condition, not an
    /// error: the caller should redirect the user to `install_url`.
    Unavailable { install_url: &'static str },
    /// The requested name is not a known integration.
    UnknownIntegration,
}

/// Enumerates known integrations and detects which are live in the host
/// environment.
pub struct ProviderRegistry<E: HostEnvironment> {
    env: E,
}

impl<E: HostEnvironment> ProviderRegistry<E> {
    /// Create a registry over the given host environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Known integrations, in presentation order.
    pub fn integrations(&self) -> &'static [IntegrationDescriptor] {
        KNOWN_INTEGRATIONS
    }

    /// Look up a descriptor by integration name.
    pub fn descriptor(&self, name: &str) -> Option<&'static IntegrationDescriptor> {
        KNOWN_INTEGRATIONS.iter().find(|d| d.name == name)
    }

    /// Detect the named integration in the host environment.
    ///
    /// Re-inspects the environment on every call. An agent occupying the
    /// integration's namespace without the expected marker flag does not
    /// count as detected.
    pub fn detect(&self, name: &str) -> Detection {
        let Some(descriptor) = self.descriptor(name) else {
            return Detection::UnknownIntegration;
        };

        match self.env.injected(descriptor.namespace) {
            Some(agent) => {
                if let Some(marker) = descriptor.marker {
                    if !agent.has_marker(marker) {
                        debug!(
                            integration = name,
                            marker, "Agent in namespace lacks expected marker"
                        );
                        return Detection::Unavailable {
                            install_url: descriptor.install_url,
                        };
                    }
                }
                debug!(integration = name, "Detected signing agent");
                Detection::Available(agent.provider())
            }
            None => {
                debug!(integration = name, "No signing agent in environment");
                Detection::Unavailable {
                    install_url: descriptor.install_url,
                }
            }
        }
    }
}
