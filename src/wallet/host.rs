//! Host-environment detection surface.
//!
//! Signing agents announce themselves by injecting a namespaced object into
//! the host environment (the browser-wallet convention: `phantom.solana`
//! carrying an `isPhantom` marker). This module abstracts that surface so
//! the registry can inspect it uniformly, and tests can stage agents
//! appearing and vanishing between calls.

use crate::wallet::traits::WalletProvider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A signing agent injected into the host environment under a namespace.
///
/// Carries the provider handle plus the agent's self-identification marker
/// flags (e.g. `isPhantom`). An agent squatting on a namespace without the
/// expected marker must not be treated as the expected integration.
#[derive(Clone)]
pub struct InjectedAgent {
    provider: Arc<dyn WalletProvider>,
    markers: Vec<String>,
}

impl InjectedAgent {
    /// Wrap a provider with its self-identification markers.
    pub fn new(provider: Arc<dyn WalletProvider>, markers: &[&str]) -> Self {
        Self {
            provider,
            markers: markers.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Whether the agent self-identifies with the given marker flag.
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m == marker)
    }

    /// The agent's capability handle.
    pub fn provider(&self) -> Arc<dyn WalletProvider> {
        Arc::clone(&self.provider)
    }
}

/// Read access to the host environment's injected agents.
///
/// Implementations must reflect the live environment on every call:
/// an agent installed after process start must become visible, and a
/// removed one must stop being returned. Callers never cache results.
pub trait HostEnvironment: Send + Sync {
    /// Look up the agent injected under `namespace`, if any.
    fn injected(&self, namespace: &str) -> Option<InjectedAgent>;
}

/// In-process host environment backed by a mutable namespace table.
///
/// Used by the demo binary (hosting the local key agent) and by tests that
/// stage agents mid-run.
#[derive(Clone, Default)]
pub struct InProcessEnvironment {
    agents: Arc<Mutex<HashMap<String, InjectedAgent>>>,
}

impl InProcessEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject an agent under a namespace, replacing any previous occupant.
    pub fn inject(&self, namespace: &str, agent: InjectedAgent) {
        let mut agents = self.agents.lock().unwrap();
        agents.insert(namespace.to_string(), agent);
    }

    /// Remove the agent under a namespace, if present.
    pub fn eject(&self, namespace: &str) {
        let mut agents = self.agents.lock().unwrap();
        agents.remove(namespace);
    }
}

impl HostEnvironment for InProcessEnvironment {
    fn injected(&self, namespace: &str) -> Option<InjectedAgent> {
        let agents = self.agents.lock().unwrap();
        agents.get(namespace).cloned()
    }
}
