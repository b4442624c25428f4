//! Signing-agent integration module.
//!
//! Abstracts heterogeneous wallet agents behind one capability interface:
//! - `traits`: the `WalletProvider` contract every agent satisfies
//! - `host`: the detection surface agents inject themselves into
//! - `registry`: named integrations and live detection
//! - `local`: in-process auto-approving agent (demo)
//! - `mock`: scriptable test double

pub mod host;
pub mod local;
pub mod mock;
pub mod registry;
pub mod traits;

pub use host::{HostEnvironment, InProcessEnvironment, InjectedAgent};
pub use local::LocalKeyAgent;
pub use mock::MockWalletProvider;
pub use registry::{Detection, IntegrationDescriptor, ProviderRegistry, KNOWN_INTEGRATIONS};
pub use traits::{WalletError, WalletProvider, WalletResult};
