//! End-to-end protocol demo against an in-process signing agent.
//!
//! Stages a host environment where the requested integration's namespace is
//! occupied by a `LocalKeyAgent`, then drives the full session: detect,
//! connect, sign the message, verify the signature locally, disconnect.

use attest::session::{SessionController, Verification};
use attest::wallet::host::{InProcessEnvironment, InjectedAgent};
use attest::wallet::local::LocalKeyAgent;
use attest::wallet::registry::KNOWN_INTEGRATIONS;
use std::sync::Arc;

pub async fn execute(integration: &str, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let descriptor = KNOWN_INTEGRATIONS
        .iter()
        .find(|d| d.name == integration)
        .ok_or_else(|| format!("Unknown integration '{}'", integration))?;

    // Stage the environment: the in-process agent answers for the
    // integration, carrying its expected marker.
    let env = InProcessEnvironment::new();
    let agent = Arc::new(LocalKeyAgent::generate()?);
    let markers: Vec<&str> = descriptor.marker.into_iter().collect();
    env.inject(descriptor.namespace, InjectedAgent::new(agent, &markers));

    let controller = SessionController::new(env);

    println!("Connecting via '{}'...", integration);
    let account = controller.connect(integration).await?;
    println!("  Connected. Account: {}", account.truncated());

    println!("Signing message: {:?}", message);
    controller.set_message(message)?;
    let signature = controller.sign().await?;
    println!("  Signature: {}", signature);

    let valid = controller.verify()?;
    match controller.verification() {
        Verification::Valid => println!("  Signature verified against {}", account.truncated()),
        Verification::Invalid => println!("  Signature REJECTED"),
        Verification::Unknown => unreachable!("verify() always records an outcome"),
    }

    controller.disconnect().await?;
    println!("Disconnected.");

    if valid {
        Ok(())
    } else {
        Err("Signature did not verify".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_full_flow() {
        assert!(execute("phantom", "demo message").await.is_ok());
    }

    #[tokio::test]
    async fn test_demo_markerless_integration() {
        assert!(execute("coinbase", "demo message").await.is_ok());
    }

    #[tokio::test]
    async fn test_demo_unknown_integration() {
        assert!(execute("ledger", "demo message").await.is_err());
    }
}
