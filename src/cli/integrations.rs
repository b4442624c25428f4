//! List known wallet integrations and their live detection status.

use attest::wallet::host::InProcessEnvironment;
use attest::wallet::registry::{Detection, ProviderRegistry};

/// Print the known integrations table.
///
/// The binary hosts no injected agents of its own, so detection reflects
/// the empty in-process environment: every integration reports its install
/// URL. A host application embedding the library sees live results.
pub async fn execute() -> Result<(), Box<dyn std::error::Error>> {
    let registry = ProviderRegistry::new(InProcessEnvironment::new());

    println!("Known wallet integrations:");
    println!();

    for descriptor in registry.integrations() {
        let status = match registry.detect(descriptor.name) {
            Detection::Available(_) => "detected".to_string(),
            Detection::Unavailable { install_url } => {
                format!("not installed ({})", install_url)
            }
            Detection::UnknownIntegration => unreachable!("descriptor comes from the registry"),
        };

        println!("  {:<10} namespace {:<16} {}", descriptor.name, descriptor.namespace, status);
    }

    Ok(())
}
