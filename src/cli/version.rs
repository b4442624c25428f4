/// Display version information
pub fn execute() {
    println!("attest {}", env!("CARGO_PKG_VERSION"));
    println!("Wallet ownership attestation via challenge signing");
}
