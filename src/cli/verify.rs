//! Detached verification of externally produced artifacts.

use attest::codec::encode_message;
use attest::verifier::verify_detached;

/// Verify a (message, signature, public key) triple from hex input.
///
/// Exits successfully only on a valid signature; malformed hex is an input
/// error, but wrong-length byte sequences simply fail verification, the
/// same as they would anywhere else in the system.
pub async fn execute(
    message: &str,
    signature_hex: &str,
    public_key_hex: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let signature = hex::decode(signature_hex)
        .map_err(|e| format!("Signature is not valid hex: {}", e))?;
    let public_key = hex::decode(public_key_hex)
        .map_err(|e| format!("Public key is not valid hex: {}", e))?;

    let encoded = encode_message(message);
    let valid = verify_detached(&encoded, &signature, &public_key);

    if valid {
        println!("Signature verified");
        Ok(())
    } else {
        Err("Signature did not verify".into())
    }
}
