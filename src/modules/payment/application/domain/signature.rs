use base64::{engine::general_purpose::STANDARD, Engine as _};
use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use p256::pkcs8::DecodePublicKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignatureError {
    #[error("Malformed public key: {0}")]
    MalformedKey(String),
}

/// Checks an acquirer webhook signature.
///
/// `key_base64` is the base64 of a PEM public key, `signature_base64` the base64 of a DER
/// ECDSA P-256 signature over the SHA-256 of `body`. A garbled signature is reported as
/// `Ok(false)`; only an unusable key is an error.
pub fn verify_signature(
    key_base64: &str,
    body: &[u8],
    signature_base64: &str,
) -> Result<bool, SignatureError> {
    let pem = STANDARD
        .decode(key_base64.trim())
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let pem = String::from_utf8(pem).map_err(|e| SignatureError::MalformedKey(e.to_string()))?;
    let key = VerifyingKey::from_public_key_pem(&pem)
        .map_err(|e| SignatureError::MalformedKey(e.to_string()))?;

    let Ok(raw) = STANDARD.decode(signature_base64.trim()) else {
        return Ok(false);
    };
    let Ok(signature) = Signature::from_der(&raw) else {
        return Ok(false);
    };

    Ok(key.verify(body, &signature).is_ok())
}
