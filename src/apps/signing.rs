use crate::error::{ControllerError, Result};
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey, SECRET_KEY_LENGTH};
use sha2::{Digest, Sha256};

/// Message signed in place of an empty request body
pub const EMPTY_BODY_MESSAGE: &[u8] = b"obs-controller";

pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

/// The bytes whose digest gets signed for a request body
pub fn signed_message(body: &[u8]) -> &[u8] {
    if body.is_empty() {
        EMPTY_BODY_MESSAGE
    } else {
        body
    }
}

pub(crate) fn digest(body: &[u8]) -> [u8; 32] {
    Sha256::digest(signed_message(body)).into()
}

/// Sign a request body the way the control API expects
pub fn sign_body(key: &SigningKey, body: &[u8]) -> Signature {
    key.sign(&digest(body))
}

pub fn encode_signing_key(key: &SigningKey) -> String {
    base64::engine::general_purpose::STANDARD.encode(key.to_bytes())
}

pub fn decode_signing_key(encoded: &str) -> Result<SigningKey> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ControllerError::InvalidKey(e.to_string()))?;
    let bytes: [u8; SECRET_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        ControllerError::InvalidKey(format!(
            "expected {} bytes, got {}",
            SECRET_KEY_LENGTH,
            bytes.len()
        ))
    })?;
    Ok(SigningKey::from_bytes(&bytes))
}
