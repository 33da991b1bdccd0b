//! Registered client apps and request signing
//!
//! Apps that may drive the control API are listed in an append-only registry
//! file. Each app holds an ed25519 keypair; the registry keeps the public half
//! and every request carries a signature over the SHA-256 of its body.

mod registry;
mod signing;

pub use registry::{AppMetadata, AppRegistry, RegisteredApp, MAX_ENTRY_SIZE};
pub use signing::{
    decode_signing_key, encode_signing_key, sign_body, signed_message, EMPTY_BODY_MESSAGE,
    SIGNATURE_LENGTH,
};
