// Integration tests for the app registry file
//
// These tests verify that registered apps can be found again, that the file
// layout is length-prefixed, and that malformed files are reported.

use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use ed25519_dalek::SigningKey;
use obs_controller::apps::{sign_body, AppMetadata, AppRegistry, MAX_ENTRY_SIZE};
use obs_controller::ControllerError;
use std::fs;
use std::io::Write;
use tempfile::TempDir;
use uuid::Uuid;

#[test]
fn test_missing_registry_has_no_apps() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = AppRegistry::new(temp_dir.path().join("apps.ock"));

    assert!(registry.list()?.is_empty());
    assert!(registry.find(Uuid::new_v4())?.is_none());

    Ok(())
}

#[test]
fn test_register_then_find() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = AppRegistry::new(temp_dir.path().join("apps.ock"));

    let first = registry.register("Stream Deck")?;
    let second = registry.register("Chat Bot")?;

    let found = registry.find(second.metadata.id())?.expect("second app should be found");
    assert_eq!(found.name, "Chat Bot");
    assert_eq!(found.public_key, second.signing_key.verifying_key().to_bytes());

    let apps = registry.list()?;
    assert_eq!(apps.len(), 2);
    assert_eq!(apps[0], first.metadata);
    assert_eq!(apps[1], second.metadata);

    Ok(())
}

#[test]
fn test_registered_key_verifies_signatures() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = AppRegistry::new(temp_dir.path().join("apps.ock"));
    let app = registry.register("Signer")?;

    let stored = registry.find(app.metadata.id())?.unwrap();
    let signature = sign_body(&app.signing_key, b"Test message signed").to_bytes();

    assert!(stored.verify(b"Test message signed", &signature));
    assert!(!stored.verify(b"Test message forged", &signature));

    // A different key's signature is rejected
    let other = SigningKey::from_bytes(&[9u8; 32]);
    let foreign = sign_body(&other, b"Test message signed").to_bytes();
    assert!(!stored.verify(b"Test message signed", &foreign));

    Ok(())
}

#[test]
fn test_duplicate_uuid_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let registry = AppRegistry::new(temp_dir.path().join("apps.ock"));
    let key = SigningKey::from_bytes(&[1u8; 32]);
    let app = AppMetadata::new(Uuid::new_v4(), "Once", &key.verifying_key());

    registry.insert(&app)?;
    let err = registry.insert(&app).unwrap_err();

    assert!(matches!(err, ControllerError::DuplicateApp(id) if id == app.id()));
    assert_eq!(registry.list()?.len(), 1);

    Ok(())
}

#[test]
fn test_entries_are_length_prefixed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("apps.ock");
    let registry = AppRegistry::new(&path);
    let key = SigningKey::from_bytes(&[2u8; 32]);
    let app = AppMetadata::new(Uuid::new_v4(), "Layout", &key.verifying_key());

    registry.insert(&app)?;

    let bytes = fs::read(&path)?;
    let declared = u64::from_le_bytes(bytes[..8].try_into()?);
    assert_eq!(declared as usize, bytes.len() - 8);

    Ok(())
}

#[test]
fn test_truncated_entry_is_corrupt() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("apps.ock");
    let registry = AppRegistry::new(&path);
    registry.register("Good")?;

    // Append a header promising more bytes than follow
    let mut file = fs::OpenOptions::new().append(true).open(&path)?;
    file.write_u64::<LittleEndian>(100)?;
    file.write_all(&[0u8; 10])?;
    drop(file);

    let err = registry.list().unwrap_err();
    assert!(matches!(err, ControllerError::CorruptRegistry(_)));

    Ok(())
}

#[test]
fn test_oversized_entry_is_corrupt() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("apps.ock");

    let mut file = fs::File::create(&path)?;
    file.write_u64::<LittleEndian>(MAX_ENTRY_SIZE + 1)?;
    drop(file);

    let err = AppRegistry::new(&path).list().unwrap_err();
    assert!(matches!(err, ControllerError::CorruptRegistry(_)));

    Ok(())
}
