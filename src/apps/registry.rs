use super::signing::{digest, SIGNATURE_LENGTH};
use crate::error::{ControllerError, Result};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ed25519_dalek::{Signature, SigningKey, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Largest registry entry accepted when reading
pub const MAX_ENTRY_SIZE: u64 = 64 * 1024;

/// A client app allowed to use the control API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub uuid: u128,
    pub name: String,
    pub public_key: [u8; PUBLIC_KEY_LENGTH],
}

/// Result of registering an app: the stored entry and its secret key
pub struct RegisteredApp {
    pub metadata: AppMetadata,
    pub signing_key: SigningKey,
}

impl AppMetadata {
    pub fn new(uuid: Uuid, name: impl Into<String>, key: &VerifyingKey) -> Self {
        Self {
            uuid: uuid.as_u128(),
            name: name.into(),
            public_key: key.to_bytes(),
        }
    }

    pub fn id(&self) -> Uuid {
        Uuid::from_u128(self.uuid)
    }

    /// Check `signature` against the SHA-256 of `body` (or of the empty-body message)
    pub fn verify(&self, body: &[u8], signature: &[u8; SIGNATURE_LENGTH]) -> bool {
        let Ok(key) = VerifyingKey::from_bytes(&self.public_key) else {
            return false;
        };
        key.verify(&digest(body), &Signature::from_bytes(signature))
            .is_ok()
    }
}

/// Append-only file of `[u64 LE length][bincode AppMetadata]` entries
#[derive(Debug, Clone)]
pub struct AppRegistry {
    path: PathBuf,
}

impl AppRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up an app; a missing registry file means no apps are registered
    pub fn find(&self, uuid: Uuid) -> Result<Option<AppMetadata>> {
        let wanted = uuid.as_u128();
        Ok(self.list()?.into_iter().find(|app| app.uuid == wanted))
    }

    pub fn list(&self) -> Result<Vec<AppMetadata>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut reader = BufReader::new(file);
        let mut apps = Vec::new();

        loop {
            let size = match reader.read_u64::<LittleEndian>() {
                Ok(size) => size,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };

            if size > MAX_ENTRY_SIZE {
                return Err(ControllerError::CorruptRegistry(format!(
                    "entry {} declares {} bytes (max {})",
                    apps.len(),
                    size,
                    MAX_ENTRY_SIZE
                )));
            }

            let mut entry = vec![0u8; size as usize];
            reader.read_exact(&mut entry).map_err(|e| match e.kind() {
                ErrorKind::UnexpectedEof => {
                    ControllerError::CorruptRegistry(format!("entry {} is truncated", apps.len()))
                }
                _ => e.into(),
            })?;

            apps.push(bincode::deserialize(&entry)?);
        }

        Ok(apps)
    }

    /// Append an entry; UUIDs must be unique
    pub fn insert(&self, app: &AppMetadata) -> Result<()> {
        if self.find(app.id())?.is_some() {
            return Err(ControllerError::DuplicateApp(app.id()));
        }

        let entry = bincode::serialize(app)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_u64::<LittleEndian>(entry.len() as u64)?;
        file.write_all(&entry)?;
        file.flush()?;

        Ok(())
    }

    /// Generate a UUID and keypair for `name` and store the public half
    pub fn register(&self, name: &str) -> Result<RegisteredApp> {
        let signing_key = SigningKey::generate(&mut OsRng);
        let metadata = AppMetadata::new(Uuid::new_v4(), name, &signing_key.verifying_key());

        self.insert(&metadata)?;
        info!("Registered app {} ({})", metadata.name, metadata.id());

        Ok(RegisteredApp {
            metadata,
            signing_key,
        })
    }
}
