//! # File Store
//!
//! The whole map lives in one file, rewritten on every mutation.
//!
//! ## Format
//!
//! ```text
//! [4 bytes: magic "GCKV"]
//! [4 bytes: version, u32 LE]
//! [4 bytes: CRC32 of payload, u32 LE]
//! [N bytes: payload = LZ4 (size-prepended) of the JSON object]
//! ```
//!
//! Writes go to a `.tmp` sibling first and are renamed over the target, so
//! an interrupted write leaves the previous file intact.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};

use crate::error::{StorageError, StorageResult};

use super::KeyValueStore;

/// Magic bytes identifying a store file.
const STORE_MAGIC: &[u8; 4] = b"GCKV";

/// Current store format version.
const STORE_VERSION: u32 = 1;

/// Magic + version + CRC.
const HEADER_LEN: usize = 12;

/// Single-file durable store.
#[derive(Debug)]
pub struct FileStore {
    /// Target file.
    path: PathBuf,
    /// In-memory copy of the file contents.
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the file fails the magic, version
    /// or checksum check, and `StorageError::Io` if it cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => decode(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Opened store {} with {} keys", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Rewrites the file from `entries`.
    fn persist(&self) -> StorageResult<()> {
        let bytes = encode(&self.entries)?;
        let tmp_path = self.temp_path();
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let Some(previous) = self.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.persist() {
            self.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}

fn encode(entries: &BTreeMap<String, String>) -> StorageResult<Vec<u8>> {
    let json = serde_json::to_vec(entries).map_err(std::io::Error::from)?;
    let payload = compress_prepend_size(&json);
    let crc = crc32fast::hash(&payload);

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(STORE_MAGIC);
    bytes.extend_from_slice(&STORE_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> StorageResult<BTreeMap<String, String>> {
    if bytes.len() < HEADER_LEN {
        return Err(StorageError::Corrupt(format!(
            "file too short: {} bytes",
            bytes.len()
        )));
    }
    if &bytes[0..4] != STORE_MAGIC {
        return Err(StorageError::Corrupt("bad magic".to_string()));
    }

    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    if version != STORE_VERSION {
        return Err(StorageError::Corrupt(format!(
            "unsupported version {version}"
        )));
    }

    let stored_crc = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
    let payload = &bytes[HEADER_LEN..];
    let computed_crc = crc32fast::hash(payload);
    if stored_crc != computed_crc {
        return Err(StorageError::Corrupt(format!(
            "checksum mismatch: stored {stored_crc:08x}, computed {computed_crc:08x}"
        )));
    }

    let json = decompress_size_prepended(payload)
        .map_err(|e| StorageError::Corrupt(format!("decompress failed: {e}")))?;
    serde_json::from_slice(&json)
        .map_err(|e| StorageError::Corrupt(format!("bad contents: {e}")))
}
