//! Shared types for Creel.
//!
//! This crate defines the types used across the Creel workspace:
//! the content fingerprint ([`FileDigest`]), the derived cache key scope
//! ([`Namespace`]), and the metadata returned by store and retrieve
//! operations ([`StoredFile`], [`RetrievedFile`]).

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use md5::{Digest as _, Md5};
use serde::{Deserialize, Serialize};

/// Practical per-entry size ceiling of the backing cache: 1 MiB.
pub const MAX_ENTRY_SIZE: u32 = 1_048_576;

/// Margin reserved below the per-entry ceiling for cache-client
/// bookkeeping such as key and namespace headers.
pub const ENTRY_OVERHEAD: u32 = 4_096;

/// Default chunk size: the cache entry ceiling minus the bookkeeping margin.
pub const DEFAULT_CHUNK_SIZE: u32 = MAX_ENTRY_SIZE - ENTRY_OVERHEAD;

// ---------------------------------------------------------------------------
// FileDigest
// ---------------------------------------------------------------------------

/// 128-bit MD5 fingerprint of a file's raw, uncompressed bytes.
///
/// Used to derive the [`Namespace`] of a stored object and to verify a
/// retrieved file against the content recorded at store time. Identity
/// and integrity only; not a security boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct FileDigest([u8; 16]);

impl FileDigest {
    /// Compute the digest of an in-memory byte slice.
    pub fn from_data(data: &[u8]) -> Self {
        Self(Md5::digest(data).into())
    }

    /// Compute the digest of a file on disk, streaming its contents.
    pub fn from_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut file = File::open(path)?;
        let mut hasher = Md5::new();
        io::copy(&mut file, &mut hasher)?;
        Ok(Self(hasher.finalize().into()))
    }

    /// Return the raw 16-byte representation.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl From<[u8; 16]> for FileDigest {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for FileDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileDigest({self})")
    }
}

/// Error parsing a [`FileDigest`] from its hex rendering.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid digest string: expected 32 hex characters")]
pub struct ParseDigestError;

impl FromStr for FileDigest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseDigestError);
        }
        let mut bytes = [0u8; 16];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let hi = hex_nibble(s.as_bytes()[i * 2])?;
            let lo = hex_nibble(s.as_bytes()[i * 2 + 1])?;
            *byte = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn hex_nibble(c: u8) -> Result<u8, ParseDigestError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(ParseDigestError),
    }
}

// Serialized as the hex string so metadata renders the digest the same
// way it appears inside the namespace.
impl Serialize for FileDigest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FileDigest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Namespace
// ---------------------------------------------------------------------------

/// Derived string scoping a family of chunk keys to one stored object
/// version: `"{base_file_name}:{digest_hex}"`.
///
/// Collisions require two files to share both name and digest, in which
/// case they are the same object.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace(String);

impl Namespace {
    /// Derive the namespace for a file name and its content digest.
    pub fn new(file_name: &str, digest: &FileDigest) -> Self {
        Self(format!("{file_name}:{digest}"))
    }

    /// The file name portion: everything before the first `:`.
    pub fn file_name(&self) -> &str {
        self.0.split(':').next().unwrap_or(&self.0)
    }

    /// The full namespace string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Namespace {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Operation metadata
// ---------------------------------------------------------------------------

/// Metadata returned by a successful store operation.
///
/// The cache keeps no directory of namespaces, so the caller must persist
/// this metadata if the file is to be retrieved later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    /// Path of the local file that was stored.
    pub local_path: PathBuf,
    /// How many chunk keys were written.
    pub number_of_chunks: usize,
    /// Digest of the raw, uncompressed file bytes.
    pub file_digest: FileDigest,
    /// Namespace scoping the chunk keys.
    #[serde(rename = "memcached_namespace")]
    pub namespace: Namespace,
}

/// Metadata returned by a successful retrieve operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedFile {
    /// Path the reconstructed file was written to.
    pub path: PathBuf,
    /// Fresh digest of the reconstructed file, for comparison against the
    /// digest recorded at store time.
    pub file_digest: FileDigest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = FileDigest::from_data(b"same content");
        let b = FileDigest::from_data(b"same content");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_sensitive_to_every_byte() {
        let a = FileDigest::from_data(b"content a");
        let b = FileDigest::from_data(b"content b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_display_is_32_hex_chars() {
        let digest = FileDigest::from_data(b"hello");
        let rendered = digest.to_string();
        assert_eq!(rendered.len(), 32);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        // Known MD5 of "hello".
        assert_eq!(rendered, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_digest_from_file_matches_from_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.bin");
        let content = b"file content to digest";
        std::fs::write(&path, content).unwrap();

        let from_file = FileDigest::from_file(&path).unwrap();
        let from_data = FileDigest::from_data(content);
        assert_eq!(from_file, from_data);
    }

    #[test]
    fn test_digest_parse_roundtrip() {
        let digest = FileDigest::from_data(b"roundtrip");
        let parsed: FileDigest = digest.to_string().parse().unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn test_digest_parse_rejects_bad_input() {
        assert_eq!("short".parse::<FileDigest>(), Err(ParseDigestError));
        assert_eq!(
            "zz41402abc4b2a76b9719d911017c592".parse::<FileDigest>(),
            Err(ParseDigestError)
        );
    }

    #[test]
    fn test_namespace_derivation() {
        let digest = FileDigest::from_data(b"hello");
        let ns = Namespace::new("report.csv", &digest);
        assert_eq!(
            ns.as_str(),
            "report.csv:5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(ns.file_name(), "report.csv");
    }

    #[test]
    fn test_namespace_file_name_stops_at_first_separator() {
        let ns = Namespace::from("a:b:c".to_string());
        assert_eq!(ns.file_name(), "a");
    }

    #[test]
    fn test_stored_file_serialized_field_names() {
        let digest = FileDigest::from_data(b"hello");
        let stored = StoredFile {
            local_path: PathBuf::from("/tmp/report.csv"),
            number_of_chunks: 3,
            file_digest: digest,
            namespace: Namespace::new("report.csv", &digest),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["local_path"], "/tmp/report.csv");
        assert_eq!(json["number_of_chunks"], 3);
        assert_eq!(json["file_digest"], "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            json["memcached_namespace"],
            "report.csv:5d41402abc4b2a76b9719d911017c592"
        );
    }

    #[test]
    fn test_retrieved_file_serialized_field_names() {
        let retrieved = RetrievedFile {
            path: PathBuf::from("/tmp/out/report.csv"),
            file_digest: FileDigest::from_data(b"hello"),
        };
        let json = serde_json::to_value(&retrieved).unwrap();
        assert_eq!(json["path"], "/tmp/out/report.csv");
        assert_eq!(json["file_digest"], "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_default_chunk_size_leaves_entry_headroom() {
        assert!(DEFAULT_CHUNK_SIZE < MAX_ENTRY_SIZE);
        assert_eq!(DEFAULT_CHUNK_SIZE, 1_048_576 - 4_096);
    }
}
