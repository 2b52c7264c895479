use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::canonical_json::to_canonical_json_bytes;
use crate::model::Block;

/// Hash algorithms available for content hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// xxh3-64, rendered as 16 lowercase hex chars.
    #[default]
    Xxh64,
    /// SHA-256, rendered as 64 lowercase hex chars.
    Sha256,
}

impl HashAlgorithm {
    pub const fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Xxh64 => "xxh64",
            HashAlgorithm::Sha256 => "sha256",
        }
    }

    /// Hash raw bytes and return lowercase hex.
    pub fn hex(self, bytes: &[u8]) -> String {
        match self {
            HashAlgorithm::Xxh64 => xxh64_hex(bytes),
            HashAlgorithm::Sha256 => sha256_hex(bytes),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported hash algorithm '{0}'. Supported algorithms: sha256, xxh64.")]
pub struct UnsupportedHashAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnsupportedHashAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xxh64" => Ok(HashAlgorithm::Xxh64),
            "sha256" => Ok(HashAlgorithm::Sha256),
            _ => Err(UnsupportedHashAlgorithm(s.to_string())),
        }
    }
}

/// Fixed-width 16-char lowercase hex of xxh3-64.
pub fn xxh64_hex(bytes: &[u8]) -> String {
    format!("{:016x}", xxh3_64(bytes))
}

/// Lowercase hex SHA-256.
pub fn sha256_hex(bytes: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// A hash derived only from a document's blocks.
///
/// Used to decide whether two documents are logically the same regardless of
/// volatile metadata such as the save timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    algorithm: HashAlgorithm,
    hex: String,
}

impl ContentHash {
    /// Hash the canonical JSON of `blocks`.
    pub fn of_blocks(blocks: &[Block], algorithm: HashAlgorithm) -> Result<Self, serde_json::Error> {
        let bytes = to_canonical_json_bytes(blocks)?;
        Ok(Self {
            algorithm,
            hex: algorithm.hex(&bytes),
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn as_hex(&self) -> &str {
        &self.hex
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.hex)
    }
}
