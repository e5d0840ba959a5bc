//! Digest values and the hash functions that produce them
//!
//! Cryptographic digests use SHA-256 (default) or BLAKE3, both rendered as
//! 64 lowercase hex characters. The checksum variant is CRC-32, rendered as
//! exactly 8 lowercase hex characters of its unsigned value.

use serde::{Deserialize, Serialize};
use sha2::Digest as _;
use std::fmt;
use std::str::FromStr;

/// Output of a hash or checksum function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(Vec<u8>);

impl Digest {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Digest of a 32-bit checksum, big-endian so the hex form is the
    /// zero-padded value.
    pub fn from_checksum(value: u32) -> Self {
        Self(value.to_be_bytes().to_vec())
    }

    /// Digest of a checksum produced as a signed 32-bit integer.
    ///
    /// The bit pattern is reinterpreted as unsigned; `-1` becomes
    /// `0xffffffff`, never a negative number.
    pub fn from_signed_checksum(raw: i32) -> Self {
        Self::from_checksum(raw as u32)
    }

    /// Parse a lowercase or uppercase hex string
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Render a signed 32-bit checksum as 8 lowercase hex characters
pub fn checksum_hex(raw: i32) -> String {
    Digest::from_signed_checksum(raw).to_hex()
}

/// Cryptographic hash functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl CryptoAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            CryptoAlgorithm::Sha256 => "sha256",
            CryptoAlgorithm::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for CryptoAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CryptoAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(CryptoAlgorithm::Sha256),
            "blake3" => Ok(CryptoAlgorithm::Blake3),
            other => Err(format!(
                "Unknown algorithm: {} (must be 'sha256' or 'blake3')",
                other
            )),
        }
    }
}

/// Any supported digest function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Crypto(CryptoAlgorithm),
    Crc32,
}

impl Algorithm {
    /// Length of the hex rendering
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Crypto(_) => 64,
            Algorithm::Crc32 => 8,
        }
    }
}

impl From<CryptoAlgorithm> for Algorithm {
    fn from(algorithm: CryptoAlgorithm) -> Self {
        Algorithm::Crypto(algorithm)
    }
}

/// Streaming hash context, fed incrementally and finalized once
pub enum StreamingHasher {
    Sha256(sha2::Sha256),
    Blake3(Box<blake3::Hasher>),
    Crc32(crc32fast::Hasher),
}

impl StreamingHasher {
    pub fn new(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Crypto(CryptoAlgorithm::Sha256) => {
                StreamingHasher::Sha256(sha2::Sha256::new())
            }
            Algorithm::Crypto(CryptoAlgorithm::Blake3) => {
                StreamingHasher::Blake3(Box::new(blake3::Hasher::new()))
            }
            Algorithm::Crc32 => StreamingHasher::Crc32(crc32fast::Hasher::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            StreamingHasher::Sha256(hasher) => hasher.update(data),
            StreamingHasher::Blake3(hasher) => {
                hasher.update(data);
            }
            StreamingHasher::Crc32(hasher) => hasher.update(data),
        }
    }

    pub fn finalize(self) -> Digest {
        match self {
            StreamingHasher::Sha256(hasher) => Digest::from_bytes(hasher.finalize().to_vec()),
            StreamingHasher::Blake3(hasher) => {
                Digest::from_bytes(hasher.finalize().as_bytes().to_vec())
            }
            StreamingHasher::Crc32(hasher) => Digest::from_checksum(hasher.finalize()),
        }
    }
}

/// Digest of a single byte slice
pub fn digest_bytes(algorithm: Algorithm, data: &[u8]) -> Digest {
    let mut hasher = StreamingHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}
