//! Digest algorithms for reference hashes.

use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::Digest;

/// Hash function used for every value in the binary manifests.
///
/// `Sha1` is what the measurement consumer expects; `Sha256` is available for
/// consumers that measure into SHA-256 banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl DigestAlgorithm {
    /// Lowercase hex digest of `bytes`.
    #[must_use]
    pub fn digest(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha1 => hex::encode(sha1::Sha1::digest(bytes)),
            Self::Sha256 => hex::encode(sha2::Sha256::digest(bytes)),
        }
    }

    /// Lowercase hex digest of everything `reader` yields, retrying
    /// interrupted reads.
    ///
    /// # Errors
    ///
    /// Propagates read errors from `reader`.
    pub fn digest_reader(self, reader: impl Read) -> std::io::Result<String> {
        match self {
            Self::Sha1 => stream::<sha1::Sha1>(reader),
            Self::Sha256 => stream::<sha2::Sha256>(reader),
        }
    }

    /// Length of the hex string this algorithm produces.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Sha1 => 40,
            Self::Sha256 => 64,
        }
    }
}

fn stream<D: Digest + Write>(mut reader: impl Read) -> std::io::Result<String> {
    let mut hasher = D::new();
    std::io::copy(&mut reader, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        })
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            other => Err(format!("unknown digest algorithm '{other}' (expected sha1 or sha256)")),
        }
    }
}
