// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;
use std::str::FromStr;

use crate::FingerprintError;

/// Length of a hex-encoded MD5 digest.
const HASH_LEN: usize = 32;

/// SubDB file hash.
///
/// The MD5 digest of a media file's first and last 64 KiB, hex-encoded in
/// lowercase. Two files sharing both windows produce the same hash; the
/// service cannot tell them apart either.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHash(String);

impl FileHash {
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FileHash {
    type Err = FingerprintError;

    /// Parse a previously computed hash. Only lowercase hex is accepted since
    /// that is what the service indexes on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HASH_LEN {
            return Err(FingerprintError::InvalidHash(format!(
                "expected {} characters, got {}",
                HASH_LEN,
                s.len()
            )));
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(FingerprintError::InvalidHash(
                "hash must contain only lowercase hex digits".to_string(),
            ));
        }

        Ok(Self(s.to_string()))
    }
}
