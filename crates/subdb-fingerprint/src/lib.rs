// SPDX-License-Identifier: GPL-3.0-or-later

//! Content fingerprinting for SubDB lookups.
//!
//! SubDB identifies a media file by the MD5 digest of its first and last
//! 64 KiB. This crate provides:
//! - The [`FileHash`] value type (32 lowercase hex characters)
//! - Hashing of any seekable byte source or of a file on disk

pub mod error;
pub mod fingerprint;
pub mod generator;

pub use error::{FingerprintError, Result};
pub use fingerprint::FileHash;
pub use generator::{fingerprint_file, fingerprint_reader, BLOCK_SIZE, MIN_FILE_SIZE};
