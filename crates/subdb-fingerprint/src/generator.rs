// SPDX-License-Identifier: GPL-3.0-or-later

//! SubDB hash generation.
//!
//! The hash is the MD5 of two fixed windows: the first [`BLOCK_SIZE`] bytes
//! of the source followed by its last [`BLOCK_SIZE`] bytes. Both windows are
//! always exactly [`BLOCK_SIZE`] long, so sources shorter than
//! [`MIN_FILE_SIZE`] are rejected instead of hashed partially.
//!
//! # Example
//!
//! ```no_run
//! use subdb_fingerprint::fingerprint_file;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = fingerprint_file("movie.mkv")?;
//! println!("{}", hash);
//! # Ok(())
//! # }
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use md5::{Digest, Md5};
use tracing::{debug, instrument};

use crate::{FileHash, FingerprintError, Result};

/// Size of each hashed window (64 KiB).
pub const BLOCK_SIZE: u64 = 64 * 1024;

/// Smallest source that holds two non-overlapping windows.
pub const MIN_FILE_SIZE: u64 = 2 * BLOCK_SIZE;

/// Hash a seekable byte source.
///
/// The source length is taken by seeking to its end. Any I/O error from
/// seeking or reading is returned unchanged as [`FingerprintError::Io`].
pub fn fingerprint_reader<R: Read + Seek>(mut source: R) -> Result<FileHash> {
    let size = source.seek(SeekFrom::End(0))?;
    if size < MIN_FILE_SIZE {
        return Err(FingerprintError::FileTooSmall { size });
    }

    let mut first = vec![0u8; BLOCK_SIZE as usize];
    let mut last = vec![0u8; BLOCK_SIZE as usize];

    source.seek(SeekFrom::Start(0))?;
    source.read_exact(&mut first)?;

    source.seek(SeekFrom::Start(size - BLOCK_SIZE))?;
    source.read_exact(&mut last)?;

    let mut hasher = Md5::new();
    hasher.update(&first);
    hasher.update(&last);
    let digest = hasher.finalize();

    Ok(FileHash::from_digest(digest.as_slice()))
}

/// Hash a file on disk.
///
/// A missing file is reported as [`FingerprintError::FileNotFound`]; every
/// other open failure propagates as [`FingerprintError::Io`].
#[instrument(level = "debug", skip_all, fields(file = %path.as_ref().display()))]
pub fn fingerprint_file<P: AsRef<Path>>(path: P) -> Result<FileHash> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FingerprintError::FileNotFound(path.to_path_buf()),
        _ => FingerprintError::Io(e),
    })?;

    let hash = fingerprint_reader(file)?;
    debug!(target: "fingerprint", hash = %hash, "computed file hash");
    Ok(hash)
}
