// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FingerprintError>;

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("The supplied file is too small ({size} bytes, at least {min} required)", min = crate::MIN_FILE_SIZE)]
    FileTooSmall { size: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file hash: {0}")]
    InvalidHash(String),
}
