// SPDX-License-Identifier: GPL-3.0-or-later

use reqwest::StatusCode;
use subdb_fingerprint::FingerprintError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubDbError>;

#[derive(Debug, Error)]
pub enum SubDbError {
    #[error("No user agent set, required to access the SubDB API")]
    MissingIdentity,

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No subtitle found for the requested hash")]
    NoSubtitle,

    #[error("Subtitle already exists in the SubDB database")]
    Duplicate,

    #[error("Subtitle file is not supported by SubDB")]
    InvalidMediaType,

    #[error("Unexpected response status: {status}")]
    UnexpectedStatus { status: StatusCode },

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
