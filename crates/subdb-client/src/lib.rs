// SPDX-License-Identifier: GPL-3.0-or-later

//! SubDB API client for looking up and sharing subtitles.
//!
//! Media files are identified by their SubDB hash (see `subdb-fingerprint`).
//! The client lists the languages known to the service, searches for the
//! languages available for a file, downloads a subtitle and uploads new
//! ones. Every request identifies the calling application through the
//! user agent set with [`SubDbClient::set_user_agent`].

pub mod client;
pub mod error;
pub mod models;

pub use bytes::Bytes;
pub use client::{SubDbClient, SubDbClientBuilder};
pub use error::{Result, SubDbError};
pub use models::UserAgent;
pub use subdb_fingerprint::{FileHash, FingerprintError};
