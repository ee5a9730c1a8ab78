// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;

use subdb_fingerprint::{fingerprint_file, FingerprintError, MIN_FILE_SIZE};
use tempfile::NamedTempFile;

fn media_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_fingerprint_file_golden_value() {
    let mut bytes = vec![0x00u8; 65_536];
    bytes.extend(std::iter::repeat(0xFFu8).take(65_536));
    let file = media_file(&bytes);

    let hash = fingerprint_file(file.path()).unwrap();
    assert_eq!(hash.as_str(), "3e35ba1ffe2ab27d72b59d24cbd40fa5");
}

#[test]
fn test_fingerprint_file_same_file_twice() {
    let bytes: Vec<u8> = (0..131_072u32).map(|i| (i % 251) as u8).collect();
    let file = media_file(&bytes);

    let first = fingerprint_file(file.path()).unwrap();
    let second = fingerprint_file(file.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str(), "d02199a197fb4b1777525fe375f9f5f1");
}

#[test]
fn test_fingerprint_file_too_small() {
    let file = media_file(&vec![7u8; (MIN_FILE_SIZE - 1) as usize]);

    let result = fingerprint_file(file.path());
    assert!(matches!(
        result,
        Err(FingerprintError::FileTooSmall { size: 131_071 })
    ));
}

#[test]
fn test_fingerprint_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.mkv");

    match fingerprint_file(&missing) {
        Err(FingerprintError::FileNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

