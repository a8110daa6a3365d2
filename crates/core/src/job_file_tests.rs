// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn from_metadata_reports_name_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.k");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(b"hello").unwrap();
    drop(f);

    let metadata = std::fs::metadata(&path).unwrap();
    let file = JobFile::from_metadata("script.k".to_string(), &metadata).unwrap();
    assert_eq!(file.name, "script.k");
    assert_eq!(file.size, 5);
}
