// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn method_name_matches_client_methods_list() {
    let req = Request::GetJobStatus {
        identifier: "abc".to_string(),
    };
    assert!(CLIENT_METHODS.contains(&req.method_name()));
}

#[test]
fn wrapper_methods_is_a_strict_subset_of_client_methods() {
    for m in WRAPPER_METHODS {
        assert!(CLIENT_METHODS.contains(m));
    }
    assert!(WRAPPER_METHODS.len() < CLIENT_METHODS.len());
}

#[test]
fn request_roundtrips_through_json() {
    let req = Request::StartJob {
        script: b"print(1)".to_vec(),
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    match back {
        Request::StartJob { script } => assert_eq!(script, b"print(1)"),
        other => panic!("unexpected variant: {other:?}"),
    }
}
