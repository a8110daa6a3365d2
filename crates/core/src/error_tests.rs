// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn transport_error_wraps_start_job_message() {
    let err: TransportError = TransportStartJobError("backend refused".to_string()).into();
    assert_eq!(err.to_string(), "start_job failed: backend refused");
}

#[test]
fn database_not_configured_has_fixed_message() {
    let err: TransportError = DatabaseNotConfigured.into();
    assert_eq!(
        err.to_string(),
        "all transport operations require set_exec_path first"
    );
}

#[test]
fn backend_error_reports_nonzero_exit() {
    let err = BackendError::NonZeroExit {
        status: 1,
        stderr: "sbatch: error".to_string(),
    };
    assert!(err.to_string().contains("status 1"));
}
