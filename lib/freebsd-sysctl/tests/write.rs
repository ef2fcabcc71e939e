//! Set calls against the scripted kernel.

mod common;

use common::FakeKernel;
use freebsd_sysctl::sysctl::{read_with, write_with};
use freebsd_sysctl::{Kind, SysctlError, Value};

const TUNABLE: [i32; 2] = [4, 7];

#[test]
fn written_values_read_back_unchanged() {
    let kernel = FakeKernel::new().with_writable(&TUNABLE, &0i32.to_ne_bytes());

    let image = Value::I32(42).encode().unwrap();
    write_with(&kernel, &TUNABLE, &image).unwrap();

    assert_eq!(
        read_with(&kernel, &TUNABLE, Kind::I32).unwrap(),
        Value::I32(42)
    );
}

#[test]
fn read_only_nodes_report_read_only_not_permission() {
    let kernel = FakeKernel::new().with_node(&TUNABLE, &0i32.to_ne_bytes());
    assert!(matches!(
        write_with(&kernel, &TUNABLE, &1i32.to_ne_bytes()),
        Err(SysctlError::ReadOnly { errno }) if errno == libc::EPERM
    ));
}

#[test]
fn privilege_failures_keep_their_errno() {
    let kernel = FakeKernel::new().with_fault(&TUNABLE, libc::EACCES);
    assert!(matches!(
        write_with(&kernel, &TUNABLE, &1i32.to_ne_bytes()),
        Err(SysctlError::PermissionDenied { errno }) if errno == libc::EACCES
    ));
}

#[test]
fn the_kernels_size_verdict_is_surfaced_as_invalid_value() {
    let kernel = FakeKernel::new().with_strict_writable(&TUNABLE, &0i32.to_ne_bytes());
    // an 8-byte image for a 4-byte node
    assert!(matches!(
        write_with(&kernel, &TUNABLE, &1i64.to_ne_bytes()),
        Err(SysctlError::InvalidValue { errno }) if errno == libc::EINVAL
    ));
}

#[test]
fn writes_to_unknown_nodes_fail() {
    let kernel = FakeKernel::new();
    assert!(matches!(
        write_with(&kernel, &[9, 9], &1i32.to_ne_bytes()),
        Err(SysctlError::UnknownNode { .. })
    ));
}
