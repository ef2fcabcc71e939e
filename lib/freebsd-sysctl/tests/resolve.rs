//! Name-to-OID resolution through the `{0,3}` meta-node.

mod common;

use common::FakeKernel;
use freebsd_sysctl::mib::resolve_with;
use freebsd_sysctl::sysctl::read_with;
use freebsd_sysctl::{Kind, SysctlError, Value};

fn kernel() -> FakeKernel {
    FakeKernel::new()
        .with_name("kern.osreldate", &[1, 24])
        .with_name("kern.ostype", &[1, 1])
        .with_node(&[1, 24], &1_301_000_i32.to_ne_bytes())
}

#[test]
fn resolves_a_dotted_name_to_its_path() {
    let mib = resolve_with(&kernel(), "kern.osreldate").unwrap();
    assert_eq!(mib.components(), &[1, 24]);
}

#[test]
fn resolution_is_stable_within_a_boot() {
    let k = kernel();
    let first = resolve_with(&k, "kern.ostype").unwrap();
    let second = resolve_with(&k, "kern.ostype").unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_names_are_name_not_found() {
    assert!(matches!(
        resolve_with(&kernel(), "kern.nonsense"),
        Err(SysctlError::UnknownNode { errno }) if errno == libc::ENOENT
    ));
}

#[test]
fn empty_names_are_rejected_before_any_kernel_call() {
    assert!(matches!(
        resolve_with(&kernel(), ""),
        Err(SysctlError::InvalidName)
    ));
}

#[test]
fn names_with_interior_nul_are_rejected() {
    assert!(matches!(
        resolve_with(&kernel(), "kern\0osreldate"),
        Err(SysctlError::InvalidName)
    ));
}

#[test]
fn resolve_then_read_covers_the_by_name_path() {
    let k = kernel();
    let mib = resolve_with(&k, "kern.osreldate").unwrap();
    let value = read_with(&k, mib.components(), Kind::I32).unwrap();
    assert_eq!(value, Value::I32(1_301_000));
}
