//! # Well-known `kern.*` parameters
//!
//! Convenience shortcuts over the generic reader for a handful of read-only
//! scalars whose MIB paths are fixed by `sys/sysctl.h` and need no runtime
//! resolution.

use crate::error::SysctlError;
use crate::mib::CTL_KERN;
use crate::raw::RawSysctl;
use crate::sysctl::read_raw_with;

/// `kern.osrelease` — OS release string, e.g. `13.1-RELEASE`.
pub const OSRELEASE: [i32; 2] = [CTL_KERN, 2];
/// `kern.osrevision` — operating system revision.
pub const OSREVISION: [i32; 2] = [CTL_KERN, 3];
/// `kern.version` — full kernel version string.
pub const VERSION: [i32; 2] = [CTL_KERN, 4];
/// `kern.osreldate` — kernel release date (`__FreeBSD_version` form).
pub const OSRELDATE: [i32; 2] = [CTL_KERN, 24];
/// `kern.hostuuid` — host UUID string.
pub const HOSTUUID: [i32; 2] = [CTL_KERN, 36];

pub fn osrelease_with<R: RawSysctl>(raw: &R) -> Result<String, SysctlError> {
    string_node(raw, &OSRELEASE)
}

pub fn osrevision_with<R: RawSysctl>(raw: &R) -> Result<i32, SysctlError> {
    int_node(raw, &OSREVISION)
}

pub fn version_with<R: RawSysctl>(raw: &R) -> Result<String, SysctlError> {
    string_node(raw, &VERSION)
}

pub fn osreldate_with<R: RawSysctl>(raw: &R) -> Result<i32, SysctlError> {
    int_node(raw, &OSRELDATE)
}

pub fn hostuuid_with<R: RawSysctl>(raw: &R) -> Result<String, SysctlError> {
    string_node(raw, &HOSTUUID)
}

fn string_node<R: RawSysctl>(raw: &R, mib: &[i32]) -> Result<String, SysctlError> {
    let bytes = read_raw_with(raw, mib)?;
    Ok(sysctl_abi::decode_string(&bytes)?)
}

fn int_node<R: RawSysctl>(raw: &R, mib: &[i32]) -> Result<i32, SysctlError> {
    let bytes = read_raw_with(raw, mib)?;
    Ok(sysctl_abi::decode_i32(&bytes)?)
}

/// OS release string (`kern.osrelease`).
#[cfg(target_os = "freebsd")]
pub fn osrelease() -> Result<String, SysctlError> {
    osrelease_with(&crate::raw::LibcSysctl)
}

/// OS revision (`kern.osrevision`).
#[cfg(target_os = "freebsd")]
pub fn osrevision() -> Result<i32, SysctlError> {
    osrevision_with(&crate::raw::LibcSysctl)
}

/// Full kernel version string (`kern.version`).
#[cfg(target_os = "freebsd")]
pub fn version() -> Result<String, SysctlError> {
    version_with(&crate::raw::LibcSysctl)
}

/// Kernel release date (`kern.osreldate`).
#[cfg(target_os = "freebsd")]
pub fn osreldate() -> Result<i32, SysctlError> {
    osreldate_with(&crate::raw::LibcSysctl)
}

/// Host UUID string (`kern.hostuuid`).
#[cfg(target_os = "freebsd")]
pub fn hostuuid() -> Result<String, SysctlError> {
    hostuuid_with(&crate::raw::LibcSysctl)
}
