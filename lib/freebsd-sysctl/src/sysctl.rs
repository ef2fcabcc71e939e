//! # Reading and writing kernel parameters
//!
//! The kernel interface has no growable-buffer call, so every read is a
//! two-phase exchange: probe with a null buffer for the required size, then
//! fetch into a buffer of exactly that size. The window between the phases
//! is an inherent TOCTOU race at the interface boundary — a value can grow
//! underneath the fetch. When that happens the exchange is retried exactly
//! once with a freshly probed size; a second mismatch surfaces as
//! [`SysctlError::SizeRace`]. A consistent read is therefore not guaranteed
//! by construction, only made overwhelmingly likely; this is a known
//! limitation of the interface, not of the binding.
//!
//! Writes are single calls: the kernel applies the new buffer atomically
//! from the caller's perspective, and no partial-write state is observable.

use crate::error::SysctlError;
use crate::raw::RawSysctl;
use log::{debug, trace};
use sysctl_abi::{Kind, Value};

/// Read the raw bytes of the node at `mib`.
///
/// A node whose size probe reports zero yields an explicitly empty buffer.
pub fn read_raw_with<R: RawSysctl>(raw: &R, mib: &[i32]) -> Result<Vec<u8>, SysctlError> {
    negotiate(raw, mib, None)
}

/// Read and decode the node at `mib` as a single value of `kind`.
pub fn read_with<R: RawSysctl>(raw: &R, mib: &[i32], kind: Kind) -> Result<Value, SysctlError> {
    let bytes = read_raw_with(raw, mib)?;
    Ok(sysctl_abi::decode(kind, &bytes)?)
}

/// Read and decode the node at `mib` as an array of fixed-size elements.
pub fn read_array_with<R: RawSysctl>(
    raw: &R,
    mib: &[i32],
    elem: Kind,
) -> Result<Value, SysctlError> {
    let bytes = read_raw_with(raw, mib)?;
    Ok(sysctl_abi::decode_array(elem, &bytes)?)
}

/// Write an already-encoded buffer to the node at `mib`.
///
/// The buffer's size is not pre-validated; the kernel's own verdict (EINVAL
/// for a size or type it rejects) is surfaced as
/// [`SysctlError::InvalidValue`].
pub fn write_with<R: RawSysctl>(raw: &R, mib: &[i32], new: &[u8]) -> Result<(), SysctlError> {
    raw.query(mib, None, Some(new))
        .map(drop)
        .map_err(SysctlError::from_write_errno)
}

/// The two-phase size negotiation shared by reads and meta-node lookups.
///
/// `new`, when present, is the lookup key for meta-nodes (name-to-OID takes
/// the dotted name this way); plain value reads pass `None`.
pub(crate) fn negotiate<R: RawSysctl>(
    raw: &R,
    mib: &[i32],
    new: Option<&[u8]>,
) -> Result<Vec<u8>, SysctlError> {
    let mut needed = probe(raw, mib, new)?;
    trace!("sysctl {mib:?}: probe reported {needed} bytes");

    for attempt in 0..2 {
        if needed == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; needed];
        match raw.query(mib, Some(&mut buf), new) {
            Ok(len) => {
                // The value may have shrunk since the probe; the kernel
                // reports how many bytes it actually wrote.
                if len < buf.len() {
                    trace!("sysctl {mib:?}: value shrank to {len} bytes");
                    buf.truncate(len);
                }
                return Ok(buf);
            }
            Err(e) if e == libc::ENOMEM && attempt == 0 => {
                needed = probe(raw, mib, new)?;
                debug!("sysctl {mib:?}: value grew during fetch, retrying with {needed} bytes");
            }
            Err(e) if e == libc::ENOMEM => return Err(SysctlError::SizeRace),
            Err(e) => return Err(SysctlError::from_read_errno(e)),
        }
    }
    // Both attempts ended in a re-probe; the loop bounds make this
    // unreachable, but the kernel owns the other side of this protocol.
    Err(SysctlError::SizeRace)
}

fn probe<R: RawSysctl>(raw: &R, mib: &[i32], new: Option<&[u8]>) -> Result<usize, SysctlError> {
    raw.query(mib, None, new)
        .map_err(SysctlError::from_read_errno)
}

/// Read the raw bytes of the node at `mib`.
#[cfg(target_os = "freebsd")]
pub fn read_raw(mib: &[i32]) -> Result<Vec<u8>, SysctlError> {
    read_raw_with(&crate::raw::LibcSysctl, mib)
}

/// Read and decode the node at `mib`.
#[cfg(target_os = "freebsd")]
pub fn read(mib: &[i32], kind: Kind) -> Result<Value, SysctlError> {
    read_with(&crate::raw::LibcSysctl, mib, kind)
}

/// Read and decode the node at `mib` as an array.
#[cfg(target_os = "freebsd")]
pub fn read_array(mib: &[i32], elem: Kind) -> Result<Value, SysctlError> {
    read_array_with(&crate::raw::LibcSysctl, mib, elem)
}

/// Resolve `name` and read its node, decoded as `kind`.
#[cfg(target_os = "freebsd")]
pub fn read_by_name(name: &str, kind: Kind) -> Result<Value, SysctlError> {
    let mib = crate::mib::resolve(name)?;
    read(mib.components(), kind)
}

/// Write an already-encoded buffer to the node at `mib`.
#[cfg(target_os = "freebsd")]
pub fn write(mib: &[i32], new: &[u8]) -> Result<(), SysctlError> {
    write_with(&crate::raw::LibcSysctl, mib, new)
}

/// Resolve `name` and write an already-encoded buffer to its node.
#[cfg(target_os = "freebsd")]
pub fn write_by_name(name: &str, new: &[u8]) -> Result<(), SysctlError> {
    let mib = crate::mib::resolve(name)?;
    write(mib.components(), new)
}
