//! # MIB paths and the sysctl meta-interface
//!
//! A node is addressed by its MIB path, an ordered sequence of non-negative
//! integers. Dotted names are resolved to paths through the kernel's own
//! `{0,3}` name-to-OID node, and a node's self-described type is fetched
//! through the `{0,4}` oidfmt node; both are ordinary reads that pass the
//! lookup key as the "new value" buffer.

use crate::error::SysctlError;
use crate::raw::RawSysctl;
use core::fmt;
use log::trace;
use sysctl_abi::NodeFormat;

/// Deepest path the kernel accepts (`CTL_MAXNAME`).
pub const CTL_MAXNAME: usize = 24;

/// Top-level `kern` namespace (`CTL_KERN`).
pub const CTL_KERN: i32 = 1;

/// `{0,3}`: the name-to-OID meta-node.
const NAME2OID: [i32; 2] = [0, 3];
/// `{0,4}`: the oidfmt meta-node, prefixed onto the queried path.
const OIDFMT: [i32; 2] = [0, 4];

const OID_BYTES: usize = size_of::<i32>();

/// Resolved numeric path of one sysctl node.
///
/// Immutable once constructed; resolution of the same name yields the same
/// path for the lifetime of a boot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mib(Vec<i32>);

impl Mib {
    /// Build a path from explicit components, validating depth and sign.
    pub fn new(components: &[i32]) -> Result<Self, SysctlError> {
        if components.is_empty()
            || components.len() > CTL_MAXNAME
            || components.iter().any(|&c| c < 0)
        {
            return Err(SysctlError::InvalidMib);
        }
        Ok(Self(components.to_vec()))
    }

    /// The numeric components of this path.
    pub fn components(&self) -> &[i32] {
        &self.0
    }
}

impl fmt::Display for Mib {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Resolve a dotted name to its MIB path through the name-to-OID node.
///
/// The name goes out as the lookup key; the reply is the path as an array of
/// native-endian `int`s, sized by the usual two-phase negotiation.
pub fn resolve_with<R: RawSysctl>(raw: &R, name: &str) -> Result<Mib, SysctlError> {
    if name.is_empty() || name.as_bytes().contains(&0) {
        return Err(SysctlError::InvalidName);
    }
    let bytes = crate::sysctl::negotiate(raw, &NAME2OID, Some(name.as_bytes()))?;

    let chunks = bytes.chunks_exact(OID_BYTES);
    if !chunks.remainder().is_empty() {
        return Err(SysctlError::Decode(sysctl_abi::DecodeError::Misaligned {
            len: bytes.len(),
            elem: OID_BYTES,
        }));
    }
    let mut components = Vec::with_capacity(bytes.len() / OID_BYTES);
    for chunk in chunks {
        let mut word = [0u8; OID_BYTES];
        word.copy_from_slice(chunk);
        components.push(i32::from_ne_bytes(word));
    }
    trace!("resolved {name:?} to {components:?}");
    Mib::new(&components)
}

/// Fetch the kernel's own format descriptor for the node at `mib`.
pub fn format_of_with<R: RawSysctl>(raw: &R, mib: &[i32]) -> Result<NodeFormat, SysctlError> {
    let mut query = Vec::with_capacity(OIDFMT.len() + mib.len());
    query.extend_from_slice(&OIDFMT);
    query.extend_from_slice(mib);
    let bytes = crate::sysctl::negotiate(raw, &query, None)?;
    Ok(NodeFormat::parse(&bytes)?)
}

/// Resolve a dotted name to its MIB path.
#[cfg(target_os = "freebsd")]
pub fn resolve(name: &str) -> Result<Mib, SysctlError> {
    resolve_with(&crate::raw::LibcSysctl, name)
}

/// Fetch the kernel's format descriptor for the node at `mib`.
#[cfg(target_os = "freebsd")]
pub fn format_of(mib: &[i32]) -> Result<NodeFormat, SysctlError> {
    format_of_with(&crate::raw::LibcSysctl, mib)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_render_dotted() {
        let mib = Mib::new(&[1, 24]).unwrap();
        assert_eq!(mib.to_string(), "1.24");
    }

    #[test]
    fn empty_and_negative_paths_are_rejected() {
        assert!(matches!(Mib::new(&[]), Err(SysctlError::InvalidMib)));
        assert!(matches!(Mib::new(&[1, -2]), Err(SysctlError::InvalidMib)));
    }

    #[test]
    fn overdeep_paths_are_rejected() {
        let too_deep = vec![1; CTL_MAXNAME + 1];
        assert!(matches!(Mib::new(&too_deep), Err(SysctlError::InvalidMib)));
    }
}
