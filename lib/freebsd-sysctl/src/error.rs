//! # Error taxonomy
//!
//! Every kernel failure carries its native errno verbatim; nothing is masked
//! or renumbered. The mapping from errno to variant differs between the get
//! and set sides of the interface, so each has its own constructor.

use sysctl_abi::DecodeError;

/// Failures surfaced by sysctl reads, writes, and name resolution.
#[derive(Debug, thiserror::Error)]
pub enum SysctlError {
    /// The kernel has no node for the requested name or MIB path.
    #[error("no sysctl node matches the requested name or MIB path (errno {errno})")]
    UnknownNode { errno: i32 },

    /// The caller lacks the privilege this node requires.
    #[error("the calling process may not access this sysctl node (errno {errno})")]
    PermissionDenied { errno: i32 },

    /// A set call on a node that does not accept writes.
    #[error("the sysctl node is read-only (errno {errno})")]
    ReadOnly { errno: i32 },

    /// The kernel rejected the supplied value, typically a size or type
    /// mismatch it detected itself.
    #[error("the kernel rejected the supplied value (errno {errno})")]
    InvalidValue { errno: i32 },

    /// The value's size kept changing between the size probe and the fetch;
    /// the single permitted retry was already spent.
    #[error("the value size kept changing between the size probe and the fetch")]
    SizeRace,

    /// A name failed validation before any kernel call was made.
    #[error("the sysctl name is empty or contains an interior NUL")]
    InvalidName,

    /// A MIB path failed validation before any kernel call was made.
    #[error("a MIB path must have 1 to 24 non-negative components")]
    InvalidMib,

    /// The kernel's buffer could not be decoded as the expected type.
    #[error("decoding the returned buffer failed")]
    Decode(#[from] DecodeError),

    /// Any other kernel failure, errno preserved.
    #[error("the kernel call failed with errno {errno}")]
    Native { errno: i32 },
}

impl SysctlError {
    /// Classify an errno reported by a get-side call.
    pub(crate) fn from_read_errno(errno: i32) -> Self {
        match errno {
            libc::ENOENT | libc::ENOTDIR | libc::EISDIR => Self::UnknownNode { errno },
            libc::EPERM | libc::EACCES => Self::PermissionDenied { errno },
            _ => Self::Native { errno },
        }
    }

    /// Classify an errno reported by a set-side call. The kernel reports
    /// EPERM for a write to a read-only node and EACCES for a privilege
    /// failure; EINVAL is its own verdict on the supplied buffer.
    pub(crate) fn from_write_errno(errno: i32) -> Self {
        match errno {
            libc::ENOENT | libc::ENOTDIR | libc::EISDIR => Self::UnknownNode { errno },
            libc::EPERM => Self::ReadOnly { errno },
            libc::EACCES => Self::PermissionDenied { errno },
            libc::EINVAL => Self::InvalidValue { errno },
            _ => Self::Native { errno },
        }
    }

    /// The native errno behind this error, where one exists.
    pub const fn errno(&self) -> Option<i32> {
        match *self {
            Self::UnknownNode { errno }
            | Self::PermissionDenied { errno }
            | Self::ReadOnly { errno }
            | Self::InvalidValue { errno }
            | Self::Native { errno } => Some(errno),
            Self::SizeRace | Self::InvalidName | Self::InvalidMib | Self::Decode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_side_errno_classification() {
        assert!(matches!(
            SysctlError::from_read_errno(libc::ENOENT),
            SysctlError::UnknownNode { errno } if errno == libc::ENOENT
        ));
        assert!(matches!(
            SysctlError::from_read_errno(libc::EPERM),
            SysctlError::PermissionDenied { .. }
        ));
        assert!(matches!(
            SysctlError::from_read_errno(libc::EIO),
            SysctlError::Native { errno } if errno == libc::EIO
        ));
    }

    #[test]
    fn write_side_eperm_means_read_only() {
        assert!(matches!(
            SysctlError::from_write_errno(libc::EPERM),
            SysctlError::ReadOnly { .. }
        ));
        assert!(matches!(
            SysctlError::from_write_errno(libc::EINVAL),
            SysctlError::InvalidValue { .. }
        ));
    }

    #[test]
    fn errno_is_reported_verbatim() {
        assert_eq!(
            SysctlError::from_read_errno(libc::EACCES).errno(),
            Some(libc::EACCES)
        );
        assert_eq!(SysctlError::SizeRace.errno(), None);
    }
}
