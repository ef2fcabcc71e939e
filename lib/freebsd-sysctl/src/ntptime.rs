//! # `ntp_gettime(2)`
//!
//! The C interface overloads one return value with both the call's status
//! and the clock state, while the payload arrives through an out-parameter.
//! This wrapper separates the two: a successful query yields an explicit
//! [`ClockState`] next to the decoded record, and a failed one is an error
//! that still carries whatever the kernel wrote, clearly marked unreliable.
//! Callers can no longer mistake a failed call for valid zeroed data.
//!
//! Status codes 1 through 4 are leap-second bookkeeping on a synchronized
//! clock, not failures; only `TIME_ERROR` (and a failing syscall itself)
//! takes the error arm.

use sysctl_abi::DecodeError;
use sysctl_abi::ntptimeval::{self, ClockState, NtpTimeval};

/// Status and payload of a successful time query, kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtpTime {
    /// The raw `TIME_*` code the call returned.
    pub code: i32,
    /// The decoded clock state.
    pub state: ClockState,
    /// The decoded record.
    pub timeval: NtpTimeval,
}

/// A time query that produced no trustworthy data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NtpTimeError {
    /// The kernel reported `TIME_ERROR`: the clock is not synchronized. The
    /// record it filled is attached for diagnostics but must not be trusted.
    #[error("ntp_gettime reported an unsynchronized clock (status {code})")]
    Unsynchronized { code: i32, unreliable: NtpTimeval },

    /// A status outside the known `TIME_*` range; the attached record is
    /// equally untrustworthy.
    #[error("ntp_gettime returned unknown status {code}")]
    UnknownState { code: i32, unreliable: NtpTimeval },

    /// The call itself failed before filling the record.
    #[error("ntp_gettime failed with errno {errno}")]
    Syscall { errno: i32 },

    /// The record buffer did not match the pinned layout.
    #[error("decoding the ntptimeval record failed")]
    Decode(#[from] DecodeError),
}

/// Interpret a raw return code and record buffer.
///
/// This is the full decoding path of [`ntp_gettime`] minus the kernel call,
/// usable wherever the raw pieces are already at hand.
pub fn interpret(code: i32, bytes: &[u8]) -> Result<NtpTime, NtpTimeError> {
    let timeval = NtpTimeval::decode(bytes)?;
    match ClockState::from_code(code) {
        Some(state) => Ok(NtpTime {
            code,
            state,
            timeval,
        }),
        None if code == ntptimeval::TIME_ERROR => Err(NtpTimeError::Unsynchronized {
            code,
            unreliable: timeval,
        }),
        None => Err(NtpTimeError::UnknownState {
            code,
            unreliable: timeval,
        }),
    }
}

#[cfg(target_os = "freebsd")]
unsafe extern "C" {
    // Declared locally rather than through the libc crate: the record is
    // decoded from raw bytes through the pinned layout table, so the
    // argument is an untyped buffer on purpose.
    #[link_name = "ntp_gettime"]
    fn libc_ntp_gettime(ntv: *mut libc::c_void) -> libc::c_int;
}

/// Query the kernel's NTP time state.
#[cfg(target_os = "freebsd")]
pub fn ntp_gettime() -> Result<NtpTime, NtpTimeError> {
    // The kernel writes a real ntptimeval; give it a correctly aligned spot.
    #[repr(align(8))]
    struct Aligned([u8; ntptimeval::SIZE]);
    let mut buf = Aligned([0; ntptimeval::SIZE]);

    // SAFETY: the buffer is writable, aligned for the kernel's ntptimeval,
    // and at least as large as the pinned layout says the structure is.
    let code = unsafe { libc_ntp_gettime(buf.0.as_mut_ptr().cast::<libc::c_void>()) };
    if code < 0 {
        return Err(NtpTimeError::Syscall {
            errno: crate::raw::errno(),
        });
    }
    interpret(code, &buf.0)
}
