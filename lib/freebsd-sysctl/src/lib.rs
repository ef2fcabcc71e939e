//! # FreeBSD kernel-interface bindings
//!
//! Thin, typed bindings over a handful of FreeBSD libc/kernel calls:
//! `sysctl(2)` reads and writes with the two-phase size negotiation the
//! interface requires, dotted-name resolution, node format introspection,
//! `ntp_gettime(2)` with status and payload separated, `setproctitle(3)`,
//! and shortcuts for the well-known `kern.*` scalars.
//!
//! ## Overview
//!
//! Every operation is a single, stateless, blocking request against the
//! kernel; there is no session or handle to manage, and concurrent calls are
//! independent because each owns its transient buffer. Failures carry the
//! native errno verbatim in a typed [`SysctlError`].
//!
//! The one moving part is the size negotiation: the kernel reports a value's
//! size in one call and hands out the bytes in another, so a value can grow
//! in between. The reader retries that race exactly once and then reports
//! [`SysctlError::SizeRace`]; see [`sysctl`] for the full contract.
//!
//! ## Structure
//!
//! * [`raw`] — the [`RawSysctl`] seam: one trait method wrapping one
//!   `sysctl(2)` invocation. Everything above it is generic over the seam and
//!   runs against a scripted fake in this crate's tests; only the
//!   `LibcSysctl` backend is FreeBSD-only.
//! * [`sysctl`] — two-phase reads, typed decoding, writes.
//! * [`mib`] — MIB paths, name-to-OID resolution, oidfmt introspection.
//! * [`kern`] — pre-resolved `kern.*` shortcuts.
//! * [`ntptime`] / [`proctitle`] — the two non-sysctl calls.
//!
//! Byte-level decoding lives in the `sysctl-abi` crate; the assumed ABI
//! (FreeBSD 13.x/14.x, LP64) is pinned there as explicit layout tables.

pub mod error;
pub mod kern;
pub mod mib;
pub mod ntptime;
pub mod proctitle;
pub mod raw;
pub mod sysctl;

pub use error::SysctlError;
pub use mib::Mib;
pub use ntptime::{NtpTime, NtpTimeError};
pub use proctitle::TitleError;
pub use raw::RawSysctl;

#[cfg(target_os = "freebsd")]
pub use raw::LibcSysctl;

pub use sysctl_abi::{Kind, NodeFormat, Value};
