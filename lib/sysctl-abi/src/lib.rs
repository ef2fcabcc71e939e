//! # Byte-level ABI of the FreeBSD sysctl interface
//!
//! Everything the kernel hands back through `sysctl(2)` and `ntp_gettime(2)`
//! is an untyped byte buffer; this crate turns those buffers into typed
//! values and back, without touching the kernel itself.
//!
//! ## Overview
//!
//! The crate is deliberately free of FFI so that every decode path can be
//! exercised on any host:
//!
//! * [`Kind`] / [`Value`] — the typed union a sysctl buffer decodes into
//!   (fixed-width integers, NUL-terminated strings, opaque bytes, arrays,
//!   fixed-layout records).
//! * [`RecordLayout`] / [`FieldLayout`] — explicit offset/size tables for
//!   structures whose layout is defined by an external header. Layouts are
//!   data, not `#[repr(C)]` reflection, so an ABI revision is a table edit.
//! * [`ntptimeval`] — the pinned layout and decoded form of the
//!   `ntp_gettime(2)` result record.
//! * [`NodeFormat`] — the kernel's own description of a node's type, as
//!   returned by the `{0,4}` oidfmt meta-node.
//!
//! Buffers are decoded using exactly the size the requested type implies; a
//! mismatch is a [`DecodeError`], never a truncated or zero-extended value.

mod format;
mod record;
mod value;

pub mod ntptimeval;

pub use format::{
    CTLFLAG_RD, CTLFLAG_RW, CTLFLAG_WR, CTLTYPE_INT, CTLTYPE_LONG, CTLTYPE_MASK, CTLTYPE_NODE,
    CTLTYPE_OPAQUE, CTLTYPE_S64, CTLTYPE_STRING, CTLTYPE_U64, CTLTYPE_UINT, CTLTYPE_ULONG,
    NodeFormat,
};
pub use record::{FieldKind, FieldLayout, Record, RecordLayout};
pub use value::{
    DecodeError, EncodeError, Kind, Value, decode, decode_array, decode_i32, decode_i64,
    decode_string, decode_u32, decode_u64,
};
