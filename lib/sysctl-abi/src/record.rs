//! # Fixed-layout record decoding
//!
//! Opaque sysctl nodes and `ntp_gettime(2)` return structures whose layout
//! is defined by a system header the decoder does not control. Each layout is
//! written down as an explicit offset/size table ([`RecordLayout`]) so the
//! assumed ABI is visible, versionable, and checkable, instead of being
//! implied by a `#[repr(C)]` mirror of the header.

use crate::value::{DecodeError, Value};
use core::fmt;

/// Width and signedness of one field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I32,
    U32,
    I64,
    U64,
}

impl FieldKind {
    /// Wire width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Self::I32 | Self::U32 => 4,
            Self::I64 | Self::U64 => 8,
        }
    }
}

/// One field of an externally-defined structure.
#[derive(Debug, Clone, Copy)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

impl FieldLayout {
    /// Read this field out of a record buffer.
    pub fn read(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        match self.kind {
            FieldKind::I32 => self.read_i32(bytes).map(Value::I32),
            FieldKind::U32 => self.read_u32(bytes).map(Value::U32),
            FieldKind::I64 => self.read_i64(bytes).map(Value::I64),
            FieldKind::U64 => self.read_u64(bytes).map(Value::U64),
        }
    }

    pub fn read_i32(&self, bytes: &[u8]) -> Result<i32, DecodeError> {
        self.window::<4>(bytes).map(i32::from_ne_bytes)
    }

    pub fn read_u32(&self, bytes: &[u8]) -> Result<u32, DecodeError> {
        self.window::<4>(bytes).map(u32::from_ne_bytes)
    }

    pub fn read_i64(&self, bytes: &[u8]) -> Result<i64, DecodeError> {
        self.window::<8>(bytes).map(i64::from_ne_bytes)
    }

    pub fn read_u64(&self, bytes: &[u8]) -> Result<u64, DecodeError> {
        self.window::<8>(bytes).map(u64::from_ne_bytes)
    }

    fn window<const N: usize>(&self, bytes: &[u8]) -> Result<[u8; N], DecodeError> {
        debug_assert_eq!(N, self.kind.width());
        let win = bytes
            .get(self.offset..self.offset + N)
            .ok_or(DecodeError::FieldOutOfBounds {
                field: self.name,
                len: bytes.len(),
            })?;
        let mut out = [0u8; N];
        out.copy_from_slice(win);
        Ok(out)
    }
}

/// Byte layout of an externally-defined structure, pinned to one ABI revision.
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    /// Name of the C structure this table mirrors.
    pub name: &'static str,
    /// Total size of the structure, padding included.
    pub size: usize,
    pub fields: &'static [FieldLayout],
}

impl RecordLayout {
    /// Decode a buffer that must be exactly [`size`](Self::size) bytes long.
    pub fn decode(&self, bytes: &[u8]) -> Result<Record, DecodeError> {
        if bytes.len() != self.size {
            return Err(DecodeError::Length {
                expected: self.size,
                actual: bytes.len(),
            });
        }
        let mut fields = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            fields.push((field.name, field.read(bytes)?));
        }
        Ok(Record {
            type_name: self.name,
            fields,
        })
    }
}

/// A decoded record: field names and values in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub type_name: &'static str,
    pub fields: Vec<(&'static str, Value)>,
}

impl Record {
    /// Value of the named field, if the layout has one.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}={value}")?;
        }
        f.write_str(" }")
    }
}
