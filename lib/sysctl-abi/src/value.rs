//! # Typed sysctl values
//!
//! A sysctl buffer carries no type information of its own; the caller (or the
//! node's published format) supplies a [`Kind`], and [`decode`] interprets
//! the bytes accordingly. Integers use native byte order, strings end at the
//! first NUL, and any size mismatch is an error rather than a guess.

use crate::record::Record;
use core::fmt;

/// Expected wire type of a sysctl buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Native-endian signed 32-bit integer (`int`).
    I32,
    /// Native-endian unsigned 32-bit integer (`unsigned int`).
    U32,
    /// Native-endian signed 64-bit integer (`long` on LP64, `int64_t`).
    I64,
    /// Native-endian unsigned 64-bit integer.
    U64,
    /// NUL-terminated byte string.
    String,
    /// Raw bytes, passed through unchanged.
    Bytes,
}

impl Kind {
    /// Wire size in bytes, for kinds that have a fixed one.
    #[must_use]
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::I32 | Self::U32 => Some(4),
            Self::I64 | Self::U64 => Some(8),
            Self::String | Self::Bytes => None,
        }
    }
}

/// A decoded sysctl value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    /// String value with the terminator already stripped.
    String(String),
    /// Opaque value with no registered decoder.
    Bytes(Vec<u8>),
    /// Homogeneous array of fixed-size elements.
    Array(Vec<Value>),
    /// Fixed-layout record decoded through a [`crate::RecordLayout`] table.
    Record(Record),
}

impl Value {
    /// Byte image of the value, as `sysctl(2)` expects it for a set call.
    ///
    /// Integers are emitted in native byte order; strings carry their
    /// terminating NUL. Records have no layout-independent image and cannot
    /// be encoded here.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        match self {
            Self::I32(v) => Ok(v.to_ne_bytes().to_vec()),
            Self::U32(v) => Ok(v.to_ne_bytes().to_vec()),
            Self::I64(v) => Ok(v.to_ne_bytes().to_vec()),
            Self::U64(v) => Ok(v.to_ne_bytes().to_vec()),
            Self::String(s) => {
                if s.as_bytes().contains(&0) {
                    return Err(EncodeError::InteriorNul);
                }
                let mut out = Vec::with_capacity(s.len() + 1);
                out.extend_from_slice(s.as_bytes());
                out.push(0);
                Ok(out)
            }
            Self::Bytes(b) => Ok(b.clone()),
            Self::Array(items) => {
                let mut out = Vec::new();
                for item in items {
                    out.extend(item.encode()?);
                }
                Ok(out)
            }
            Self::Record(_) => Err(EncodeError::RecordWithoutLayout),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::Bytes(b) => {
                for byte in b {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Record(r) => write!(f, "{r}"),
        }
    }
}

/// A buffer could not be interpreted as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("buffer holds {actual} bytes where the type requires exactly {expected}")]
    Length { expected: usize, actual: usize },
    #[error("buffer length {len} is not a multiple of the {elem}-byte element size")]
    Misaligned { len: usize, elem: usize },
    #[error("array elements of kind {0:?} have no fixed size")]
    UnsizedElement(Kind),
    #[error("field `{field}` lies outside the {len}-byte buffer")]
    FieldOutOfBounds { field: &'static str, len: usize },
    #[error("string value is not valid UTF-8")]
    Utf8(#[source] core::str::Utf8Error),
}

/// A value has no byte image suitable for a set call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("a record value can only be encoded through its layout table")]
    RecordWithoutLayout,
    #[error("a string value with an interior NUL cannot be written")]
    InteriorNul,
}

/// Decode `bytes` as a single value of the given kind.
pub fn decode(kind: Kind, bytes: &[u8]) -> Result<Value, DecodeError> {
    match kind {
        Kind::I32 => decode_i32(bytes).map(Value::I32),
        Kind::U32 => decode_u32(bytes).map(Value::U32),
        Kind::I64 => decode_i64(bytes).map(Value::I64),
        Kind::U64 => decode_u64(bytes).map(Value::U64),
        Kind::String => decode_string(bytes).map(Value::String),
        Kind::Bytes => Ok(Value::Bytes(bytes.to_vec())),
    }
}

/// Decode `bytes` as an ordered array of fixed-size elements.
///
/// The element count is `bytes.len() / element size`; a remainder is an
/// error, and an empty buffer is an empty array.
pub fn decode_array(elem: Kind, bytes: &[u8]) -> Result<Value, DecodeError> {
    let size = elem.fixed_size().ok_or(DecodeError::UnsizedElement(elem))?;
    if bytes.len() % size != 0 {
        return Err(DecodeError::Misaligned {
            len: bytes.len(),
            elem: size,
        });
    }
    let mut items = Vec::with_capacity(bytes.len() / size);
    for chunk in bytes.chunks_exact(size) {
        items.push(decode(elem, chunk)?);
    }
    Ok(Value::Array(items))
}

/// Decode a native-endian `int`; the buffer must be exactly four bytes.
pub fn decode_i32(bytes: &[u8]) -> Result<i32, DecodeError> {
    exact(bytes).map(i32::from_ne_bytes)
}

/// Decode a native-endian `unsigned int`; the buffer must be exactly four bytes.
pub fn decode_u32(bytes: &[u8]) -> Result<u32, DecodeError> {
    exact(bytes).map(u32::from_ne_bytes)
}

/// Decode a native-endian 64-bit integer; the buffer must be exactly eight bytes.
pub fn decode_i64(bytes: &[u8]) -> Result<i64, DecodeError> {
    exact(bytes).map(i64::from_ne_bytes)
}

/// Decode a native-endian unsigned 64-bit integer; the buffer must be exactly eight bytes.
pub fn decode_u64(bytes: &[u8]) -> Result<u64, DecodeError> {
    exact(bytes).map(u64::from_ne_bytes)
}

/// Decode a NUL-terminated string.
///
/// The value ends at the first NUL; anything after it (the kernel pads some
/// string nodes) is not part of the value. A buffer without a terminator is
/// taken whole, and an empty buffer is the empty string.
pub fn decode_string(bytes: &[u8]) -> Result<String, DecodeError> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    let s = core::str::from_utf8(&bytes[..end]).map_err(DecodeError::Utf8)?;
    Ok(s.to_owned())
}

fn exact<const N: usize>(bytes: &[u8]) -> Result<[u8; N], DecodeError> {
    bytes.try_into().map_err(|_| DecodeError::Length {
        expected: N,
        actual: bytes.len(),
    })
}
