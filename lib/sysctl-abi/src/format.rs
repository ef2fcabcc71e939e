//! # Node format descriptors
//!
//! The `{0,4}` oidfmt meta-node describes any sysctl node as a 32-bit word of
//! kind/access bits followed by a NUL-terminated format string (`"I"`, `"LU"`,
//! `"A"`, `"S,ntptimeval"`, ...). Constants follow `sys/sysctl.h`.

use crate::value::{DecodeError, Kind, decode_string, decode_u32};

/// Mask selecting the node type from the kind word.
pub const CTLTYPE_MASK: u32 = 0xf;
/// Interior node with children rather than a value.
pub const CTLTYPE_NODE: u32 = 1;
pub const CTLTYPE_INT: u32 = 2;
pub const CTLTYPE_STRING: u32 = 3;
pub const CTLTYPE_S64: u32 = 4;
pub const CTLTYPE_OPAQUE: u32 = 5;
pub const CTLTYPE_UINT: u32 = 6;
pub const CTLTYPE_LONG: u32 = 7;
pub const CTLTYPE_ULONG: u32 = 8;
pub const CTLTYPE_U64: u32 = 9;

/// Node may be read.
pub const CTLFLAG_RD: u32 = 0x8000_0000;
/// Node may be written.
pub const CTLFLAG_WR: u32 = 0x4000_0000;
pub const CTLFLAG_RW: u32 = CTLFLAG_RD | CTLFLAG_WR;

/// A node's self-described type, as returned by the oidfmt meta-node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFormat {
    kind: u32,
    format: String,
}

impl NodeFormat {
    /// Parse an oidfmt buffer: a native-endian kind word, then the format
    /// string.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < 4 {
            return Err(DecodeError::Length {
                expected: 4,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            kind: decode_u32(&bytes[..4])?,
            format: decode_string(&bytes[4..])?,
        })
    }

    /// The raw kind/access word.
    pub const fn kind_bits(&self) -> u32 {
        self.kind
    }

    /// The `CTLTYPE_*` value of this node.
    pub const fn node_type(&self) -> u32 {
        self.kind & CTLTYPE_MASK
    }

    /// The format string, e.g. `"I"` or `"S,ntptimeval"`.
    pub fn format(&self) -> &str {
        &self.format
    }

    pub const fn is_readable(&self) -> bool {
        self.kind & CTLFLAG_RD != 0
    }

    pub const fn is_writable(&self) -> bool {
        self.kind & CTLFLAG_WR != 0
    }

    /// The decode [`Kind`] this node's values should be interpreted as.
    ///
    /// `None` for interior nodes and opaque structures, which need a layout
    /// table instead. Sizes assume LP64, matching the pinned ABI.
    pub fn value_kind(&self) -> Option<Kind> {
        match self.format.as_str() {
            "I" => Some(Kind::I32),
            "IU" => Some(Kind::U32),
            "L" | "Q" => Some(Kind::I64),
            "LU" | "QU" => Some(Kind::U64),
            "A" => Some(Kind::String),
            f if f.starts_with("IK") => Some(Kind::I32),
            _ => match self.node_type() {
                CTLTYPE_INT => Some(Kind::I32),
                CTLTYPE_UINT => Some(Kind::U32),
                CTLTYPE_LONG | CTLTYPE_S64 => Some(Kind::I64),
                CTLTYPE_ULONG | CTLTYPE_U64 => Some(Kind::U64),
                CTLTYPE_STRING => Some(Kind::String),
                _ => None,
            },
        }
    }

    /// Whether this node publishes a temperature (`IK` family formats).
    pub fn is_temperature(&self) -> bool {
        self.format.starts_with("IK")
    }

    /// Convert a raw reading of a temperature node (`IK` formats, tenths of
    /// Kelvin by default) to degrees Celsius. `None` if this node is not a
    /// temperature.
    pub fn temperature_celsius(&self, raw: i32) -> Option<f64> {
        let digits = self.format.strip_prefix("IK")?;
        let scale: i32 = if digits.is_empty() {
            1
        } else {
            digits.parse().ok()?
        };
        Some(f64::from(raw) / 10f64.powi(scale) - 273.15)
    }
}
