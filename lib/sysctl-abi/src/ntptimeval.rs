//! # `ntptimeval` layout
//!
//! Layout of `struct ntptimeval` as shipped in `sys/timex.h` on FreeBSD
//! 13.x/14.x for LP64 targets:
//!
//! | field        | offset | type           |
//! |--------------|--------|----------------|
//! | `time.tv_sec`  | 0    | `time_t` (i64) |
//! | `time.tv_nsec` | 8    | `long`         |
//! | `maxerror`     | 16   | `long`         |
//! | `esterror`     | 24   | `long`         |
//! | `tai`          | 32   | `long`         |
//! | `time_state`   | 40   | `int`          |
//! | padding        | 44   | 4 bytes        |
//!
//! Older manual pages describe a `timeval`-based variant of this structure;
//! the shipped header wins. Porting to another ABI revision means editing
//! [`LAYOUT`] and [`SIZE`], nothing else.

use crate::record::{FieldKind, FieldLayout, RecordLayout};
use crate::value::DecodeError;

/// Total size of the structure, tail padding included.
pub const SIZE: usize = 48;

const TIME_SEC: FieldLayout = FieldLayout {
    name: "time.tv_sec",
    offset: 0,
    kind: FieldKind::I64,
};
const TIME_NSEC: FieldLayout = FieldLayout {
    name: "time.tv_nsec",
    offset: 8,
    kind: FieldKind::I64,
};
const MAXERROR: FieldLayout = FieldLayout {
    name: "maxerror",
    offset: 16,
    kind: FieldKind::I64,
};
const ESTERROR: FieldLayout = FieldLayout {
    name: "esterror",
    offset: 24,
    kind: FieldKind::I64,
};
const TAI: FieldLayout = FieldLayout {
    name: "tai",
    offset: 32,
    kind: FieldKind::I64,
};
const TIME_STATE: FieldLayout = FieldLayout {
    name: "time_state",
    offset: 40,
    kind: FieldKind::I32,
};

/// The full offset table, usable with the generic record decoder.
pub const LAYOUT: RecordLayout = RecordLayout {
    name: "ntptimeval",
    size: SIZE,
    fields: &[TIME_SEC, TIME_NSEC, MAXERROR, ESTERROR, TAI, TIME_STATE],
};

/// `ntp_gettime(2)` return codes (`sys/timex.h`).
pub const TIME_OK: i32 = 0;
pub const TIME_INS: i32 = 1;
pub const TIME_DEL: i32 = 2;
pub const TIME_OOP: i32 = 3;
pub const TIME_WAIT: i32 = 4;
pub const TIME_ERROR: i32 = 5;

/// Decoded `struct ntptimeval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtpTimeval {
    /// Current time, seconds part.
    pub seconds: i64,
    /// Current time, nanoseconds part.
    pub nanoseconds: i64,
    /// Maximum error bound, microseconds.
    pub max_error: i64,
    /// Estimated error, microseconds.
    pub est_error: i64,
    /// Offset between TAI and UTC, seconds.
    pub tai_offset: i64,
    /// Clock state the kernel recorded into the structure itself; the call's
    /// own return code is reported separately by the caller.
    pub time_state: i32,
}

impl NtpTimeval {
    /// Decode a buffer of exactly [`SIZE`] bytes through [`LAYOUT`].
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != SIZE {
            return Err(DecodeError::Length {
                expected: SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            seconds: TIME_SEC.read_i64(bytes)?,
            nanoseconds: TIME_NSEC.read_i64(bytes)?,
            max_error: MAXERROR.read_i64(bytes)?,
            est_error: ESTERROR.read_i64(bytes)?,
            tai_offset: TAI.read_i64(bytes)?,
            time_state: TIME_STATE.read_i32(bytes)?,
        })
    }
}

/// Clock states a successful `ntp_gettime(2)` can report.
///
/// `TIME_ERROR` is deliberately absent: an unsynchronized clock is a failed
/// query, not a state a caller should treat as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Clock synchronized, no pending leap second (`TIME_OK`).
    Synchronized,
    /// A leap second will be inserted at the end of the day (`TIME_INS`).
    InsertPending,
    /// A leap second will be deleted at the end of the day (`TIME_DEL`).
    DeletePending,
    /// A leap second insertion is in progress (`TIME_OOP`).
    LeapInProgress,
    /// A leap second has recently been inserted or deleted (`TIME_WAIT`).
    LeapOccurred,
}

impl ClockState {
    /// Map a raw return code onto a state; `None` for `TIME_ERROR` and
    /// anything outside the known range.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            TIME_OK => Some(Self::Synchronized),
            TIME_INS => Some(Self::InsertPending),
            TIME_DEL => Some(Self::DeletePending),
            TIME_OOP => Some(Self::LeapInProgress),
            TIME_WAIT => Some(Self::LeapOccurred),
            _ => None,
        }
    }

    /// The raw `TIME_*` code for this state.
    pub const fn code(self) -> i32 {
        match self {
            Self::Synchronized => TIME_OK,
            Self::InsertPending => TIME_INS,
            Self::DeletePending => TIME_DEL,
            Self::LeapInProgress => TIME_OOP,
            Self::LeapOccurred => TIME_WAIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn sample_bytes(
        seconds: i64,
        nanoseconds: i64,
        max_error: i64,
        est_error: i64,
        tai_offset: i64,
        time_state: i32,
    ) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SIZE);
        buf.extend_from_slice(&seconds.to_ne_bytes());
        buf.extend_from_slice(&nanoseconds.to_ne_bytes());
        buf.extend_from_slice(&max_error.to_ne_bytes());
        buf.extend_from_slice(&est_error.to_ne_bytes());
        buf.extend_from_slice(&tai_offset.to_ne_bytes());
        buf.extend_from_slice(&time_state.to_ne_bytes());
        buf.extend_from_slice(&[0; 4]); // tail padding
        buf
    }

    #[test]
    fn decodes_every_field() {
        let buf = sample_bytes(1_700_000_000, 123_456_789, 250_000, 1_500, 37, TIME_OK);
        let tv = NtpTimeval::decode(&buf).unwrap();
        assert_eq!(tv.seconds, 1_700_000_000);
        assert_eq!(tv.nanoseconds, 123_456_789);
        assert_eq!(tv.max_error, 250_000);
        assert_eq!(tv.est_error, 1_500);
        assert_eq!(tv.tai_offset, 37);
        assert_eq!(tv.time_state, TIME_OK);
    }

    #[test]
    fn rejects_short_and_long_buffers() {
        assert!(NtpTimeval::decode(&[0; 44]).is_err());
        assert!(NtpTimeval::decode(&[0; 56]).is_err());
    }

    #[test]
    fn generic_record_decode_agrees_with_the_table() {
        let buf = sample_bytes(10, 20, 30, 40, 50, TIME_INS);
        let rec = LAYOUT.decode(&buf).unwrap();
        assert_eq!(rec.get("time.tv_sec"), Some(&Value::I64(10)));
        assert_eq!(rec.get("time_state"), Some(&Value::I32(TIME_INS)));
    }

    #[test]
    fn state_codes_map_both_ways() {
        for code in TIME_OK..=TIME_WAIT {
            let state = ClockState::from_code(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert_eq!(ClockState::from_code(TIME_ERROR), None);
        assert_eq!(ClockState::from_code(-1), None);
        assert_eq!(ClockState::from_code(99), None);
    }
}
