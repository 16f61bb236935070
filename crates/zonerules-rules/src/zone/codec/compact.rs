//! Variable-length encodings of offsets and epoch seconds.
//!
//! Offset: one signed byte holding the offset in quarter hours, or the
//! escape byte `127` followed by the offset in seconds as an `i32`.
//!
//! Epoch second: three bytes holding quarter hours since
//! [`EPOCH_WINDOW_BASE`] seconds before 1970, for quarter-hour aligned values
//! inside the window, or the escape byte `255` followed by an `i64`.

use bytes::{Buf, BufMut};
use zonerules_core::constants::{
    EPOCH_ESCAPE, EPOCH_WINDOW_BASE, EPOCH_WINDOW_END, OFFSET_ESCAPE, QUARTER_HOUR_SECONDS,
};

use super::error::{CodecError, CodecResult};
use crate::zone::core::UtcOffset;

/// Fails unless `buf` holds at least `needed` more bytes.
pub(super) fn ensure_remaining(buf: &impl Buf, needed: usize) -> CodecResult<()> {
    if buf.remaining() < needed {
        return Err(CodecError::Truncated {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

pub(super) fn get_i32(buf: &mut impl Buf) -> CodecResult<i32> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_i32())
}

pub(super) fn get_u32(buf: &mut impl Buf) -> CodecResult<u32> {
    ensure_remaining(buf, 4)?;
    Ok(buf.get_u32())
}

pub(super) fn get_u8(buf: &mut impl Buf) -> CodecResult<u8> {
    ensure_remaining(buf, 1)?;
    Ok(buf.get_u8())
}

pub(super) fn put_offset(buf: &mut impl BufMut, offset: UtcOffset) {
    let seconds = offset.seconds();
    match i8::try_from(seconds / QUARTER_HOUR_SECONDS) {
        Ok(quarters) if seconds % QUARTER_HOUR_SECONDS == 0 && quarters != OFFSET_ESCAPE => {
            buf.put_i8(quarters);
        }
        _ => {
            buf.put_i8(OFFSET_ESCAPE);
            buf.put_i32(seconds);
        }
    }
}

/// ## Errors
/// Returns [`CodecError::Truncated`] on short input and
/// [`CodecError::Invalid`] for an offset beyond 18 hours.
pub(super) fn get_offset(buf: &mut impl Buf) -> CodecResult<UtcOffset> {
    ensure_remaining(buf, 1)?;
    let byte = buf.get_i8();
    let seconds = if byte == OFFSET_ESCAPE {
        get_i32(buf)?
    } else {
        i32::from(byte) * QUARTER_HOUR_SECONDS
    };
    Ok(UtcOffset::from_seconds(seconds)?)
}

pub(super) fn put_epoch_second(buf: &mut impl BufMut, epoch_second: i64) {
    let quarter = i64::from(QUARTER_HOUR_SECONDS);
    if (-EPOCH_WINDOW_BASE..EPOCH_WINDOW_END).contains(&epoch_second)
        && epoch_second % quarter == 0
    {
        // Below 0xFF_0000 inside the window, so the first byte is never the escape
        let store = (epoch_second + EPOCH_WINDOW_BASE) / quarter;
        buf.put_uint(store.unsigned_abs(), 3);
    } else {
        buf.put_u8(EPOCH_ESCAPE);
        buf.put_i64(epoch_second);
    }
}

pub(super) fn get_epoch_second(buf: &mut impl Buf) -> CodecResult<i64> {
    let first = get_u8(buf)?;
    if first == EPOCH_ESCAPE {
        ensure_remaining(buf, 8)?;
        return Ok(buf.get_i64());
    }
    ensure_remaining(buf, 2)?;
    let quarters = (i64::from(first) << 16) | i64::from(buf.get_u16());
    Ok(quarters * i64::from(QUARTER_HOUR_SECONDS) - EPOCH_WINDOW_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_bytes(seconds: i32) -> Vec<u8> {
        let mut out = Vec::new();
        put_offset(&mut out, UtcOffset::from_seconds(seconds).unwrap());
        out
    }

    fn epoch_bytes(epoch_second: i64) -> Vec<u8> {
        let mut out = Vec::new();
        put_epoch_second(&mut out, epoch_second);
        out
    }

    #[test]
    fn test_quarter_hour_offsets_use_one_byte() {
        assert_eq!(offset_bytes(3600), vec![4]);
        assert_eq!(offset_bytes(-18_000), vec![0xEC]);
        assert_eq!(offset_bytes(0), vec![0]);
        for quarters in -72..=72 {
            let bytes = offset_bytes(quarters * 900);
            assert_eq!(bytes.len(), 1);
            assert_eq!(get_offset(&mut bytes.as_slice()).unwrap().seconds(), quarters * 900);
        }
    }

    #[test]
    fn test_odd_offset_uses_escape() {
        let bytes = offset_bytes(12_345);
        assert_eq!(bytes, vec![127, 0, 0, 0x30, 0x39]);
        assert_eq!(get_offset(&mut bytes.as_slice()).unwrap().seconds(), 12_345);
    }

    #[test]
    fn test_aligned_epoch_uses_three_bytes() {
        let bytes = epoch_bytes(0);
        assert_eq!(bytes.len(), 3);
        assert_eq!(get_epoch_second(&mut bytes.as_slice()).unwrap(), 0);

        let bytes = epoch_bytes(1_679_792_400);
        assert_eq!(bytes.len(), 3);
        assert_eq!(get_epoch_second(&mut bytes.as_slice()).unwrap(), 1_679_792_400);
    }

    #[test]
    fn test_window_edges() {
        let first = epoch_bytes(-EPOCH_WINDOW_BASE);
        assert_eq!(first, vec![0, 0, 0]);

        let last = epoch_bytes(EPOCH_WINDOW_END - 900);
        assert_eq!(last.len(), 3);
        assert_ne!(last[0], EPOCH_ESCAPE);
        assert_eq!(
            get_epoch_second(&mut last.as_slice()).unwrap(),
            EPOCH_WINDOW_END - 900
        );

        assert_eq!(epoch_bytes(EPOCH_WINDOW_END).len(), 9);
        assert_eq!(epoch_bytes(-EPOCH_WINDOW_BASE - 900).len(), 9);
    }

    #[test]
    fn test_unaligned_epoch_uses_escape() {
        let bytes = epoch_bytes(1_679_792_401);
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], EPOCH_ESCAPE);
        assert_eq!(get_epoch_second(&mut bytes.as_slice()).unwrap(), 1_679_792_401);
    }

    #[test]
    fn test_epoch_split_across_chunks() {
        for epoch_second in [1_679_792_400, 1_679_792_401] {
            let bytes = epoch_bytes(epoch_second);
            for split in 0..=bytes.len() {
                let mut chained = (&bytes[..split]).chain(&bytes[split..]);
                assert_eq!(get_epoch_second(&mut chained).unwrap(), epoch_second);
                assert!(!chained.has_remaining());
            }
        }
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(
            get_epoch_second(&mut [0_u8, 1].as_slice()),
            Err(CodecError::Truncated {
                needed: 2,
                remaining: 1
            })
        );
        assert_eq!(
            get_offset(&mut [127_u8, 0, 0].as_slice()),
            Err(CodecError::Truncated {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_offset_beyond_limit_is_invalid() {
        let mut bytes: &[u8] = &[100];
        assert!(matches!(get_offset(&mut bytes), Err(CodecError::Invalid(_))));
    }
}
