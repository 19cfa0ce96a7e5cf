//! One decode function per primitive wire tag (spec §4.3).

use std::time::{Duration, SystemTime};

use crate::binary::Reader;
use crate::error::{DecodeError, RelayResult};

pub fn decode_chr(r: &mut Reader) -> RelayResult<u8> {
    r.be_u8()
}

pub fn decode_int(r: &mut Reader) -> RelayResult<i32> {
    r.be_i32()
}

/// `lon`: 1-byte length, then that many ASCII decimal digits (may start
/// with `-`). Stored as `i128` rather than `i64`, since the length prefix
/// allows up to 255 digits of wire payload and a 64-bit integer would
/// reject legal, well-formed `lon` values well within that range.
pub fn decode_lon(r: &mut Reader) -> RelayResult<i128> {
    let len = r.be_u8()? as usize;
    let text = decode_ascii(r, len)?;
    text.parse::<i128>()
        .map_err(|_| DecodeError::Malformed("lon payload is not decimal ASCII"))
}

/// `str`/`buf`: 4-byte big-endian length, then that many bytes.
///
/// Length `0` and `0xFFFF_FFFF` (the wire's "null string") both collapse to
/// empty (Invariant 4) — the distinction between null and empty is
/// intentionally lost here.
fn decode_length_prefixed<'a>(r: &mut Reader<'a>) -> RelayResult<&'a [u8]> {
    let len = r.be_u32()?;
    if len == 0 || len == 0xFFFF_FFFF {
        return Ok(&[]);
    }
    r.take(len as usize)
}

pub fn decode_str(r: &mut Reader) -> RelayResult<String> {
    let bytes = decode_length_prefixed(r)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|_| DecodeError::Malformed("str payload is not valid UTF-8"))
}

pub fn decode_buf(r: &mut Reader) -> RelayResult<Vec<u8>> {
    Ok(decode_length_prefixed(r)?.to_vec())
}

/// `ptr`: 1-byte length, then that many ASCII hex digits. `"0"` denotes the
/// null pointer; the token is never parsed as a numeric address.
pub fn decode_ptr(r: &mut Reader) -> RelayResult<String> {
    let len = r.be_u8()? as usize;
    let text = decode_ascii(r, len)?;
    if !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::Malformed("ptr payload is not ASCII hex"));
    }
    Ok(text)
}

/// `tim`: 1-byte length, then that many ASCII decimal digits (whole
/// seconds since the epoch). Sub-second precision is not addressed by the
/// wire format, so this only ever parses whole seconds.
pub fn decode_tim(r: &mut Reader) -> RelayResult<SystemTime> {
    let len = r.be_u8()? as usize;
    let text = decode_ascii(r, len)?;
    let secs: u64 = text
        .parse()
        .map_err(|_| DecodeError::Malformed("tim payload is not decimal ASCII"))?;
    Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
}

fn decode_ascii(r: &mut Reader, len: usize) -> RelayResult<String> {
    let bytes = r.take(len)?;
    if !bytes.is_ascii() {
        return Err(DecodeError::Malformed("expected ASCII payload"));
    }
    // SAFETY: just checked `is_ascii()`, which implies valid UTF-8.
    Ok(bytes.iter().map(|&b| b as char).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_positive_and_negative_lon() {
        let mut r = Reader::new(b"\x02\x34\x32");
        assert_eq!(decode_lon(&mut r).unwrap(), 42);

        let mut r = Reader::new(b"\x03-17\x00");
        assert_eq!(decode_lon(&mut r).unwrap(), -17);
    }

    #[test]
    fn lon_accepts_values_past_i64_range() {
        // 20 digits, well past i64::MAX (~9.2e18) but still within i128.
        let text = b"99999999999999999999";
        let mut bytes = vec![text.len() as u8];
        bytes.extend_from_slice(text);
        let mut r = Reader::new(&bytes);
        assert_eq!(decode_lon(&mut r).unwrap(), 99_999_999_999_999_999_999i128);
    }

    #[test]
    fn str_length_0xffffffff_is_empty() {
        let mut r = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(decode_str(&mut r).unwrap(), "");
    }

    #[test]
    fn str_length_0_is_empty() {
        let mut r = Reader::new(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(decode_str(&mut r).unwrap(), "");
    }

    #[test]
    fn str_declaring_too_long_is_malformed() {
        let mut r = Reader::new(&[0x00, 0x00, 0x00, 0x05, b'h', b'i']);
        assert!(decode_str(&mut r).is_err());
    }

    #[test]
    fn ptr_null_is_the_ascii_digit_zero() {
        let mut r = Reader::new(b"\x010");
        assert_eq!(decode_ptr(&mut r).unwrap(), "0");
    }

    #[test]
    fn tim_parses_seconds_since_epoch() {
        let mut r = Reader::new(b"\x0A1700000000");
        let t = decode_tim(&mut r).unwrap();
        assert_eq!(
            t.duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs(),
            1_700_000_000
        );
    }

    #[test]
    fn lon_rejects_non_numeric_text() {
        let mut r = Reader::new(b"\x03abc");
        assert!(decode_lon(&mut r).is_err());
    }
}
