//! Frame-body decompression (spec §4.2).

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{DecodeError, RelayResult};

/// Upper bound on the inflated body size (spec §5's "implementation should
/// impose a per-frame cap"). Exceeding it is `Malformed`, never an
/// unbounded allocation.
pub const MAX_INFLATED_SIZE: usize = 64 * 1024 * 1024;

/// The decoder's one knob: how large an inflated frame body is allowed to
/// grow before decompression is aborted. `Default` carries `MAX_INFLATED_SIZE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeLimits {
    pub max_inflated_size: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        DecodeLimits {
            max_inflated_size: MAX_INFLATED_SIZE,
        }
    }
}

/// Inflates a DEFLATE/zlib-framed body using the default size cap. The
/// compression flag byte has already been consumed by the caller; `body` is
/// everything after it.
pub fn inflate(body: &[u8]) -> RelayResult<Vec<u8>> {
    inflate_with_limits(body, DecodeLimits::default())
}

/// Inflates a DEFLATE/zlib-framed body, aborting once `limits.max_inflated_size`
/// bytes have been produced.
pub fn inflate_with_limits(body: &[u8], limits: DecodeLimits) -> RelayResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(body);
    let mut out = Vec::new();
    decoder
        .by_ref()
        .take(limits.max_inflated_size as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|_| DecodeError::Malformed("zlib inflation failed"))?;

    if out.len() > limits.max_inflated_size {
        return Err(DecodeError::Malformed("inflated body exceeds size cap"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn round_trips_through_zlib() {
        let original = b"hello weechat relay";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        let inflated = inflate(&compressed).unwrap();
        assert_eq!(inflated, original);
    }

    #[test]
    fn garbage_input_is_malformed() {
        assert!(inflate(b"not zlib data at all").is_err());
    }

    #[test]
    fn custom_limit_rejects_body_over_cap() {
        let original = b"hello weechat relay, this is longer than four bytes";
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();

        let tight = DecodeLimits { max_inflated_size: 4 };
        assert!(inflate_with_limits(&compressed, tight).is_err());
    }
}
