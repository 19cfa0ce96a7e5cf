//! The frame decoder: orchestrates length check, decompression, id, and the
//! repeated `(tag, value)` stream until the buffer is exhausted (spec §4.5).

use log::{debug, trace};

use crate::binary::Reader;
use crate::error::RelayResult;

use super::compress;
use super::composite::{decode_array, decode_hashtable, decode_hdata, decode_infolist, decode_info};
use super::message::DecodedMessage;
use super::primitive::{decode_buf, decode_chr, decode_int, decode_lon, decode_ptr, decode_str, decode_tim};
use super::tag::Tag;
use super::value::DecodedValue;

/// Single dispatch point: every composite decoder recurses back through
/// this function instead of reimplementing tag matching itself (spec §9).
pub(crate) fn decode_value(tag: Tag, r: &mut Reader) -> RelayResult<DecodedValue> {
    Ok(match tag {
        Tag::Chr => DecodedValue::Char(decode_chr(r)?),
        Tag::Int => DecodedValue::Int32(decode_int(r)?),
        Tag::Lon => DecodedValue::LongInt(decode_lon(r)?),
        Tag::Str => DecodedValue::Str(decode_str(r)?),
        Tag::Buf => DecodedValue::Buf(decode_buf(r)?),
        Tag::Ptr => DecodedValue::Ptr(decode_ptr(r)?),
        Tag::Tim => DecodedValue::Time(decode_tim(r)?),
        Tag::Htb => DecodedValue::HashTable(decode_hashtable(r)?),
        Tag::Hda => DecodedValue::HData(decode_hdata(r)?),
        Tag::Inf => {
            let (name, value) = decode_info(r)?;
            DecodedValue::Info(name, value)
        }
        Tag::Inl => DecodedValue::InfoList(decode_infolist(r)?),
        Tag::Arr => DecodedValue::Array(decode_array(r)?),
    })
}

/// Decodes one complete relay frame.
///
/// `frame` must be the whole length-prefixed message as delivered by the
/// transport; reassembling that message out of a raw byte stream happens
/// upstream of this crate. This never panics and never returns `Result`: a
/// malformed or truncated frame degrades to `objects: None` inside a
/// still-valid envelope.
pub fn decode(frame: &[u8]) -> DecodedMessage {
    match try_decode(frame) {
        Ok(msg) => msg,
        Err((id, compression_used)) => {
            debug!(
                "frame decode aborted (id={:?}, compression_used={}): objects absent",
                id, compression_used
            );
            DecodedMessage {
                id,
                compression_used,
                objects: None,
            }
        }
    }
}

/// Returns `Ok` for a cleanly decoded frame, or `Err((id, compression_used))`
/// with whatever envelope fields were readable before the failure.
fn try_decode(frame: &[u8]) -> Result<DecodedMessage, (String, bool)> {
    let mut r = Reader::new(frame);

    let length = match r.be_u32() {
        Ok(n) => n,
        Err(_) => return Err((String::new(), false)),
    };
    if length as usize != frame.len() {
        return Err((String::new(), false));
    }

    let compression_flag = match r.be_u8() {
        Ok(b) => b,
        Err(_) => return Err((String::new(), false)),
    };
    let compression_used = compression_flag != 0;

    let owned_body;
    let mut body_reader = if compression_used {
        owned_body = match compress::inflate(r.chunk()) {
            Ok(bytes) => bytes,
            Err(_) => return Err((String::new(), true)),
        };
        Reader::new(&owned_body)
    } else {
        Reader::new(r.chunk())
    };

    let id = match decode_str(&mut body_reader) {
        Ok(id) => id,
        Err(_) => return Err((String::new(), compression_used)),
    };

    let mut objects = Vec::new();
    while !body_reader.is_empty() {
        let tag = match read_tag(&mut body_reader) {
            Ok(tag) => tag,
            Err(_) => return Err((id, compression_used)),
        };
        match decode_value(tag, &mut body_reader) {
            Ok(value) => {
                trace!("decoded object: {}", tag.as_str());
                objects.push(value);
            }
            Err(_) => return Err((id, compression_used)),
        }
    }

    Ok(DecodedMessage {
        id,
        compression_used,
        objects: Some(objects),
    })
}

fn read_tag(r: &mut Reader) -> RelayResult<Tag> {
    Tag::from_bytes(&r.tag3()?)
}
