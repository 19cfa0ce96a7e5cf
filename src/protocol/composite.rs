//! Composite (container) decoders: `arr`, `htb`, `inf`, `inl`, `hda` (spec §4.4).
//!
//! Each recurses back through `decoder::decode_value`, the single dispatch
//! point for turning a `Tag` into a `DecodedValue` — composites never
//! reimplement that dispatch themselves.

use indexmap::IndexMap;

use crate::binary::Reader;
use crate::error::{DecodeError, RelayResult};

use super::decoder::decode_value;
use super::primitive::decode_str;
use super::tag::Tag;
use super::value::{DecodedValue, HData, HDataRow, InfoList};

pub fn decode_array(r: &mut Reader) -> RelayResult<Vec<DecodedValue>> {
    let elem_tag = Tag::from_bytes(&r.tag3()?)?;
    let count = r.be_u32()? as usize;
    let mut out = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        out.push(decode_value(elem_tag, r)?);
    }
    Ok(out)
}

/// Keys are not required to be unique on the wire; insertion order of
/// last-write-wins is preserved via `IndexMap`.
pub fn decode_hashtable(r: &mut Reader) -> RelayResult<IndexMap<DecodedValue, DecodedValue>> {
    let key_tag = Tag::from_bytes(&r.tag3()?)?;
    let val_tag = Tag::from_bytes(&r.tag3()?)?;
    let count = r.be_u32()? as usize;
    let mut out = IndexMap::with_capacity(count.min(4096));
    for _ in 0..count {
        let k = decode_value(key_tag, r)?;
        let v = decode_value(val_tag, r)?;
        out.insert(k, v);
    }
    Ok(out)
}

pub fn decode_info(r: &mut Reader) -> RelayResult<(String, String)> {
    let name = decode_str(r)?;
    let value = decode_str(r)?;
    Ok((name, value))
}

/// Same inner name appearing twice: the later occurrence replaces the
/// earlier one (explicit in spec §4.4).
pub fn decode_infolist(r: &mut Reader) -> RelayResult<InfoList> {
    let name = decode_str(r)?;
    let count = r.be_u32()? as usize;
    let mut items = IndexMap::with_capacity(count.min(4096));
    for _ in 0..count {
        let inner_count = r.be_u32()? as usize;
        let inner_name = decode_str(r)?;
        let inner_tag = Tag::from_bytes(&r.tag3()?)?;
        let mut values = Vec::with_capacity(inner_count.min(4096));
        for _ in 0..inner_count {
            values.push(decode_value(inner_tag, r)?);
        }
        items.insert(inner_name, values);
    }
    Ok(InfoList { name, items })
}

/// `hda`, the central composite. An empty `hpath` decodes to `None` — "the
/// whole hdata object decodes to absent" (spec §4.4 step 1) — which callers
/// store as `DecodedValue::HData(HData::default())` with an empty `hpath`;
/// the frame-level "objects absent" signal is a distinct mechanism (see
/// `decoder::decode_frame`) from this per-object absence.
pub fn decode_hdata(r: &mut Reader) -> RelayResult<HData> {
    let hpath = decode_str(r)?;
    if hpath.is_empty() {
        // Still consumes `keys` and `count` so the cursor stays aligned:
        // an empty hpath is a valid, if degenerate, hdata object on the
        // wire, not a truncation.
        let _ = decode_str(r)?;
        let _count = r.be_u32()?;
        return Ok(HData::default());
    }

    let path_len = 1 + hpath.matches('/').count();

    let keys_text = decode_str(r)?;
    let keys = parse_keys(&keys_text)?;

    let count = r.be_u32()? as usize;
    let mut rows = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        let mut path = Vec::with_capacity(path_len);
        for _ in 0..path_len {
            path.push(super::primitive::decode_ptr(r)?);
        }

        let mut fields = IndexMap::with_capacity(keys.len());
        for (name, tag) in &keys {
            fields.insert(name.clone(), decode_value(*tag, r)?);
        }

        rows.push(HDataRow { path, fields });
    }

    Ok(HData { hpath, keys, rows })
}

/// Parses the comma-separated `name:type` key list. Empty text yields zero
/// fields (spec §4.4 step 3).
fn parse_keys(text: &str) -> RelayResult<Vec<(String, Tag)>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|item| {
            let (name, type_name) = item
                .split_once(':')
                .ok_or(DecodeError::SchemaMismatch("hdata key missing ':' separator"))?;
            let tag = Tag::from_name(type_name)?;
            Ok((name.to_string(), tag))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_of_ints_decodes_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"int");
        bytes.extend_from_slice(&3u32.to_be_bytes());
        for v in [1i32, 2i32, 3i32] {
            bytes.extend_from_slice(&v.to_be_bytes());
        }

        let mut r = Reader::new(&bytes);
        let values = decode_array(&mut r).unwrap();
        assert_eq!(
            values,
            vec![
                DecodedValue::Int32(1),
                DecodedValue::Int32(2),
                DecodedValue::Int32(3),
            ]
        );
    }

    #[test]
    fn hashtable_duplicate_key_last_write_wins() {
        // key_type=str, val_type=int, count=2, both entries keyed "k"
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"str");
        bytes.extend_from_slice(b"int");
        bytes.extend_from_slice(&2u32.to_be_bytes());
        for v in [1i32, 2i32] {
            bytes.extend_from_slice(&1u32.to_be_bytes());
            bytes.extend_from_slice(b"k");
            bytes.extend_from_slice(&v.to_be_bytes());
        }

        let mut r = Reader::new(&bytes);
        let table = decode_hashtable(&mut r).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(&DecodedValue::Str("k".to_string())),
            Some(&DecodedValue::Int32(2))
        );
    }

    #[test]
    fn info_round_trip() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(b"name");
        bytes.extend_from_slice(&5u32.to_be_bytes());
        bytes.extend_from_slice(b"value");

        let mut r = Reader::new(&bytes);
        let (name, value) = decode_info(&mut r).unwrap();
        assert_eq!(name, "name");
        assert_eq!(value, "value");
    }

    #[test]
    fn hdata_with_empty_hpath_is_absent() {
        // hpath="" (len 0), keys="" (len 0), count=0
        let mut r = Reader::new(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let h = decode_hdata(&mut r).unwrap();
        assert!(h.hpath.is_empty());
        assert!(h.rows.is_empty());
    }

    #[test]
    fn hdata_zero_rows() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(b"buffer");
        bytes.extend_from_slice(&8u32.to_be_bytes());
        bytes.extend_from_slice(b"name:str");
        bytes.extend_from_slice(&0u32.to_be_bytes());

        let mut r = Reader::new(&bytes);
        let h = decode_hdata(&mut r).unwrap();
        assert_eq!(h.hpath, "buffer");
        assert_eq!(h.keys, vec![("name".to_string(), Tag::Str)]);
        assert!(h.rows.is_empty());
    }

    #[test]
    fn hdata_two_level_path_reads_two_pointers_per_row() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&12u32.to_be_bytes());
        bytes.extend_from_slice(b"buffer/lines");
        bytes.extend_from_slice(&8u32.to_be_bytes());
        bytes.extend_from_slice(b"name:str");
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.push(7);
        bytes.extend_from_slice(b"1234abc");
        bytes.push(3);
        bytes.extend_from_slice(b"abc");
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(b"test");

        let mut r = Reader::new(&bytes);
        let h = decode_hdata(&mut r).unwrap();
        assert_eq!(h.rows.len(), 1);
        assert_eq!(h.rows[0].path, vec!["1234abc".to_string(), "abc".to_string()]);
        assert_eq!(
            h.rows[0].fields.get("name"),
            Some(&DecodedValue::Str("test".to_string()))
        );
    }

    #[test]
    fn hdata_declaring_more_rows_than_present_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(b"buffer");
        bytes.extend_from_slice(&0u32.to_be_bytes()); // no keys
        bytes.extend_from_slice(&5u32.to_be_bytes()); // claims 5 rows
        bytes.push(1);
        bytes.push(b'0'); // only one pointer present

        let mut r = Reader::new(&bytes);
        assert!(decode_hdata(&mut r).is_err());
    }

    #[test]
    fn infolist_duplicate_inner_name_last_write_wins() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(b"test");
        bytes.extend_from_slice(&2u32.to_be_bytes());
        for val in [1i32, 2i32] {
            bytes.extend_from_slice(&1u32.to_be_bytes());
            bytes.extend_from_slice(&3u32.to_be_bytes());
            bytes.extend_from_slice(b"dup");
            bytes.extend_from_slice(b"int");
            bytes.extend_from_slice(&val.to_be_bytes());
        }

        let mut r = Reader::new(&bytes);
        let list = decode_infolist(&mut r).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items["dup"], vec![DecodedValue::Int32(2)]);
    }
}
