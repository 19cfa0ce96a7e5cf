use std::time::SystemTime;

use indexmap::IndexMap;

use super::tag::Tag;

/// A decoded wire object. One arm per type tag (spec §3).
#[derive(Clone, Debug, PartialEq)]
pub enum DecodedValue {
    Char(u8),
    Int32(i32),
    LongInt(i128),
    Str(String),
    Buf(Vec<u8>),
    Ptr(String),
    Time(SystemTime),
    HashTable(IndexMap<DecodedValue, DecodedValue>),
    HData(HData),
    Info(String, String),
    InfoList(InfoList),
    Array(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn tag(&self) -> Tag {
        match self {
            DecodedValue::Char(_) => Tag::Chr,
            DecodedValue::Int32(_) => Tag::Int,
            DecodedValue::LongInt(_) => Tag::Lon,
            DecodedValue::Str(_) => Tag::Str,
            DecodedValue::Buf(_) => Tag::Buf,
            DecodedValue::Ptr(_) => Tag::Ptr,
            DecodedValue::Time(_) => Tag::Tim,
            DecodedValue::HashTable(_) => Tag::Htb,
            DecodedValue::HData(_) => Tag::Hda,
            DecodedValue::Info(..) => Tag::Inf,
            DecodedValue::InfoList(_) => Tag::Inl,
            DecodedValue::Array(_) => Tag::Arr,
        }
    }
}

// `DecodedValue` is used as a hashtable key (§3: "mapping from
// decoded-value to decoded-value"). `SystemTime` and `f64`-free payloads
// make a structural `Eq`/`Hash` sound here; floats never appear on this
// wire format.
impl Eq for DecodedValue {}

impl std::hash::Hash for DecodedValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            DecodedValue::Char(b) => b.hash(state),
            DecodedValue::Int32(n) => n.hash(state),
            DecodedValue::LongInt(n) => n.hash(state),
            DecodedValue::Str(s) => s.hash(state),
            DecodedValue::Buf(b) => b.hash(state),
            DecodedValue::Ptr(s) => s.hash(state),
            DecodedValue::Time(t) => t
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_default()
                .hash(state),
            DecodedValue::HashTable(m) => m.len().hash(state),
            DecodedValue::HData(h) => h.hpath.hash(state),
            DecodedValue::Info(n, v) => {
                n.hash(state);
                v.hash(state);
            }
            DecodedValue::InfoList(i) => i.name.hash(state),
            DecodedValue::Array(a) => a.len().hash(state),
        }
    }
}

/// One row of an `hda` object: the pointer chain the server walked to reach
/// it, plus the declared fields in declaration order.
///
/// `path` holds pointer tokens as hex text, never interpreted as a memory
/// address: pointers are opaque identifiers on this wire, not addresses a
/// client could dereference.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HDataRow {
    pub path: Vec<String>,
    pub fields: IndexMap<String, DecodedValue>,
}

/// The hdata composite: a schema (`hpath`, declared `keys`) plus the rows
/// decoded against that schema.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct HData {
    pub hpath: String,
    pub keys: Vec<(String, Tag)>,
    pub rows: Vec<HDataRow>,
}

impl HData {
    /// Number of pointers every row carries, derived from `hpath`'s
    /// `/`-separated depth (spec §4.4 step 2).
    pub fn path_len(&self) -> usize {
        if self.hpath.is_empty() {
            0
        } else {
            1 + self.hpath.matches('/').count()
        }
    }
}

/// An `inl` (infolist) composite: a name plus named, typed value lists.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct InfoList {
    pub name: String,
    pub items: IndexMap<String, Vec<DecodedValue>>,
}
