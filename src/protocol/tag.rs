use crate::error::{DecodeError, RelayResult};

/// One of the 12 three-byte ASCII wire type tags.
///
/// Dispatch on `Tag` is a single `match` (see `decoder::decode_value`); there
/// is no dynamic lookup table, so an unknown tag is caught at the one place
/// that parses tag bytes into this enum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Chr,
    Int,
    Lon,
    Str,
    Buf,
    Ptr,
    Tim,
    Htb,
    Hda,
    Inf,
    Inl,
    Arr,
}

impl Tag {
    pub fn from_bytes(b: &[u8; 3]) -> RelayResult<Tag> {
        match b {
            b"chr" => Ok(Tag::Chr),
            b"int" => Ok(Tag::Int),
            b"lon" => Ok(Tag::Lon),
            b"str" => Ok(Tag::Str),
            b"buf" => Ok(Tag::Buf),
            b"ptr" => Ok(Tag::Ptr),
            b"tim" => Ok(Tag::Tim),
            b"htb" => Ok(Tag::Htb),
            b"hda" => Ok(Tag::Hda),
            b"inf" => Ok(Tag::Inf),
            b"inl" => Ok(Tag::Inl),
            b"arr" => Ok(Tag::Arr),
            _ => Err(DecodeError::Malformed("unknown type tag")),
        }
    }

    /// Parses a key's declared type from the comma-separated hdata key list
    /// (e.g. the `str` in `name:str`), which uses the same three-letter
    /// vocabulary as the wire tag but arrives as text, not raw bytes.
    pub fn from_name(s: &str) -> RelayResult<Tag> {
        match s {
            "chr" => Ok(Tag::Chr),
            "int" => Ok(Tag::Int),
            "lon" => Ok(Tag::Lon),
            "str" => Ok(Tag::Str),
            "buf" => Ok(Tag::Buf),
            "ptr" => Ok(Tag::Ptr),
            "tim" => Ok(Tag::Tim),
            "htb" => Ok(Tag::Htb),
            "hda" => Ok(Tag::Hda),
            "inf" => Ok(Tag::Inf),
            "inl" => Ok(Tag::Inl),
            "arr" => Ok(Tag::Arr),
            _ => Err(DecodeError::Malformed("unknown type tag")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Chr => "chr",
            Tag::Int => "int",
            Tag::Lon => "lon",
            Tag::Str => "str",
            Tag::Buf => "buf",
            Tag::Ptr => "ptr",
            Tag::Tim => "tim",
            Tag::Htb => "htb",
            Tag::Hda => "hda",
            Tag::Inf => "inf",
            Tag::Inl => "inl",
            Tag::Arr => "arr",
        }
    }
}
