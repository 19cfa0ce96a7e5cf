//! Binary decoder for the WeeChat relay protocol.
//!
//! This crate decodes the length-prefixed, optionally DEFLATE-compressed,
//! self-describing object stream a running WeeChat instance emits over its
//! relay protocol. It is a pure, synchronous function over an in-memory
//! frame buffer: it does not open sockets, does not encode outbound
//! commands, and does not keep any buffer/nicklist state across frames.
//! Those concerns belong to the surrounding transport, command encoder, and
//! client façade respectively.
//!
//! ```
//! use weechat_relay_codec::decode;
//!
//! // length(9) | compressed=0 | id="" (null string)
//! let frame = [0x00, 0x00, 0x00, 0x09, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
//! let msg = decode(&frame);
//! assert_eq!(msg.id, "");
//! assert_eq!(msg.objects, Some(vec![]));
//! ```

mod binary;
mod error;
mod protocol;

pub use error::DecodeError;
pub use protocol::{
    decode, DecodeLimits, DecodedMessage, DecodedValue, HData, HDataProjection, HDataRow,
    InfoList, Tag, MAX_INFLATED_SIZE,
};
