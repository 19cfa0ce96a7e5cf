//! The WeeChat relay binary decoder: primitive and composite object
//! decoders, the frame-level orchestrator, and the decoded value tree.

mod composite;
mod compress;
mod decoder;
mod message;
mod primitive;
mod tag;
mod value;

pub use decoder::decode;
pub use message::{DecodedMessage, HDataProjection};
pub use tag::Tag;
pub use value::{DecodedValue, HData, HDataRow, InfoList};

pub use compress::{DecodeLimits, MAX_INFLATED_SIZE};
