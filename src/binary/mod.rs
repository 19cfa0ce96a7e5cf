//! Cursor primitives the rest of the decoder is built on.

mod reader;

pub use reader::Reader;
