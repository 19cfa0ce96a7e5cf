//! Internal error taxonomy for the decoder.
//!
//! None of these ever escape the public API: the frame decoder (see
//! `protocol::decoder`) catches every `DecodeError` at the frame boundary and
//! turns it into `DecodedMessage { objects: None, .. }`. They exist so that
//! the reader and the primitive/composite decoders can use `?` instead of
//! threading an `Option` by hand.

use thiserror::Error;

/// Why a single object (or the frame envelope) failed to decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The cursor ran out of bytes mid-object.
    #[error("truncated: needed {needed} more byte(s), {remaining} remained")]
    Truncated { needed: usize, remaining: usize },

    /// A declared length exceeded the buffer, a type tag was unknown, a
    /// numeric text field failed to parse, or decompression failed.
    #[error("malformed frame: {0}")]
    Malformed(&'static str),

    /// An hdata key list was syntactically wrong (missing `:` separator).
    #[error("schema mismatch: {0}")]
    SchemaMismatch(&'static str),
}

pub type RelayResult<T> = Result<T, DecodeError>;

impl DecodeError {
    /// Collapses a byte-cursor shortfall into `Truncated`.
    pub(crate) fn truncated(needed: usize, remaining: usize) -> Self {
        DecodeError::Truncated { needed, remaining }
    }
}
