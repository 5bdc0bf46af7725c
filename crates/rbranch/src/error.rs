//! Error types for the decoder.

use thiserror::Error;

/// Decode error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootError {
    /// A read ran past the end of the buffer.
    #[error("stream truncated: need {need} bytes, have {have}")]
    Truncated {
        /// Bytes the read required.
        need: usize,
        /// Bytes left in the buffer.
        have: usize,
    },

    /// The streamed object declares a version older than this decoder supports.
    #[error("{context}: unsupported version {version}")]
    UnsupportedVersion {
        /// Class being decoded.
        context: &'static str,
        /// Version found in the stream.
        version: u16,
    },

    /// No factory entry for a class tag encountered in the stream.
    #[error("unknown class {tag:?}")]
    UnknownClass {
        /// The unresolvable class tag.
        tag: String,
    },

    /// Cursor did not land on the end position declared by the byte count.
    #[error("{context}: object should end at byte {expected_end}, cursor is at {actual_end}")]
    ProtocolError {
        /// Class whose byte count failed.
        context: &'static str,
        /// End position declared by the class header.
        expected_end: u64,
        /// Cursor position after decoding the object.
        actual_end: u64,
    },

    /// Malformed element prefix in an object array.
    #[error("bad class tag {raw:#010x} in object array")]
    BadClassTag {
        /// The offending prefix word.
        raw: u32,
    },
}

/// Result alias for decode operations.
pub type Result<T> = std::result::Result<T, RootError>;
