//! # rbranch
//!
//! Decoder for ROOT's streamed `TBranch` metadata.
//!
//! ROOT persists event data in a self-describing, big-endian, versioned
//! binary format. This crate decodes the branch side of that format from
//! resident byte buffers: the typed [`RBuffer`] reader, the
//! streamed-object framework (`TNamed`/`TAttFill` preambles, `TObjArray`
//! containers with class tags and intra-stream back-references,
//! byte-count framing), and the [`TBranch`] hierarchy with its leaves,
//! baskets, and basket directory tables.
//!
//! File-level concerns (TKey records, directories, decompression) live
//! with the caller; every decoder here starts from bytes already in
//! memory.
//!
//! ```
//! use rbranch::TBranch;
//!
//! # fn payload() -> Vec<u8> { Vec::new() }
//! let bytes = payload();
//! if let Ok(branch) = TBranch::from_bytes(&bytes) {
//!     println!("{}: {} entries", branch.name(), branch.entries);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buf;
pub mod error;
pub mod factory;
pub mod objects;
pub mod rbuffer;
pub mod tree;

pub use buf::Buf;
pub use error::{Result, RootError};
pub use objects::{
    decode_many, read_object_any, AttFill, Basket, BranchId, BranchLink, Leaf, Named, ObjArray,
    RootObj, Streamed, TBranch, MIN_BRANCH_VERSION,
};
pub use rbuffer::{RBuffer, StreamRef};
pub use tree::Tree;
