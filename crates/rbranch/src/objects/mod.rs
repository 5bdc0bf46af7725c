//! Streamed-object framework: the decodable surface, the closed set of
//! known classes, and the element-prefix protocol used inside object
//! arrays.

pub mod base;
pub mod basket;
pub mod branch;
pub mod leaf;
pub mod objarray;

pub use base::{AttFill, Named};
pub use basket::Basket;
pub use branch::{decode_many, BranchId, BranchLink, TBranch, MIN_BRANCH_VERSION};
pub use leaf::Leaf;
pub use objarray::ObjArray;

use crate::error::{Result, RootError};
use crate::factory;
use crate::rbuffer::{RBuffer, StreamRef, BYTE_COUNT_MASK, CLASS_MASK, MAP_OFFSET, NEW_CLASS_TAG};

/// A value decodable from the class-header + byte-count framing.
pub trait Streamed {
    /// On-wire class tag of this value.
    fn class(&self) -> &'static str;
    /// Decode the value in place from the reader's current position.
    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()>;
}

/// Any object the factory can construct.
#[derive(Debug, Clone, PartialEq)]
pub enum RootObj {
    /// A `TNamed`.
    Named(Named),
    /// A `TAttFill`.
    AttFill(AttFill),
    /// A `TObjArray`.
    ObjArray(ObjArray),
    /// A `TBranch`.
    Branch(TBranch),
    /// Any `TLeaf` kind.
    Leaf(Leaf),
    /// A `TBasket`.
    Basket(Basket),
}

impl Streamed for RootObj {
    fn class(&self) -> &'static str {
        match self {
            RootObj::Named(o) => o.class(),
            RootObj::AttFill(o) => o.class(),
            RootObj::ObjArray(o) => o.class(),
            RootObj::Branch(o) => o.class(),
            RootObj::Leaf(o) => o.class(),
            RootObj::Basket(o) => o.class(),
        }
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        match self {
            RootObj::Named(o) => o.decode(r),
            RootObj::AttFill(o) => o.decode(r),
            RootObj::ObjArray(o) => o.decode(r),
            RootObj::Branch(o) => o.decode(r),
            RootObj::Leaf(o) => o.decode(r),
            RootObj::Basket(o) => o.decode(r),
        }
    }
}

/// Decode one polymorphic element at the reader's position.
///
/// The element prefix is a 4-byte class-info word: zero for a null slot,
/// [`NEW_CLASS_TAG`] followed by a NUL-terminated class name for a class
/// new to this stream, a [`CLASS_MASK`]-marked offset referring back to an
/// earlier class tag, or a bare offset referring back to an earlier
/// element. New class names are registered in the reader's reference map
/// before the element body decodes; decoded elements are registered right
/// after, so later elements can reference both.
pub fn read_object_any(r: &mut RBuffer<'_>) -> Result<Option<RootObj>> {
    r.status()?;
    let beg = r.pos();
    let raw = r.read_u32();
    r.status()?;

    let (tag, tag_pos, framed) = if raw != NEW_CLASS_TAG && raw & BYTE_COUNT_MASK != 0 {
        // the prefix carries its own byte count; the tag word follows
        let p = r.pos();
        let t = r.read_u32();
        r.status()?;
        (t, p, true)
    } else {
        (raw, beg, false)
    };

    if tag == 0 {
        return Ok(None);
    }

    if tag == NEW_CLASS_TAG {
        let cname = r.read_cstring();
        r.status()?;
        let key = if framed {
            tag_pos + MAP_OFFSET
        } else {
            r.refs_len() as u64 + 1
        };
        r.register_ref(key, StreamRef::Class(cname.clone()));
        log::trace!("new class {cname:?} at byte {beg}");
        let mut obj = match factory::new_object(&cname) {
            Ok(obj) => obj,
            Err(e) => return Err(r.fail(e)),
        };
        obj.decode(r)?;
        if framed {
            r.register_ref(beg + MAP_OFFSET, StreamRef::Obj(Box::new(obj.clone())));
        }
        return Ok(Some(obj));
    }

    if tag & CLASS_MASK != 0 {
        // back-reference to a class tag seen earlier in this stream
        let off = u64::from(tag & !CLASS_MASK);
        let cname = match r.ref_at(off) {
            Some(StreamRef::Class(name)) => name.clone(),
            _ => return Err(r.fail(RootError::BadClassTag { raw: tag })),
        };
        let mut obj = match factory::new_object(&cname) {
            Ok(obj) => obj,
            Err(e) => return Err(r.fail(e)),
        };
        obj.decode(r)?;
        r.register_ref(beg + MAP_OFFSET, StreamRef::Obj(Box::new(obj.clone())));
        return Ok(Some(obj));
    }

    // back-reference to an element decoded earlier in this stream
    match r.ref_at(u64::from(tag)) {
        Some(StreamRef::Obj(obj)) => Ok(Some((**obj).clone())),
        _ => Err(r.fail(RootError::BadClassTag { raw: tag })),
    }
}
