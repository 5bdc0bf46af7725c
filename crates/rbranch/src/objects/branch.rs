//! `TBranch` metadata decoding.

use rayon::prelude::*;

use crate::error::{Result, RootError};
use crate::objects::{AttFill, Basket, Leaf, Named, ObjArray, RootObj, Streamed};
use crate::rbuffer::RBuffer;

/// Branch versions older than this use a different on-wire layout and are
/// refused.
pub const MIN_BRANCH_VERSION: u16 = 12;

/// Stable handle to a branch inside a linked [`Tree`](crate::tree::Tree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub u32);

/// Weak navigation handles, assigned by the tree linking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchLink {
    /// This branch.
    pub id: BranchId,
    /// Immediate parent branch; `None` for a top-level branch.
    pub parent: Option<BranchId>,
    /// Top-level ancestor; itself for a top-level branch.
    pub mother: BranchId,
}

/// Decoded branch metadata: the sub-branch tree, leaf columns, cached
/// baskets, and the basket directory tables.
///
/// A branch owns its children, leaves, and baskets outright; navigation
/// back-pointers are the weak handles in [`TBranch::link`], filled in by
/// [`Tree::new`](crate::tree::Tree::new) after decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TBranch {
    /// Name and title preamble.
    pub named: Named,
    /// Fill-attribute preamble.
    pub attfill: AttFill,
    /// Packed compression algorithm and level.
    pub compress: i32,
    /// Initial basket buffer capacity in bytes.
    pub basket_size: i32,
    /// Initial length of the per-basket entry-offset table.
    pub entry_offset_len: i32,
    /// Index of the last basket written.
    pub write_basket: i32,
    /// Last entry filled in this branch.
    pub entry_number: i64,
    /// Offset of this branch within the entry record.
    pub offset: i32,
    /// Capacity of the three basket tables.
    pub max_baskets: i32,
    /// 0 for an unsplit branch; promoted to 1 when sub-branches exist.
    pub split_level: i32,
    /// Number of entries.
    pub entries: i64,
    /// Number of the first entry in this branch.
    pub first_entry: i64,
    /// Total bytes across all leaves before compression.
    pub tot_bytes: i64,
    /// Total bytes across all leaves after compression.
    pub zip_bytes: i64,
    /// Sub-branches.
    pub branches: Vec<TBranch>,
    /// Leaf columns.
    pub leaves: Vec<Leaf>,
    /// Cached basket objects.
    pub baskets: Vec<Basket>,
    /// Length on file of each basket; `max_baskets` entries.
    pub basket_bytes: Vec<i32>,
    /// First entry of each basket; `max_baskets` entries.
    pub basket_entry: Vec<i64>,
    /// File offset of each basket; `max_baskets` entries.
    pub basket_seek: Vec<i64>,
    /// Name of the file holding this branch's buffers; empty when they
    /// live in the tree's own file.
    pub fname: String,

    // transient read state, reset on every decode
    /// Index into `baskets` of the basket currently being read.
    pub current_basket: Option<usize>,
    /// First entry of the current basket; -1 before any read.
    pub first_basket_entry: i64,
    /// First entry that moves the cursor to the next basket; -1 before
    /// any read.
    pub next_basket_entry: i64,
    /// Basket index of the read cursor.
    pub read_basket: i32,
    /// Entry number of the read cursor.
    pub read_entry: i64,
    /// Navigation handles; `None` until the branch is attached to a tree.
    pub link: Option<BranchLink>,
}

impl TBranch {
    /// Branch name.
    pub fn name(&self) -> &str {
        &self.named.name
    }

    /// Branch title.
    pub fn title(&self) -> &str {
        &self.named.title
    }

    /// Decode one branch from a resident payload.
    ///
    /// The payload must start at the branch's class header. On any failure
    /// the partially decoded value is dropped and only the error escapes.
    pub fn from_bytes(data: &[u8]) -> Result<TBranch> {
        let mut r = RBuffer::new(data);
        let mut b = TBranch::default();
        b.decode(&mut r)?;
        Ok(b)
    }

    fn take_branches(&mut self, arr: ObjArray, r: &mut RBuffer<'_>) -> Result<()> {
        self.branches = Vec::with_capacity(arr.objs.len());
        for obj in arr.objs {
            match obj {
                RootObj::Branch(b) => self.branches.push(b),
                other => {
                    return Err(r.fail(RootError::UnknownClass {
                        tag: other.class().to_string(),
                    }))
                }
            }
        }
        Ok(())
    }

    fn take_leaves(&mut self, arr: ObjArray, r: &mut RBuffer<'_>) -> Result<()> {
        self.leaves = Vec::with_capacity(arr.objs.len());
        for obj in arr.objs {
            match obj {
                RootObj::Leaf(l) => self.leaves.push(l),
                other => {
                    return Err(r.fail(RootError::UnknownClass {
                        tag: other.class().to_string(),
                    }))
                }
            }
        }
        Ok(())
    }

    fn take_baskets(&mut self, arr: ObjArray, r: &mut RBuffer<'_>) -> Result<()> {
        self.baskets = Vec::with_capacity(arr.objs.len());
        for obj in arr.objs {
            match obj {
                RootObj::Basket(b) => self.baskets.push(b),
                other => {
                    return Err(r.fail(RootError::UnknownClass {
                        tag: other.class().to_string(),
                    }))
                }
            }
        }
        Ok(())
    }
}

impl Streamed for TBranch {
    fn class(&self) -> &'static str {
        "TBranch"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (vers, start, bcnt) = r.read_version();
        r.status()?;

        self.current_basket = None;
        self.first_basket_entry = -1;
        self.next_basket_entry = -1;
        self.read_basket = 0;
        self.read_entry = 0;
        self.link = None;

        if vers < MIN_BRANCH_VERSION {
            return Err(r.fail(RootError::UnsupportedVersion {
                context: "TBranch",
                version: vers,
            }));
        }

        self.named.decode(r)?;
        self.attfill.decode(r)?;

        self.compress = r.read_i32();
        self.basket_size = r.read_i32();
        self.entry_offset_len = r.read_i32();
        self.write_basket = r.read_i32();
        self.entry_number = r.read_i64();
        self.offset = r.read_i32();
        self.max_baskets = r.read_i32();
        self.split_level = r.read_i32();
        self.entries = r.read_i64();
        self.first_entry = r.read_i64();
        self.tot_bytes = r.read_i64();
        self.zip_bytes = r.read_i64();
        r.status()?;

        let mut sub = ObjArray::default();
        sub.decode(r)?;
        self.take_branches(sub, r)?;

        let mut leaves = ObjArray::default();
        leaves.decode(r)?;
        self.take_leaves(leaves, r)?;

        let mut baskets = ObjArray::default();
        baskets.decode(r)?;
        self.take_baskets(baskets, r)?;

        let n = usize::try_from(self.max_baskets).unwrap_or(0);
        // the three tables plus their markers; refuse a size the stream
        // cannot hold before allocating it
        let need = n.saturating_mul(4 + 8 + 8).saturating_add(3);
        if need > r.remaining() {
            return Err(r.fail(RootError::Truncated {
                need,
                have: r.remaining(),
            }));
        }

        let _ = r.read_i8(); // is-array marker
        self.basket_bytes = vec![0; n];
        r.read_array_i32(&mut self.basket_bytes);

        let _ = r.read_i8();
        self.basket_entry = vec![0; n];
        r.read_array_i64(&mut self.basket_entry);

        let _ = r.read_i8();
        self.basket_seek = vec![0; n];
        r.read_array_i64(&mut self.basket_seek);

        self.fname = r.read_string();

        r.check_byte_count(start, bcnt, beg, "TBranch");
        r.status()?;

        if self.split_level == 0 && !self.branches.is_empty() {
            self.split_level = 1;
        }

        log::trace!(
            "decoded branch {:?}: {} entries, {} sub-branches, {} leaves",
            self.named.name,
            self.entries,
            self.branches.len(),
            self.leaves.len(),
        );
        Ok(())
    }
}

/// Decode independently streamed branch payloads in parallel.
///
/// Each payload gets its own reader, so nothing is shared across threads;
/// results come back in input order, one per payload.
pub fn decode_many(payloads: &[&[u8]]) -> Vec<Result<TBranch>> {
    payloads.par_iter().map(|p| TBranch::from_bytes(p)).collect()
}
