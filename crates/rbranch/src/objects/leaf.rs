//! Leaf columns: one thin type per primitive element kind, sharing a
//! common base.

use crate::error::{Result, RootError};
use crate::objects::{read_object_any, Named, RootObj, Streamed};
use crate::rbuffer::RBuffer;

/// Fields shared by every leaf kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafBase {
    /// Name and title preamble.
    pub named: Named,
    /// Number of elements per entry (1 for scalar leaves).
    pub len: i32,
    /// Size in bytes of one element on the wire.
    pub etype: i32,
    /// Offset of the first element within the entry record.
    pub offset: i32,
    /// Whether the leaf carries a value range.
    pub has_range: bool,
    /// Whether the element type is unsigned.
    pub unsigned: bool,
    /// Counter leaf for variable-length columns; null for fixed-size ones.
    pub count: Option<Box<Leaf>>,
}

impl LeafBase {
    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (_vers, start, bcnt) = r.read_version();
        self.named.decode(r)?;
        self.len = r.read_i32();
        self.etype = r.read_i32();
        self.offset = r.read_i32();
        self.has_range = r.read_u8() != 0;
        self.unsigned = r.read_u8() != 0;
        self.count = match read_object_any(r)? {
            Some(RootObj::Leaf(l)) => Some(Box::new(l)),
            Some(other) => {
                return Err(r.fail(RootError::UnknownClass {
                    tag: other.class().to_string(),
                }))
            }
            None => None,
        };
        r.check_byte_count(start, bcnt, beg, "TLeaf");
        r.status()
    }
}

macro_rules! typed_leaf {
    ($(#[$doc:meta])* $name:ident, $class:literal, $ty:ty, $read:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            /// Common leaf fields.
            pub base: LeafBase,
            /// Smallest value the writer recorded.
            pub min: $ty,
            /// Largest value the writer recorded.
            pub max: $ty,
        }

        impl Streamed for $name {
            fn class(&self) -> &'static str {
                $class
            }

            fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
                r.status()?;
                let beg = r.pos();
                let (_vers, start, bcnt) = r.read_version();
                self.base.decode(r)?;
                self.min = r.$read();
                self.max = r.$read();
                r.check_byte_count(start, bcnt, beg, $class);
                r.status()
            }
        }
    };
}

typed_leaf!(
    /// `TLeafF`: 32-bit float column.
    TLeafF, "TLeafF", f32, read_f32
);
typed_leaf!(
    /// `TLeafD`: 64-bit float column.
    TLeafD, "TLeafD", f64, read_f64
);
typed_leaf!(
    /// `TLeafI`: 32-bit signed integer column.
    TLeafI, "TLeafI", i32, read_i32
);
typed_leaf!(
    /// `TLeafL`: 64-bit signed integer column.
    TLeafL, "TLeafL", i64, read_i64
);
typed_leaf!(
    /// `TLeafS`: 16-bit signed integer column.
    TLeafS, "TLeafS", i16, read_i16
);
typed_leaf!(
    /// `TLeafB`: 8-bit signed integer column.
    TLeafB, "TLeafB", i8, read_i8
);

/// `TLeafO`: boolean column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TLeafO {
    /// Common leaf fields.
    pub base: LeafBase,
    /// Smallest value the writer recorded.
    pub min: bool,
    /// Largest value the writer recorded.
    pub max: bool,
}

impl Streamed for TLeafO {
    fn class(&self) -> &'static str {
        "TLeafO"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (_vers, start, bcnt) = r.read_version();
        self.base.decode(r)?;
        self.min = r.read_u8() != 0;
        self.max = r.read_u8() != 0;
        r.check_byte_count(start, bcnt, beg, "TLeafO");
        r.status()
    }
}

/// A branch column, tagged by element type.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// 32-bit float column.
    F32(TLeafF),
    /// 64-bit float column.
    F64(TLeafD),
    /// 32-bit signed integer column.
    I32(TLeafI),
    /// 64-bit signed integer column.
    I64(TLeafL),
    /// 16-bit signed integer column.
    I16(TLeafS),
    /// 8-bit signed integer column.
    I8(TLeafB),
    /// Boolean column.
    Bool(TLeafO),
}

impl Leaf {
    /// Common leaf fields.
    pub fn base(&self) -> &LeafBase {
        match self {
            Leaf::F32(l) => &l.base,
            Leaf::F64(l) => &l.base,
            Leaf::I32(l) => &l.base,
            Leaf::I64(l) => &l.base,
            Leaf::I16(l) => &l.base,
            Leaf::I8(l) => &l.base,
            Leaf::Bool(l) => &l.base,
        }
    }

    /// Leaf name.
    pub fn name(&self) -> &str {
        &self.base().named.name
    }

    /// Size in bytes of one element.
    pub fn element_size(&self) -> usize {
        match self {
            Leaf::F32(_) | Leaf::I32(_) => 4,
            Leaf::F64(_) | Leaf::I64(_) => 8,
            Leaf::I16(_) => 2,
            Leaf::I8(_) | Leaf::Bool(_) => 1,
        }
    }
}

impl Streamed for Leaf {
    fn class(&self) -> &'static str {
        match self {
            Leaf::F32(l) => l.class(),
            Leaf::F64(l) => l.class(),
            Leaf::I32(l) => l.class(),
            Leaf::I64(l) => l.class(),
            Leaf::I16(l) => l.class(),
            Leaf::I8(l) => l.class(),
            Leaf::Bool(l) => l.class(),
        }
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        match self {
            Leaf::F32(l) => l.decode(r),
            Leaf::F64(l) => l.decode(r),
            Leaf::I32(l) => l.decode(r),
            Leaf::I64(l) => l.decode(r),
            Leaf::I16(l) => l.decode(r),
            Leaf::I8(l) => l.decode(r),
            Leaf::Bool(l) => l.decode(r),
        }
    }
}
