//! `TObjArray`: an ordered container of polymorphic streamed elements.

use crate::error::{Result, RootError};
use crate::objects::{read_object_any, RootObj, Streamed};
use crate::rbuffer::RBuffer;

/// A decoded object array.
///
/// Elements are resolved through the element-prefix protocol: a class tag
/// for classes new to the stream, or a back-reference to an earlier tag or
/// element. Null slots are skipped, so `objs` holds decoded elements only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjArray {
    /// Container name, usually empty.
    pub name: String,
    /// Lower bound of the index range.
    pub low: i32,
    /// Index of the last element; `-1` for an empty array.
    pub last: i32,
    /// Decoded elements.
    pub objs: Vec<RootObj>,
}

impl ObjArray {
    /// Number of element slots declared by the header.
    pub fn declared_len(&self) -> usize {
        if self.last >= 0 {
            self.last as usize + 1
        } else {
            0
        }
    }
}

impl Streamed for ObjArray {
    fn class(&self) -> &'static str {
        "TObjArray"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (vers, start, bcnt) = r.read_version();
        r.status()?;
        if vers < 3 {
            return Err(r.fail(RootError::UnsupportedVersion {
                context: "TObjArray",
                version: vers,
            }));
        }
        self.name = r.read_string();
        self.low = r.read_i32();
        self.last = r.read_i32();
        r.status()?;

        self.objs = Vec::new();
        for _ in 0..self.declared_len() {
            if let Some(obj) = read_object_any(r)? {
                self.objs.push(obj);
            }
        }

        r.check_byte_count(start, bcnt, beg, "TObjArray");
        r.status()
    }
}
