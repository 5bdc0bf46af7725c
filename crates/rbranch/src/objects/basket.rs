//! Streamed basket headers cached inside a branch.

use crate::error::Result;
use crate::objects::Streamed;
use crate::rbuffer::RBuffer;

/// A basket header as streamed inside a branch's basket array.
///
/// The standalone on-disk basket record (a TKey-framed, possibly
/// compressed payload) belongs to the file container and is not decoded
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    /// Basket buffer size in bytes.
    pub buf_size: i32,
    /// Length of the entry-offset table in the basket buffer.
    pub nev_size: i32,
    /// Number of entries in the basket.
    pub nev_buf: i32,
    /// Position of the last used byte in the basket buffer.
    pub last: i32,
    /// Writer flag byte.
    pub flag: u8,
}

impl Streamed for Basket {
    fn class(&self) -> &'static str {
        "TBasket"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (_vers, start, bcnt) = r.read_version();
        self.buf_size = r.read_i32();
        self.nev_size = r.read_i32();
        self.nev_buf = r.read_i32();
        self.last = r.read_i32();
        self.flag = r.read_u8();
        r.check_byte_count(start, bcnt, beg, "TBasket");
        r.status()
    }
}
