//! Universal streamed-object preambles.

use crate::error::Result;
use crate::objects::Streamed;
use crate::rbuffer::RBuffer;

/// `TNamed`: name and title, behind the `TObject` header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Named {
    /// Object name.
    pub name: String,
    /// Object title.
    pub title: String,
}

impl Streamed for Named {
    fn class(&self) -> &'static str {
        "TNamed"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (_vers, start, bcnt) = r.read_version();
        r.read_tobject();
        self.name = r.read_string();
        self.title = r.read_string();
        r.check_byte_count(start, bcnt, beg, "TNamed");
        r.status()
    }
}

/// `TAttFill`: fill color and style attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttFill {
    /// Fill color index.
    pub fill_color: i16,
    /// Fill style index.
    pub fill_style: i16,
}

impl Streamed for AttFill {
    fn class(&self) -> &'static str {
        "TAttFill"
    }

    fn decode(&mut self, r: &mut RBuffer<'_>) -> Result<()> {
        r.status()?;
        let beg = r.pos();
        let (_vers, start, bcnt) = r.read_version();
        self.fill_color = r.read_i16();
        self.fill_style = r.read_i16();
        r.check_byte_count(start, bcnt, beg, "TAttFill");
        r.status()
    }
}
