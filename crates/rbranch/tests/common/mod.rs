//! Shared wire-format fixture builder.
//!
//! Everything here writes the big-endian streamed-object format the crate
//! decodes: byte-count frames, `TObject`/`TNamed`/`TAttFill` preambles,
//! object-array element prefixes, and whole `TBranch` payloads.

#![allow(dead_code)]

pub const BYTE_COUNT_MASK: u32 = 0x4000_0000;
pub const NEW_CLASS_TAG: u32 = 0xFFFF_FFFF;
pub const CLASS_MASK: u32 = 0x8000_0000;

/// Big-endian byte writer.
#[derive(Default)]
pub struct W {
    pub buf: Vec<u8>,
}

impl W {
    pub fn new() -> W {
        W::default()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn i8(&mut self, v: i8) {
        self.buf.push(v as u8);
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    pub fn f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_bits().to_be_bytes());
    }

    pub fn bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    /// Length-prefixed string (short form; fixtures stay under 255 bytes).
    pub fn string(&mut self, s: &str) {
        assert!(s.len() < 255);
        self.buf.push(s.len() as u8);
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// NUL-terminated string.
    pub fn cstr(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
    }
}

/// Wrap `body` in a class header: byte-count word, version, body. The
/// byte count covers the version word and the body.
pub fn framed(vers: u16, body: &[u8]) -> Vec<u8> {
    framed_padded(vers, body, 0)
}

/// Like [`framed`], with the declared byte count off by `extra` bytes.
pub fn framed_padded(vers: u16, body: &[u8], extra: i64) -> Vec<u8> {
    let bcnt = (body.len() as i64 + 2 + extra) as u32;
    let mut w = W::new();
    w.u32(BYTE_COUNT_MASK | bcnt);
    w.u16(vers);
    w.bytes(body);
    w.buf
}

/// `TObject` header: version, unique id, bits (not referenced).
pub fn tobject() -> Vec<u8> {
    let mut w = W::new();
    w.u16(1);
    w.u32(0);
    w.u32(0x0300_0000);
    w.buf
}

/// A framed `TNamed`.
pub fn named(name: &str, title: &str) -> Vec<u8> {
    let mut w = W::new();
    w.bytes(&tobject());
    w.string(name);
    w.string(title);
    framed(1, &w.buf)
}

/// A framed `TAttFill`.
pub fn attfill(color: i16, style: i16) -> Vec<u8> {
    let mut w = W::new();
    w.i16(color);
    w.i16(style);
    framed(2, &w.buf)
}

/// A framed `TObjArray` with `n` declared slots and pre-encoded element
/// bytes.
pub fn objarray(name: &str, low: i32, n: usize, elements: &[u8]) -> Vec<u8> {
    let mut w = W::new();
    w.string(name);
    w.i32(low);
    w.i32(n as i32 - 1);
    w.bytes(elements);
    framed(3, &w.buf)
}

/// An element introducing `class` to the stream: byte-count word, new
/// class tag, NUL-terminated class name, then the object bytes.
pub fn new_class_element(class: &str, obj: &[u8]) -> Vec<u8> {
    let inner = 4 + class.len() + 1 + obj.len();
    let mut w = W::new();
    w.u32(BYTE_COUNT_MASK | inner as u32);
    w.u32(NEW_CLASS_TAG);
    w.cstr(class);
    w.bytes(obj);
    w.buf
}

/// An element referencing the object whose element prefix started at
/// absolute offset `target_beg`.
pub fn obj_ref_element(target_beg: usize) -> Vec<u8> {
    let mut w = W::new();
    w.u32(target_beg as u32 + 2);
    w.buf
}

/// A framed `TLeafF` object with `len = 1`, no range, null counter.
pub fn leaf_f(name: &str) -> Vec<u8> {
    typed_leaf(name, 4, |w| {
        w.f32(0.0);
        w.f32(0.0);
    })
}

/// A framed `TLeafD` object.
pub fn leaf_d(name: &str) -> Vec<u8> {
    typed_leaf(name, 8, |w| {
        w.f64(0.0);
        w.f64(0.0);
    })
}

fn typed_leaf(name: &str, etype: i32, min_max: impl FnOnce(&mut W)) -> Vec<u8> {
    let mut base = W::new();
    base.bytes(&named(name, ""));
    base.i32(1); // len
    base.i32(etype);
    base.i32(0); // offset
    base.u8(0); // has_range
    base.u8(0); // unsigned
    base.u32(0); // null counter leaf
    let base = framed(2, &base.buf);

    let mut w = W::new();
    w.bytes(&base);
    min_max(&mut w);
    framed(1, &w.buf)
}

/// A framed `TBasket` object.
pub fn basket(nev_buf: i32, last: i32) -> Vec<u8> {
    let mut w = W::new();
    w.i32(32000);
    w.i32(0);
    w.i32(nev_buf);
    w.i32(last);
    w.u8(0);
    framed(3, &w.buf)
}

/// Declarative `TBranch` payload.
pub struct BranchFix {
    pub version: u16,
    pub name: String,
    pub title: String,
    pub fill: (i16, i16),
    pub compress: i32,
    pub basket_size: i32,
    pub entry_offset_len: i32,
    pub write_basket: i32,
    pub entry_number: i64,
    pub offset: i32,
    pub max_baskets: i32,
    pub split_level: i32,
    pub entries: i64,
    pub first_entry: i64,
    pub tot_bytes: i64,
    pub zip_bytes: i64,
    pub children: Vec<BranchFix>,
    /// Extra pre-encoded elements for the sub-branch array (prefix
    /// included), appended after `children`.
    pub branch_elements: Vec<Vec<u8>>,
    /// Pre-encoded leaf elements (prefix included).
    pub leaf_elements: Vec<Vec<u8>>,
    /// Pre-encoded basket elements (prefix included).
    pub basket_elements: Vec<Vec<u8>>,
    pub basket_bytes: Vec<i32>,
    pub basket_entry: Vec<i64>,
    pub basket_seek: Vec<i64>,
    pub fname: String,
    /// Corruption knob: added to the declared byte count of the outer
    /// frame without changing the payload.
    pub byte_count_extra: i64,
}

impl Default for BranchFix {
    fn default() -> Self {
        BranchFix {
            version: 12,
            name: "px".into(),
            title: String::new(),
            fill: (0, 0),
            compress: 0,
            basket_size: 0,
            entry_offset_len: 0,
            write_basket: 0,
            entry_number: 0,
            offset: 0,
            max_baskets: 0,
            split_level: 0,
            entries: 0,
            first_entry: 0,
            tot_bytes: 0,
            zip_bytes: 0,
            children: Vec::new(),
            branch_elements: Vec::new(),
            leaf_elements: Vec::new(),
            basket_elements: Vec::new(),
            basket_bytes: Vec::new(),
            basket_entry: Vec::new(),
            basket_seek: Vec::new(),
            fname: String::new(),
            byte_count_extra: 0,
        }
    }
}

impl BranchFix {
    pub fn with_name(name: &str) -> BranchFix {
        BranchFix {
            name: name.into(),
            ..BranchFix::default()
        }
    }

    /// Encode the payload, starting at the branch class header.
    pub fn encode(&self) -> Vec<u8> {
        let mut b = W::new();
        b.bytes(&named(&self.name, &self.title));
        b.bytes(&attfill(self.fill.0, self.fill.1));

        b.i32(self.compress);
        b.i32(self.basket_size);
        b.i32(self.entry_offset_len);
        b.i32(self.write_basket);
        b.i64(self.entry_number);
        b.i32(self.offset);
        b.i32(self.max_baskets);
        b.i32(self.split_level);
        b.i64(self.entries);
        b.i64(self.first_entry);
        b.i64(self.tot_bytes);
        b.i64(self.zip_bytes);

        let mut elems = Vec::new();
        for child in &self.children {
            elems.extend_from_slice(&new_class_element("TBranch", &child.encode()));
        }
        for extra in &self.branch_elements {
            elems.extend_from_slice(extra);
        }
        b.bytes(&objarray(
            "",
            0,
            self.children.len() + self.branch_elements.len(),
            &elems,
        ));

        let mut elems = Vec::new();
        for leaf in &self.leaf_elements {
            elems.extend_from_slice(leaf);
        }
        b.bytes(&objarray("", 0, self.leaf_elements.len(), &elems));

        let mut elems = Vec::new();
        for basket in &self.basket_elements {
            elems.extend_from_slice(basket);
        }
        b.bytes(&objarray("", 0, self.basket_elements.len(), &elems));

        let n = self.max_baskets.max(0) as usize;
        b.i8(1);
        for i in 0..n {
            b.i32(self.basket_bytes.get(i).copied().unwrap_or(0));
        }
        b.i8(1);
        for i in 0..n {
            b.i64(self.basket_entry.get(i).copied().unwrap_or(0));
        }
        b.i8(1);
        for i in 0..n {
            b.i64(self.basket_seek.get(i).copied().unwrap_or(0));
        }

        b.string(&self.fname);

        framed_padded(self.version, &b.buf, self.byte_count_extra)
    }
}
