//! Process-wide registry mapping class tags to constructors.
//!
//! The table is built once at first use and read-only afterwards, so
//! concurrent decoders share it without locking.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::{Result, RootError};
use crate::objects::leaf::{TLeafB, TLeafD, TLeafF, TLeafI, TLeafL, TLeafO, TLeafS};
use crate::objects::{AttFill, Basket, Leaf, Named, ObjArray, RootObj, TBranch};

type Constructor = fn() -> RootObj;

static REGISTRY: Lazy<HashMap<&'static str, Constructor>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, Constructor> = HashMap::new();
    add(&mut m, "TNamed", || RootObj::Named(Named::default()));
    add(&mut m, "TAttFill", || RootObj::AttFill(AttFill::default()));
    add(&mut m, "TObjArray", || RootObj::ObjArray(ObjArray::default()));
    add(&mut m, "TBranch", || RootObj::Branch(TBranch::default()));
    add(&mut m, "TBasket", || RootObj::Basket(Basket::default()));
    add(&mut m, "TLeafF", || RootObj::Leaf(Leaf::F32(TLeafF::default())));
    add(&mut m, "TLeafD", || RootObj::Leaf(Leaf::F64(TLeafD::default())));
    add(&mut m, "TLeafI", || RootObj::Leaf(Leaf::I32(TLeafI::default())));
    add(&mut m, "TLeafL", || RootObj::Leaf(Leaf::I64(TLeafL::default())));
    add(&mut m, "TLeafS", || RootObj::Leaf(Leaf::I16(TLeafS::default())));
    add(&mut m, "TLeafB", || RootObj::Leaf(Leaf::I8(TLeafB::default())));
    add(&mut m, "TLeafO", || RootObj::Leaf(Leaf::Bool(TLeafO::default())));
    m
});

fn add(m: &mut HashMap<&'static str, Constructor>, tag: &'static str, ctor: Constructor) {
    if m.insert(tag, ctor).is_some() {
        panic!("duplicate factory entry for class {tag}");
    }
}

/// Construct a fresh, empty object for the given class tag.
pub fn new_object(tag: &str) -> Result<RootObj> {
    match REGISTRY.get(tag) {
        Some(ctor) => Ok(ctor()),
        None => Err(RootError::UnknownClass {
            tag: tag.to_string(),
        }),
    }
}

/// Whether a constructor is registered for the given class tag.
pub fn is_registered(tag: &str) -> bool {
    REGISTRY.contains_key(tag)
}
