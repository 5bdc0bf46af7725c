//! Owning tree container and the branch linking pass.
//!
//! Decoding leaves every branch free-standing; a [`Tree`] takes ownership
//! of the top-level branches and runs a preorder walk that hands out
//! stable [`BranchId`]s and fills in the weak parent/mother handles. The
//! ids index a stored child-path table, so handle resolution never chases
//! owning pointers backwards.

use crate::objects::{BranchId, BranchLink, Named, TBranch};

/// A set of linked branches sharing an entry index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    /// Name and title.
    pub named: Named,
    /// Number of entries shared by all branches.
    pub entries: i64,
    branches: Vec<TBranch>,
    // BranchId -> child-index path from the top-level set
    paths: Vec<Vec<u32>>,
}

impl Tree {
    /// Take ownership of decoded branches and run the linking pass.
    pub fn new(named: Named, entries: i64, branches: Vec<TBranch>) -> Tree {
        let mut tree = Tree {
            named,
            entries,
            branches,
            paths: Vec::new(),
        };
        tree.link();
        tree
    }

    /// Tree name.
    pub fn name(&self) -> &str {
        &self.named.name
    }

    /// Top-level branches.
    pub fn branches(&self) -> &[TBranch] {
        &self.branches
    }

    /// Total number of branches, sub-branches included.
    pub fn n_branches(&self) -> usize {
        self.paths.len()
    }

    /// Resolve a handle assigned by the linking pass.
    pub fn branch(&self, id: BranchId) -> Option<&TBranch> {
        let path = self.paths.get(id.0 as usize)?;
        let (first, rest) = path.split_first()?;
        let mut b = self.branches.get(*first as usize)?;
        for &i in rest {
            b = b.branches.get(i as usize)?;
        }
        Some(b)
    }

    /// Find a branch by name, depth-first.
    pub fn find(&self, name: &str) -> Option<&TBranch> {
        fn walk<'a>(branches: &'a [TBranch], name: &str) -> Option<&'a TBranch> {
            for b in branches {
                if b.name() == name {
                    return Some(b);
                }
                if let Some(hit) = walk(&b.branches, name) {
                    return Some(hit);
                }
            }
            None
        }
        walk(&self.branches, name)
    }

    /// Names of all branches in preorder.
    pub fn branch_names(&self) -> Vec<&str> {
        fn walk<'a>(branches: &'a [TBranch], out: &mut Vec<&'a str>) {
            for b in branches {
                out.push(b.name());
                walk(&b.branches, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.branches, &mut out);
        out
    }

    fn link(&mut self) {
        let mut paths = Vec::new();
        for (i, b) in self.branches.iter_mut().enumerate() {
            let mut path = vec![i as u32];
            link_branch(b, None, None, &mut path, &mut paths);
        }
        self.paths = paths;
    }
}

fn link_branch(
    b: &mut TBranch,
    parent: Option<BranchId>,
    mother: Option<BranchId>,
    path: &mut Vec<u32>,
    paths: &mut Vec<Vec<u32>>,
) {
    let id = BranchId(paths.len() as u32);
    let mother = mother.unwrap_or(id);
    b.link = Some(BranchLink { id, parent, mother });
    paths.push(path.clone());
    for (i, child) in b.branches.iter_mut().enumerate() {
        path.push(i as u32);
        link_branch(child, Some(id), Some(mother), path, paths);
        path.pop();
    }
}
