use indexmap::IndexMap;

use dagforge_core::{IdMinter, Program, RuntimeEntry};

use crate::error::CommitError;

/// A mutable staging form of a Program. Exclusively owned by its caller
/// between `dirty()` and `commit()`; edits are strictly local and are
/// not validated until `commit` runs the integrity checks.
pub struct Dirty {
    root: String,
    adj: IndexMap<String, RuntimeEntry>,
    minter: IdMinter,
}

impl Dirty {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn adj(&self) -> &IndexMap<String, RuntimeEntry> {
        &self.adj
    }

    pub fn add_entry(&mut self, id: impl Into<String>, entry: RuntimeEntry) {
        self.adj.insert(id.into(), entry);
    }

    pub fn remove_entry(&mut self, id: &str) -> Option<RuntimeEntry> {
        self.adj.shift_remove(id)
    }

    pub fn swap_entry(&mut self, id: &str, entry: RuntimeEntry) {
        self.adj.insert(id.to_string(), entry);
    }

    /// Replaces every occurrence of `from_child_id` in every entry's
    /// `children` list with `to_child_id`.
    pub fn rewire_children(&mut self, from_child_id: &str, to_child_id: &str) {
        for entry in self.adj.values_mut() {
            for child in entry.children.iter_mut() {
                if child == from_child_id {
                    *child = to_child_id.to_string();
                }
            }
        }
    }

    pub fn set_root(&mut self, id: impl Into<String>) {
        self.root = id.into();
    }

    pub fn mint_id(&mut self) -> String {
        self.minter.mint()
    }

    pub fn counter(&self) -> String {
        self.minter.counter()
    }
}

pub fn dirty(program: &Program) -> Dirty {
    Dirty {
        root: program.root.clone(),
        adj: program.adj.clone(),
        minter: IdMinter::resume_from(program.counter.clone()),
    }
}

/// Validates invariants (root present, no dangling children) and
/// produces an immutable Program.
pub fn commit(dirty: Dirty) -> Result<Program, CommitError> {
    if !dirty.adj.contains_key(&dirty.root) {
        return Err(CommitError::MissingRoot { root: dirty.root });
    }
    for (parent, entry) in &dirty.adj {
        for child in &entry.children {
            if !dirty.adj.contains_key(child) {
                return Err(CommitError::DanglingChild {
                    parent: parent.clone(),
                    child: child.clone(),
                });
            }
        }
    }
    Ok(Program {
        root: dirty.root,
        adj: dirty.adj,
        counter: dirty.minter.counter(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagforge_core::Kind;

    fn sample() -> Program {
        let mut adj = IndexMap::new();
        adj.insert(
            "a".to_string(),
            RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: None },
        );
        Program { root: "a".to_string(), adj, counter: "b".to_string() }
    }

    #[test]
    fn commit_of_dirty_is_identity() {
        let p = sample();
        let d = dirty(&p);
        let p2 = commit(d).unwrap();
        assert_eq!(p, p2);
    }

    #[test]
    fn commit_rejects_missing_root() {
        let p = sample();
        let mut d = dirty(&p);
        d.set_root("nope");
        let err = commit(d).unwrap_err();
        assert!(matches!(err, CommitError::MissingRoot { .. }));
    }

    #[test]
    fn commit_rejects_dangling_child() {
        let p = sample();
        let mut d = dirty(&p);
        d.add_entry(
            "b",
            RuntimeEntry { kind: Kind::new("num/add"), children: vec!["ghost".into()], out: None },
        );
        d.set_root("b");
        let err = commit(d).unwrap_err();
        assert!(matches!(err, CommitError::DanglingChild { .. }));
    }

    #[test]
    fn rewire_children_retargets_every_occurrence() {
        let mut adj = IndexMap::new();
        adj.insert("a".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: None });
        adj.insert("x".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: None });
        adj.insert(
            "c".to_string(),
            RuntimeEntry { kind: Kind::new("num/add"), children: vec!["a".into(), "a".into()], out: None },
        );
        let p = Program { root: "c".to_string(), adj, counter: "d".to_string() };
        let mut d = dirty(&p);
        d.rewire_children("a", "x");
        let p2 = commit(d).unwrap();
        assert_eq!(p2.adj["c"].children, vec!["x", "x"]);
    }
}
