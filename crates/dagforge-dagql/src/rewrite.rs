use indexmap::{IndexMap, IndexSet};

use dagforge_core::{Kind, Program, RuntimeEntry};

use crate::predicate::Predicate;

/// Ids matching `p`, in `program.adj`'s deterministic iteration order.
pub fn select_where(program: &Program, p: &Predicate<'_>) -> IndexSet<String> {
    program
        .adj
        .keys()
        .filter(|id| p.test(program, id))
        .cloned()
        .collect()
}

/// Returns a new Program in which every id matching `p` has its entry
/// replaced by `f(old_entry)`. Entries that don't match are carried over
/// unchanged.
pub fn map_where(program: &Program, p: &Predicate<'_>, f: impl Fn(&RuntimeEntry) -> RuntimeEntry) -> Program {
    let matches = select_where(program, p);
    let adj: IndexMap<String, RuntimeEntry> = program
        .adj
        .iter()
        .map(|(id, entry)| {
            if matches.contains(id) {
                (id.clone(), f(entry))
            } else {
                (id.clone(), entry.clone())
            }
        })
        .collect();
    Program {
        root: program.root.clone(),
        adj,
        counter: program.counter.clone(),
    }
}

/// `map_where` specialized to swap the kind of every matching entry.
pub fn replace_where(program: &Program, p: &Predicate<'_>, new_kind: impl Into<Kind>) -> Program {
    let new_kind = new_kind.into();
    map_where(program, p, move |e| RuntimeEntry {
        kind: new_kind.clone(),
        children: e.children.clone(),
        out: e.out.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{by_kind, is_leaf, not};

    fn sample() -> Program {
        let mut adj = IndexMap::new();
        adj.insert(
            "a".to_string(),
            RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: None },
        );
        adj.insert(
            "b".to_string(),
            RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: None },
        );
        adj.insert(
            "c".to_string(),
            RuntimeEntry { kind: Kind::new("num/add"), children: vec!["a".into(), "b".into()], out: None },
        );
        Program { root: "c".to_string(), adj, counter: "d".to_string() }
    }

    #[test]
    fn select_where_partitions_completely() {
        let p = sample();
        let leaves = select_where(&p, &is_leaf());
        let non_leaves = select_where(&p, &not(is_leaf()));
        assert_eq!(leaves.len() + non_leaves.len(), p.adj.len());
        assert!(leaves.is_disjoint(&non_leaves));
    }

    #[test]
    fn map_where_identity_is_a_no_op() {
        let p = sample();
        let mapped = map_where(&p, &is_leaf(), |e| e.clone());
        assert_eq!(mapped, p);
    }

    #[test]
    fn replace_where_only_touches_matches() {
        let p = sample();
        let replaced = replace_where(&p, &by_kind("num/add"), "num/sub");
        assert_eq!(replaced.adj["c"].kind, Kind::new("num/sub"));
        assert_eq!(replaced.adj["a"], p.adj["a"]);
        assert_eq!(replaced.adj["b"], p.adj["b"]);
    }
}
