use std::collections::HashSet;

use indexmap::IndexMap;

use dagforge_core::{Kind, Program, RuntimeEntry};

use crate::dirty::{commit, dirty};
use crate::error::SpliceError;
use crate::predicate::Predicate;
use crate::rewrite::select_where;

/// Mints a fresh id, rewires every existing parent of `target_id` to
/// point at it instead, and only then inserts the wrapper entry
/// `{kind: wrapper_kind, children: [target_id]}` — in that order, so the
/// just-introduced wrapper-to-target edge is never itself rewired away.
pub fn wrap_by_name(program: &Program, target_id: &str, wrapper_kind: impl Into<Kind>) -> Program {
    let mut d = dirty(program);
    let wrapper_id = d.mint_id();
    let was_root = d.root() == target_id;

    d.rewire_children(target_id, &wrapper_id);
    d.add_entry(
        wrapper_id.clone(),
        RuntimeEntry {
            kind: wrapper_kind.into(),
            children: vec![target_id.to_string()],
            out: None,
        },
    );
    if was_root {
        d.set_root(wrapper_id);
    }

    commit(d).expect("wrap_by_name preserves both invariants by construction")
}

/// For every id matching `p` (processed bottom-up so a node's own
/// matches settle before its ancestors' child lists are rewritten):
/// removes it and inlines its children into every parent's child list
/// at the position it occupied.
pub fn splice_where(program: &Program, p: &Predicate<'_>) -> Result<Program, SpliceError> {
    let matches = select_where(program, p);
    if matches.is_empty() {
        return Ok(program.clone());
    }

    if matches.contains(&program.root) && program.root_entry().children.is_empty() {
        return Err(SpliceError::SpliceRootLeaf { root: program.root.clone() });
    }

    // Bottom-up order: ids whose own children are never themselves
    // matched come first, so splicing a matched id's children never
    // needs to re-expand an already-spliced id ahead of it. `adj`'s
    // natural order (mint order) already satisfies this, since a
    // parent's sequential id is always minted after its children's.
    let mut ordered: Vec<&String> = matches.iter().collect();
    ordered.sort_by_key(|id| (id.len(), (*id).clone()));

    let mut new_children: IndexMap<String, Vec<String>> =
        program.adj.iter().map(|(id, e)| (id.clone(), e.children.clone())).collect();

    for matched in &ordered {
        let replacement = new_children.get(*matched).cloned().unwrap_or_default();
        for children in new_children.values_mut() {
            if children.iter().any(|c| c == *matched) {
                let expanded: Vec<String> = children
                    .iter()
                    .flat_map(|c| {
                        if c == *matched {
                            replacement.clone()
                        } else {
                            vec![c.clone()]
                        }
                    })
                    .collect();
                *children = expanded;
            }
        }
    }

    let mut root = program.root.clone();
    if matches.contains(&root) {
        root = new_children[&root].first().cloned().unwrap_or(root);
    }

    let adj: IndexMap<String, RuntimeEntry> = program
        .adj
        .iter()
        .filter(|(id, _)| !matches.contains(*id))
        .map(|(id, e)| {
            (
                id.clone(),
                RuntimeEntry {
                    kind: e.kind.clone(),
                    children: new_children.remove(id).unwrap_or_default(),
                    out: e.out.clone(),
                },
            )
        })
        .collect();

    Ok(Program { root, adj, counter: program.counter.clone() })
}

fn reachable_from_root(program: &Program) -> HashSet<String> {
    let mut seen = HashSet::new();
    let mut stack = vec![program.root.clone()];
    seen.insert(program.root.clone());
    while let Some(id) = stack.pop() {
        if let Some(entry) = program.get(&id) {
            for child in &entry.children {
                if seen.insert(child.clone()) {
                    stack.push(child.clone());
                }
            }
        }
    }
    seen
}

/// Drops every id unreachable from `root`, and all alias entries.
pub fn gc(program: &Program) -> Program {
    let reachable = reachable_from_root(program);
    let adj: IndexMap<String, RuntimeEntry> = program
        .adj
        .iter()
        .filter(|(id, e)| reachable.contains(*id) && !e.is_alias())
        .map(|(id, e)| (id.clone(), e.clone()))
        .collect();
    Program { root: program.root.clone(), adj, counter: program.counter.clone() }
}

/// Like `gc`, but keeps alias entries whose target is reachable.
pub fn gc_preserving_aliases(program: &Program) -> Program {
    let reachable = reachable_from_root(program);
    let adj: IndexMap<String, RuntimeEntry> = program
        .adj
        .iter()
        .filter(|(id, e)| {
            if e.is_alias() {
                e.children.first().map(|t| reachable.contains(t)).unwrap_or(false)
            } else {
                reachable.contains(*id)
            }
        })
        .map(|(id, e)| (id.clone(), e.clone()))
        .collect();
    Program { root: program.root.clone(), adj, counter: program.counter.clone() }
}

/// Binds a user-visible alias `"@<alias>"` to `target_id`.
pub fn name(program: &Program, alias: &str, target_id: &str) -> Program {
    let mut d = dirty(program);
    d.add_entry(
        format!("@{alias}"),
        RuntimeEntry {
            kind: Kind::new("@alias"),
            children: vec![target_id.to_string()],
            out: None,
        },
    );
    commit(d).expect("naming an existing node cannot introduce a dangling reference")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::by_kind;

    fn scenario_1() -> Program {
        let mut adj = IndexMap::new();
        adj.insert("a".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: Some(dagforge_core::Scalar::Number(3.0)) });
        adj.insert("b".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: Some(dagforge_core::Scalar::Number(4.0)) });
        adj.insert("c".to_string(), RuntimeEntry { kind: Kind::new("num/add"), children: vec!["a".into(), "b".into()], out: None });
        adj.insert("d".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: Some(dagforge_core::Scalar::Number(5.0)) });
        adj.insert("e".to_string(), RuntimeEntry { kind: Kind::new("num/mul"), children: vec!["c".into(), "d".into()], out: None });
        Program { root: "e".to_string(), adj, counter: "f".to_string() }
    }

    #[test]
    fn wrap_by_name_inserts_between_target_and_its_parents() {
        let p = scenario_1();
        let wrapped = wrap_by_name(&p, "c", "debug/wrap");
        assert_eq!(wrapped.counter, "g");
        assert_eq!(wrapped.adj["f"].kind, Kind::new("debug/wrap"));
        assert_eq!(wrapped.adj["f"].children, vec!["c"]);
        assert_eq!(wrapped.adj["e"].children, vec!["f", "d"]);
        assert_eq!(wrapped.adj["c"], p.adj["c"]);
    }

    #[test]
    fn splice_undoes_wrap() {
        let p = scenario_1();
        let wrapped = wrap_by_name(&p, "c", "debug/wrap");
        let spliced = splice_where(&wrapped, &by_kind("debug/wrap")).unwrap();
        assert_eq!(spliced.adj["e"].children, vec!["c", "d"]);
        assert!(!spliced.adj.contains_key("f"));
    }

    #[test]
    fn splice_root_leaf_is_refused() {
        let mut adj = IndexMap::new();
        adj.insert("a".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: Some(dagforge_core::Scalar::Number(1.0)) });
        let p = Program { root: "a".to_string(), adj, counter: "b".to_string() };
        let err = splice_where(&p, &by_kind("num/literal")).unwrap_err();
        assert!(matches!(err, SpliceError::SpliceRootLeaf { .. }));
    }

    #[test]
    fn gc_drops_unreachable_and_aliases() {
        let p = scenario_1();
        let named = name(&p, "sum", "c");
        let mut adj = named.adj.clone();
        adj.insert("z".to_string(), RuntimeEntry { kind: Kind::new("num/literal"), children: vec![], out: Some(dagforge_core::Scalar::Number(99.0)) });
        let with_junk = Program { root: named.root.clone(), adj, counter: named.counter.clone() };

        let collected = gc(&with_junk);
        assert!(!collected.adj.contains_key("z"));
        assert!(!collected.adj.contains_key("@sum"));

        let preserved = gc_preserving_aliases(&with_junk);
        assert!(!preserved.adj.contains_key("z"));
        assert!(preserved.adj.contains_key("@sum"));
    }

    #[test]
    fn by_name_selects_the_aliased_node() {
        let p = scenario_1();
        let named = name(&p, "sum", "c");
        let selected = select_where(&named, &crate::predicate::by_name("sum"));
        assert!(selected.contains("c"));
        assert_eq!(selected.len(), 1);
    }
}
