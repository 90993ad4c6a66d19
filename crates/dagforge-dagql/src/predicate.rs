use dagforge_core::{Kind, Program};

/// A pure test over `(program, id)`. Wraps a boxed closure so predicates
/// compose (`not`/`and`/`or`) without callers needing to name a concrete
/// closure type at every call site.
pub struct Predicate<'a>(Box<dyn Fn(&Program, &str) -> bool + 'a>);

impl<'a> Predicate<'a> {
    pub fn new(f: impl Fn(&Program, &str) -> bool + 'a) -> Self {
        Predicate(Box::new(f))
    }

    pub fn test(&self, program: &Program, id: &str) -> bool {
        (self.0)(program, id)
    }
}

pub fn by_kind(kind: impl Into<Kind>) -> Predicate<'static> {
    let kind = kind.into();
    Predicate::new(move |program, id| program.get(id).map(|e| e.kind == kind).unwrap_or(false))
}

/// Matches any kind whose namespace segment is `prefix` (`"num"` matches
/// `"num/add"`, `"num/mul"`, …; `prefix` may be given with or without a
/// trailing `/`).
pub fn by_kind_glob(prefix: impl Into<String>) -> Predicate<'static> {
    let prefix = prefix.into();
    Predicate::new(move |program, id| program.get(id).map(|e| e.kind.starts_with(&prefix)).unwrap_or(false))
}

pub fn is_leaf() -> Predicate<'static> {
    Predicate::new(|program, id| program.get(id).map(|e| e.is_leaf()).unwrap_or(false))
}

pub fn has_child_count(n: usize) -> Predicate<'static> {
    Predicate::new(move |program, id| program.get(id).map(|e| e.children.len() == n).unwrap_or(false))
}

/// Matches the node aliased as `"@<alias>"`, i.e. the child of that
/// alias entry.
pub fn by_name(alias: impl Into<String>) -> Predicate<'static> {
    let alias_id = format!("@{}", alias.into());
    Predicate::new(move |program, id| {
        program
            .get(&alias_id)
            .map(|alias_entry| alias_entry.children.first().map(String::as_str) == Some(id))
            .unwrap_or(false)
    })
}

pub fn not<'a>(p: Predicate<'a>) -> Predicate<'a> {
    Predicate::new(move |program, id| !p.test(program, id))
}

pub fn and<'a>(ps: Vec<Predicate<'a>>) -> Predicate<'a> {
    Predicate::new(move |program, id| ps.iter().all(|p| p.test(program, id)))
}

pub fn or<'a>(ps: Vec<Predicate<'a>>) -> Predicate<'a> {
    Predicate::new(move |program, id| ps.iter().any(|p| p.test(program, id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn program_with(kinds: &[(&str, &str, usize)]) -> Program {
        let mut adj = IndexMap::new();
        for (id, kind, child_count) in kinds {
            adj.insert(
                id.to_string(),
                dagforge_core::RuntimeEntry {
                    kind: Kind::new(*kind),
                    children: (0..*child_count).map(|i| format!("child{i}")).collect(),
                    out: None,
                },
            );
        }
        Program {
            root: kinds.first().map(|(id, _, _)| id.to_string()).unwrap_or_default(),
            adj,
            counter: "z".to_string(),
        }
    }

    #[test]
    fn by_kind_matches_exactly() {
        let program = program_with(&[("a", "num/add", 2), ("b", "num/mul", 2)]);
        let p = by_kind("num/add");
        assert!(p.test(&program, "a"));
        assert!(!p.test(&program, "b"));
    }

    #[test]
    fn glob_matches_namespace() {
        let program = program_with(&[("a", "num/add", 2), ("b", "str/concat", 2)]);
        let p = by_kind_glob("num");
        assert!(p.test(&program, "a"));
        assert!(!p.test(&program, "b"));
    }

    #[test]
    fn not_and_or_compose() {
        let program = program_with(&[("a", "num/add", 2), ("b", "num/literal", 0)]);
        let leaf = is_leaf();
        let compound = not(is_leaf());
        assert!(leaf.test(&program, "b"));
        assert!(compound.test(&program, "a"));
        assert!(or(vec![by_kind("num/add"), by_kind("num/literal")]).test(&program, "a"));
        assert!(and(vec![by_kind("num/add"), has_child_count(2)]).test(&program, "a"));
        assert!(!and(vec![by_kind("num/add"), has_child_count(0)]).test(&program, "a"));
    }

    #[test]
    fn partition_by_predicate_is_total_and_disjoint() {
        let program = program_with(&[("a", "num/add", 2), ("b", "num/literal", 0), ("c", "str/literal", 0)]);
        let p = is_leaf();
        let matches: Vec<&str> = program.adj.keys().filter(|id| p.test(&program, id)).map(String::as_str).collect();
        let non_matches: Vec<&str> = program
            .adj
            .keys()
            .filter(|id| not(is_leaf()).test(&program, id))
            .map(String::as_str)
            .collect();
        assert_eq!(matches.len() + non_matches.len(), program.adj.len());
        for id in &matches {
            assert!(!non_matches.contains(id));
        }
    }
}
