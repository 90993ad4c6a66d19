use indexmap::IndexMap;

use crate::kind::{Kind, TypeKey};
use crate::scalar::Scalar;

/// A reference to a child of an expression node: either an already-built
/// expression (reachable through `adj`) or a raw scalar awaiting lifting
/// to a literal node at normalization time.
#[derive(Clone, Debug)]
pub enum ChildRef {
    Id(String),
    Scalar(Scalar),
}

/// A pre-normalization node: the raw material the normalizer walks.
#[derive(Clone, Debug)]
pub struct RawEntry {
    pub kind: Kind,
    pub children: Vec<ChildRef>,
    pub out: Option<Scalar>,
}

/// An expression value produced by a constructor. Carries its own
/// content-addressed id and the merged adjacency map of every descendant
/// built so far, so that structurally identical subexpressions collide
/// to the same id (automatic DAG sharing) the moment they're combined.
#[derive(Clone, Debug)]
pub struct Expr {
    pub id: String,
    pub adj: IndexMap<String, RawEntry>,
    /// Constructor-declared output type, as a hint only. Concrete
    /// constructors set this to their statically known output type;
    /// trait constructors leave it `None`. The normalizer never trusts
    /// this field for validation — it always re-derives the true output
    /// type-key from the registry once a node has been normalized.
    pub out_type: Option<TypeKey>,
}

/// Anything that can appear as a constructor argument: another
/// expression, or a bare scalar that gets lifted implicitly.
pub trait IntoChild {
    fn into_child(self) -> ChildRefWithAdj;
}

/// A child reference paired with whatever adjacency entries it brings
/// along (non-empty only when the child is itself an `Expr`).
pub struct ChildRefWithAdj {
    pub child_ref: ChildRef,
    pub adj: IndexMap<String, RawEntry>,
}

impl IntoChild for Expr {
    fn into_child(self) -> ChildRefWithAdj {
        ChildRefWithAdj {
            child_ref: ChildRef::Id(self.id),
            adj: self.adj,
        }
    }
}

macro_rules! impl_into_child_for_scalar {
    ($ty:ty) => {
        impl IntoChild for $ty {
            fn into_child(self) -> ChildRefWithAdj {
                ChildRefWithAdj {
                    child_ref: ChildRef::Scalar(Scalar::from(self)),
                    adj: IndexMap::new(),
                }
            }
        }
    };
}

impl_into_child_for_scalar!(f64);
impl_into_child_for_scalar!(i32);
impl_into_child_for_scalar!(bool);
impl_into_child_for_scalar!(&str);
impl_into_child_for_scalar!(String);

/// Builds a compound expression node: merges every child's adjacency map
/// (identical ids collapse automatically), mints this node's
/// content-addressed id from its kind and its children's ids, and
/// inserts the new entry.
///
/// Used by every plugin's constructor wrapper functions; not part of
/// this crate's Non-goals to expose since plugins are first-class
/// callers of it.
pub fn build(kind: impl Into<Kind>, children: Vec<ChildRefWithAdj>, out_type: Option<TypeKey>) -> Expr {
    let kind = kind.into();
    let mut adj = IndexMap::new();
    let mut child_ids = Vec::with_capacity(children.len());
    let mut raw_children = Vec::with_capacity(children.len());

    for child in children {
        adj.extend(child.adj);
        match &child.child_ref {
            ChildRef::Id(id) => child_ids.push(id.clone()),
            ChildRef::Scalar(s) => child_ids.push(s.content_id()),
        }
        raw_children.push(child.child_ref);
    }

    let id = format!("{kind}({})", child_ids.join(","));
    adj.insert(
        id.clone(),
        RawEntry {
            kind,
            children: raw_children,
            out: None,
        },
    );

    Expr { id, adj, out_type }
}

/// Builds a leaf literal expression node directly from a scalar.
pub fn literal(scalar: Scalar) -> Expr {
    let id = scalar.content_id();
    let kind = Kind::new(scalar.literal_kind());
    let type_key = scalar.type_key();
    let mut adj = IndexMap::new();
    adj.insert(
        id.clone(),
        RawEntry {
            kind,
            children: Vec::new(),
            out: Some(scalar),
        },
    );
    Expr {
        id,
        adj,
        out_type: Some(type_key),
    }
}
