use indexmap::IndexMap;

use crate::kind::Kind;
use crate::scalar::Scalar;

/// A normalized node: a concrete kind, sequential-id children, and an
/// optional immediate output (set for literals, absent otherwise).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RuntimeEntry {
    pub kind: Kind,
    pub children: Vec<String>,
    pub out: Option<Scalar>,
}

impl RuntimeEntry {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_alias(&self) -> bool {
        self.kind.as_str() == "@alias"
    }
}

/// An immutable, normalized DAG: every id is a short sequential string,
/// every child reference is guaranteed present in `adj`, and `counter`
/// is the next id `app`, or a later edit, would mint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Program {
    pub root: String,
    pub adj: IndexMap<String, RuntimeEntry>,
    pub counter: String,
}

impl Program {
    pub fn get(&self, id: &str) -> Option<&RuntimeEntry> {
        self.adj.get(id)
    }

    pub fn root_entry(&self) -> &RuntimeEntry {
        self.adj
            .get(&self.root)
            .expect("Program invariant: root must be present in adj")
    }

    /// Renders this Program as JSON, for diagnostics and test fixtures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a Program back from its `to_json` form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
