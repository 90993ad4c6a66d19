use std::borrow::Borrow;
use std::fmt;

/// A namespaced node-kind identifier, e.g. `"num/add"`.
///
/// Wrapped in its own type rather than passed around as `String` so it
/// can't be confused with an id, an alias name, or a type-key at a call
/// site — all of which are also plain strings flowing through this crate.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Kind(String);

impl Kind {
    pub fn new(s: impl Into<String>) -> Self {
        Kind(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this kind's namespace segment matches `prefix`, i.e. the
    /// kind is `"{prefix}/..."` or exactly `prefix` itself.
    pub fn starts_with(&self, prefix: &str) -> bool {
        let prefix = prefix.trim_end_matches('/');
        self.0 == prefix || self.0.starts_with(&format!("{prefix}/"))
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind({:?})", self.0)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Kind {
    fn from(s: &str) -> Self {
        Kind(s.to_string())
    }
}

impl From<String> for Kind {
    fn from(s: String) -> Self {
        Kind(s)
    }
}

impl Borrow<str> for Kind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A type-key used in registry signatures (`"number"`, `"string"`,
/// `"boolean"`, an opaque custom key, or the wildcard `"any"`).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct TypeKey(String);

impl TypeKey {
    pub const ANY: &'static str = "any";

    pub fn new(s: impl Into<String>) -> Self {
        TypeKey(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0 == Self::ANY
    }

    /// Matches if either side is the wildcard, or both sides are equal.
    pub fn accepts(&self, other: &TypeKey) -> bool {
        self.is_any() || other.is_any() || self == other
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({:?})", self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(s: &str) -> Self {
        TypeKey(s.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(s: String) -> Self {
        TypeKey(s)
    }
}
