use crate::kind::TypeKey;

/// A raw value that can be embedded directly as an expression child and
/// lifted to a literal node during normalization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Scalar {
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Scalar {
    pub fn type_key(&self) -> TypeKey {
        match self {
            Scalar::Number(_) => TypeKey::new("number"),
            Scalar::String(_) => TypeKey::new("string"),
            Scalar::Boolean(_) => TypeKey::new("boolean"),
        }
    }

    /// The literal kind this scalar lifts to (`num/literal`, etc).
    pub fn literal_kind(&self) -> &'static str {
        match self {
            Scalar::Number(_) => "num/literal",
            Scalar::String(_) => "str/literal",
            Scalar::Boolean(_) => "bool/literal",
        }
    }

    /// Content-addressed id for this scalar as a lifted literal:
    /// `L<n>`, `S<s>`, `B<b>`. A string payload is escaped first, since
    /// `build` joins child ids with `,` and wraps them in `(`/`)` —
    /// without escaping, a string containing those characters could
    /// forge a fake child boundary and collide with an unrelated
    /// multi-child node's id.
    pub fn content_id(&self) -> String {
        match self {
            Scalar::Number(n) => format!("L{n}"),
            Scalar::String(s) => format!("S{}", escape_payload(s)),
            Scalar::Boolean(b) => format!("B{b}"),
        }
    }
}

/// Backslash-escapes the characters that are structurally significant
/// in `build`'s `"kind(child,child,...)"` id grammar (`,`, `(`, `)`, and
/// `\` itself so the escaping is unambiguous), so a string scalar's raw
/// payload can never be mistaken for a delimiter when embedded as a
/// child id.
fn escape_payload(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '\\' | ',' | '(' | ')') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_escapes_structural_delimiters() {
        let id = Scalar::String("a,Sb".to_string()).content_id();
        assert_eq!(id, "Sa\\,Sb");
        assert_ne!(id, "Sa,Sb");
    }

    #[test]
    fn distinct_strings_never_collide_after_escaping() {
        let a = Scalar::String("a,Sb".to_string()).content_id();
        let b = Scalar::String("a\\,Sb".to_string()).content_id();
        assert_ne!(a, b);
    }
}
