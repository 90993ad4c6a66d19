use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::NormalizeError;
use crate::expr::{ChildRef, Expr};
use crate::id_minter::IdMinter;
use crate::kind::{Kind, TypeKey};
use crate::program::{Program, RuntimeEntry};
use crate::registry::{Registry, RegistryEntry};
use crate::scalar::Scalar;

enum Frame {
    Enter(String),
    Exit(String),
    LiftScalar(Scalar),
}

/// Normalizes an expression value into a `Program`: mints short
/// sequential ids over a deterministic depth-first traversal, resolves
/// trait dispatch, lifts bare scalar children to literal nodes, and
/// validates every node's arity and child types against `registry`.
///
/// The traversal is driven by an explicit worklist (`Frame::Enter` /
/// `Frame::Exit`), not native recursion, so a long chain of nested
/// expressions normalizes without growing the call stack.
pub fn app(expr: &Expr, registry: &Registry) -> Result<Program, NormalizeError> {
    let mut seq_ids: HashMap<String, String> = HashMap::new();
    let mut types: HashMap<String, TypeKey> = HashMap::new();
    let mut out_adj: IndexMap<String, RuntimeEntry> = IndexMap::new();
    let mut minter = IdMinter::new();

    let mut stack = vec![Frame::Enter(expr.id.clone())];

    while let Some(frame) = stack.pop() {
        match frame {
            // A scalar child has no children of its own, so lifting it is
            // a leaf step; queuing it as its own frame (rather than doing
            // it inline while visiting the parent) keeps it interleaved
            // with `Enter`/`Exit` at the exact position left-to-right DFS
            // order puts it, instead of jumping the queue.
            Frame::LiftScalar(scalar) => {
                ensure_literal(&scalar, &mut seq_ids, &mut types, &mut out_adj, &mut minter);
            }
            Frame::Enter(cid) => {
                if seq_ids.contains_key(&cid) {
                    continue;
                }
                let raw = expr
                    .adj
                    .get(&cid)
                    .expect("Expr invariant: every content id referenced is present in adj");
                stack.push(Frame::Exit(cid.clone()));
                // Pushed in reverse so the first child is popped (and thus
                // visited) first: the stack is LIFO.
                for child in raw.children.iter().rev() {
                    match child {
                        ChildRef::Scalar(s) => {
                            if !seq_ids.contains_key(&s.content_id()) {
                                stack.push(Frame::LiftScalar(s.clone()));
                            }
                        }
                        ChildRef::Id(id) => {
                            if !seq_ids.contains_key(id) {
                                stack.push(Frame::Enter(id.clone()));
                            }
                        }
                    }
                }
            }
            Frame::Exit(cid) => {
                if seq_ids.contains_key(&cid) {
                    continue;
                }
                let raw = expr.adj.get(&cid).expect("checked present on Enter");

                let mut child_seq_ids = Vec::with_capacity(raw.children.len());
                let mut child_types = Vec::with_capacity(raw.children.len());
                for child in &raw.children {
                    let content_id = match child {
                        ChildRef::Scalar(s) => s.content_id(),
                        ChildRef::Id(id) => id.clone(),
                    };
                    let seq = seq_ids
                        .get(&content_id)
                        .expect("child normalized before parent in postorder")
                        .clone();
                    let ty = types.get(&seq).expect("type recorded alongside seq id").clone();
                    child_seq_ids.push(seq);
                    child_types.push(ty);
                }

                let mut kind = raw.kind.clone();
                let entry = registry
                    .get(&kind)
                    .ok_or_else(|| NormalizeError::UnknownKind { kind: kind.clone() })?;

                if let RegistryEntry::Trait(t) = entry {
                    let first_ty = child_types.first().cloned().unwrap_or_else(|| TypeKey::new("<no children>"));
                    let concrete = t.resolve(&first_ty).ok_or_else(|| NormalizeError::UnknownTraitDispatch {
                        trait_kind: kind.clone(),
                        type_key: first_ty.clone(),
                    })?;
                    kind = concrete.clone();
                }

                let concrete_entry = registry
                    .get(&kind)
                    .ok_or_else(|| NormalizeError::UnknownKind { kind: kind.clone() })?;
                let sig = match concrete_entry {
                    RegistryEntry::Concrete(sig) => sig,
                    RegistryEntry::Trait(_) => {
                        return Err(NormalizeError::UnknownKind { kind });
                    }
                };

                if sig.inputs.len() != child_seq_ids.len() {
                    return Err(NormalizeError::ArityMismatch {
                        kind,
                        expected: sig.inputs.len(),
                        actual: child_seq_ids.len(),
                    });
                }
                for (i, (expected, actual)) in sig.inputs.iter().zip(child_types.iter()).enumerate() {
                    if !expected.accepts(actual) {
                        return Err(NormalizeError::TypeMismatch {
                            kind,
                            index: i,
                            expected: expected.clone(),
                            actual: actual.clone(),
                        });
                    }
                }

                let seq_id = minter.mint();
                types.insert(seq_id.clone(), sig.output.clone());
                seq_ids.insert(cid.clone(), seq_id.clone());
                out_adj.insert(
                    seq_id,
                    RuntimeEntry {
                        kind,
                        children: child_seq_ids,
                        out: raw.out.clone(),
                    },
                );
            }
        }
    }

    let root = seq_ids
        .get(&expr.id)
        .expect("root is always visited first")
        .clone();

    Ok(Program {
        root,
        adj: out_adj,
        counter: minter.counter(),
    })
}

fn ensure_literal(
    scalar: &Scalar,
    seq_ids: &mut HashMap<String, String>,
    types: &mut HashMap<String, TypeKey>,
    out_adj: &mut IndexMap<String, RuntimeEntry>,
    minter: &mut IdMinter,
) {
    let content_id = scalar.content_id();
    if seq_ids.contains_key(&content_id) {
        return;
    }
    let seq_id = minter.mint();
    let ty = scalar.type_key();
    types.insert(seq_id.clone(), ty);
    seq_ids.insert(content_id, seq_id.clone());
    out_adj.insert(
        seq_id,
        RuntimeEntry {
            kind: Kind::new(scalar.literal_kind()),
            children: Vec::new(),
            out: Some(scalar.clone()),
        },
    );
}
