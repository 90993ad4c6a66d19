use std::collections::HashMap;

use indexmap::IndexMap;

use dagforge_core::{Program, RuntimeEntry};

use crate::coroutine::{BoxCoroutine, Step};
use crate::error::FoldError;
use crate::interpreter::Interpreter;
use crate::limits::FoldLimits;
use crate::value::Value;

struct Frame {
    id: String,
    coroutine: BoxCoroutine,
    pending: Option<Value>,
}

/// Evaluates `program` to a [`Value`] by driving `interpreter`'s
/// handlers through an explicit frame stack rather than native
/// recursion, so auxiliary native-stack depth stays O(1) regardless of
/// how deep or wide the program is. Each node's handler is instantiated
/// and driven to completion at most once, however many parents share
/// it; a handler that never yields an index for a given child never
/// causes that child's handler to be instantiated at all.
pub async fn fold(program: &Program, interpreter: &Interpreter) -> Result<Value, FoldError> {
    fold_with_limits(program, interpreter, FoldLimits::default()).await
}

pub async fn fold_with_limits(
    program: &Program,
    interpreter: &Interpreter,
    limits: FoldLimits,
) -> Result<Value, FoldError> {
    fold_from(&program.root, &program.adj, interpreter, limits).await
}

/// Like [`fold`], but takes a root id and adjacency map directly rather
/// than a committed `Program` — useful for evaluating a `Dirty` object
/// mid-edit, before it's been `commit`ted.
pub async fn fold_from(
    root: &str,
    adj: &IndexMap<String, RuntimeEntry>,
    interpreter: &Interpreter,
    limits: FoldLimits,
) -> Result<Value, FoldError> {
    let mut memo: HashMap<String, Value> = HashMap::new();
    let mut stack: Vec<Frame> = Vec::new();

    stack.push(push_frame(root, adj, interpreter)?);

    loop {
        let Some(top) = stack.last() else {
            unreachable!("loop only continues while the stack is nonempty");
        };

        if let Some(value) = memo.get(&top.id) {
            let value = value.clone();
            stack.pop();
            match stack.last_mut() {
                Some(parent) => parent.pending = Some(value),
                None => return Ok(value),
            }
            continue;
        }

        if stack.len() > limits.get_max_frame_depth() {
            return Err(FoldError::FrameLimitExceeded { limit: limits.get_max_frame_depth() });
        }

        let resume = stack.last_mut().expect("checked above").pending.take();
        let step = stack.last_mut().expect("checked above").coroutine.step(resume).await;

        match step {
            Step::Done(value) => {
                let frame = stack.pop().expect("top frame exists");
                memo.insert(frame.id.clone(), value.clone());
                match stack.last_mut() {
                    Some(parent) => parent.pending = Some(value),
                    None => return Ok(value),
                }
            }
            Step::Failed(message) => {
                let frame = stack.pop().expect("top frame exists");
                return Err(FoldError::HandlerFailed { id: frame.id, message });
            }
            Step::Yield(index) => {
                let top = stack.last().expect("top frame exists");
                let entry = adj
                    .get(&top.id)
                    .ok_or_else(|| FoldError::MissingNode { id: top.id.clone() })?;
                let child_id = entry.children.get(index).cloned().ok_or_else(|| {
                    FoldError::ChildIndexOutOfRange { id: top.id.clone(), index, len: entry.children.len() }
                })?;

                if let Some(value) = memo.get(&child_id) {
                    stack.last_mut().expect("top frame exists").pending = Some(value.clone());
                } else {
                    stack.push(push_frame(&child_id, adj, interpreter)?);
                }
            }
        }
    }
}

fn push_frame(id: &str, adj: &IndexMap<String, RuntimeEntry>, interpreter: &Interpreter) -> Result<Frame, FoldError> {
    let entry = adj.get(id).ok_or_else(|| FoldError::MissingNode { id: id.to_string() })?;
    let handler = interpreter
        .get(&entry.kind)
        .ok_or_else(|| FoldError::NoHandler { kind: entry.kind.clone() })?;
    Ok(Frame { id: id.to_string(), coroutine: handler(entry), pending: None })
}
