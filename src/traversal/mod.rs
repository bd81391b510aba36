//! Dependency-order graph traversal
//!
//! Walks a [`ComputationGraph`] from a root function towards its leaves,
//! following each input that is produced by another function.
//!
//! # Overview
//!
//! - Pre-order: a function is visited before the functions it depends on.
//! - Inputs are followed in declared order, depth first.
//! - Each function is visited once, even when reachable along several paths.
//! - Inputs, parameters, constants and placeholders are leaves.
//! - A dependency cycle is reported as [`ExportError::CycleDetected`].
//!
//! The walk keeps an explicit stack, so deep chains do not grow the call
//! stack.
//!
//! # Example
//!
//! ```ignore
//! use graphir_export::traversal::traverse;
//!
//! let order = traverse(&graph, root, |id, f| {
//!     println!("{} {}", f.uid, f.op_name);
//!     Ok(())
//! })?;
//! ```

use rustc_hash::FxHashMap;

use crate::error::{ExportError, ExportResult};
use crate::graph::{ComputationGraph, Function, FunctionId};

/// Visit state of a function during a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// Visited, dependencies still being walked
    InProgress,
    /// Visited, all dependencies walked
    Done,
}

struct Frame {
    id: FunctionId,
    next_input: usize,
}

/// Walk the graph from `root`, calling `visit` once per reachable function
///
/// Returns the functions in visitation order. An error from `visit` aborts
/// the walk and is returned unchanged.
pub fn traverse<F>(
    graph: &ComputationGraph,
    root: FunctionId,
    mut visit: F,
) -> ExportResult<Vec<FunctionId>>
where
    F: FnMut(FunctionId, &Function) -> ExportResult<()>,
{
    let mut marks: FxHashMap<FunctionId, Mark> = FxHashMap::default();
    let mut order = Vec::new();
    let mut stack = Vec::new();

    visit(root, graph.function(root)?)?;
    marks.insert(root, Mark::InProgress);
    order.push(root);
    stack.push(Frame {
        id: root,
        next_input: 0,
    });

    while let Some(frame) = stack.last_mut() {
        let function = graph.function(frame.id)?;

        let Some(&input) = function.inputs.get(frame.next_input) else {
            marks.insert(frame.id, Mark::Done);
            stack.pop();
            continue;
        };
        frame.next_input += 1;

        let Some(owner) = graph.variable(input)?.owner() else {
            continue;
        };

        match marks.get(&owner) {
            None => {
                visit(owner, graph.function(owner)?)?;
                marks.insert(owner, Mark::InProgress);
                order.push(owner);
                stack.push(Frame {
                    id: owner,
                    next_input: 0,
                });
            }
            Some(Mark::InProgress) => {
                return Err(ExportError::CycleDetected(graph.function(owner)?.uid.clone()));
            }
            Some(Mark::Done) => {}
        }
    }

    Ok(order)
}

/// Collect the functions reachable from `root` in visitation order
pub fn reachable_functions(
    graph: &ComputationGraph,
    root: FunctionId,
) -> ExportResult<Vec<FunctionId>> {
    traverse(graph, root, |_, _| Ok(()))
}

/// Check whether `root` reaches a dependency cycle
pub fn has_cycle(graph: &ComputationGraph, root: FunctionId) -> ExportResult<bool> {
    match reachable_functions(graph, root) {
        Ok(_) => Ok(false),
        Err(ExportError::CycleDetected(_)) => Ok(true),
        Err(e) => Err(e),
    }
}
