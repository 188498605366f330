//! Checks over expression kinds

use crate::{
    sema::LowerError,
    syntax::{ExprCall, Node, NodeRef},
};

/// Calls whose function expression never evaluates to a function, e.g., `1 2` or `"f" x`.
///
/// Based on [`NodeKind::might_be_lambda`](crate::syntax::NodeKind::might_be_lambda), so a call
/// that is reported always fails at evaluation.
pub fn not_a_function(root: NodeRef<'_>) -> Vec<LowerError> {
    root.descendants()
        .filter_map(|node| node.cast::<ExprCall>())
        .filter(|call| !call.func().might_be_lambda())
        .map(|call| {
            let func = call.func();
            log::debug!("not a function: {} at {:?}", func.kind(), func.range());
            LowerError::NotAFunction {
                kind: func.kind(),
                range: func.range(),
            }
        })
        .collect()
}
