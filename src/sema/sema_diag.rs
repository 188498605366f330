//! Lowering diagnostics

use base::span::CursorRange;
use thiserror::Error;

use crate::{
    syntax::NodeKind,
    util::diag::{self, Diagnostic},
};

/// Problem in user code found while lowering
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LowerError {
    /// `{ a = 1; a = 2; }`
    #[error("duplicated attribute `{name}`")]
    DuplicatedAttr {
        name: String,
        /// The second key
        range: CursorRange,
        /// The first definition. `None` if it was synthesized from an attribute path.
        prev: Option<CursorRange>,
    },
    /// `let ${x} = 1; in ..`
    #[error("dynamic attribute is not allowed in `let`")]
    DynamicInLet { range: CursorRange },
    /// `{ a = ; }`
    #[error("missing value of the binding")]
    MissingValue { range: CursorRange },
    /// `1 2`
    #[error("calling {kind}, which is never a function")]
    NotAFunction { kind: NodeKind, range: CursorRange },
}

impl Diagnostic for LowerError {
    fn code(&self) -> &'static str {
        match self {
            LowerError::DuplicatedAttr { .. } => "E0100",
            LowerError::DynamicInLet { .. } => "E0101",
            LowerError::MissingValue { .. } => "E0102",
            LowerError::NotAFunction { .. } => "E0103",
        }
    }

    fn severity(&self) -> diag::Severity {
        match self {
            LowerError::NotAFunction { .. } => diag::Severity::Warning,
            _ => diag::Severity::Error,
        }
    }

    fn msg(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> Option<CursorRange> {
        Some(match self {
            LowerError::DuplicatedAttr { range, .. }
            | LowerError::DynamicInLet { range }
            | LowerError::MissingValue { range }
            | LowerError::NotAFunction { range, .. } => *range,
        })
    }

    fn reason(&self) -> String {
        match self {
            LowerError::DuplicatedAttr { .. } => "defined again here",
            LowerError::DynamicInLet { .. } => "dynamic name",
            LowerError::MissingValue { .. } => "expected `= value`",
            LowerError::NotAFunction { .. } => "not a function",
        }
        .to_string()
    }

    fn notes(&self) -> Vec<diag::Note> {
        match self {
            LowerError::DuplicatedAttr { prev, .. } => vec![diag::Note {
                range: *prev,
                msg: "first defined".to_string(),
            }],
            _ => Vec::new(),
        }
    }
}
