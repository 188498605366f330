//! String interpolation model

use base::span::CursorRange;

use crate::syntax::{
    expr::Expr,
    kind::NodeKind,
    node::{self, ChildVector, ContractError, Node, NodeRef},
};

/// One fragment of an interpolated string or path
///
/// Fragments have no range of their own; the enclosing [`InterpolatedParts`] range is the only
/// location.
#[derive(Debug, Clone, PartialEq)]
pub enum StringPart {
    /// Literal text, already unescaped by the lexer
    Escaped(String),
    /// `${ expr }`
    Interpolation(Box<Expr>),
}

impl StringPart {
    pub fn escaped(&self) -> Option<&str> {
        match self {
            Self::Escaped(s) => Some(s),
            Self::Interpolation(_) => None,
        }
    }

    pub fn interpolation(&self) -> Option<&Expr> {
        match self {
            Self::Escaped(_) => None,
            Self::Interpolation(expr) => Some(expr),
        }
    }
}

impl From<String> for StringPart {
    fn from(s: String) -> Self {
        Self::Escaped(s)
    }
}

impl From<Expr> for StringPart {
    fn from(expr: Expr) -> Self {
        Self::Interpolation(Box::new(expr))
    }
}

/// Ordered literal fragments and interpolations, as written
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedParts {
    range: CursorRange,
    fragments: Vec<StringPart>,
}

impl InterpolatedParts {
    pub fn new(range: CursorRange, fragments: Vec<StringPart>) -> Result<Self, ContractError> {
        node::validated(Self { range, fragments })
    }

    pub fn fragments(&self) -> &[StringPart] {
        &self.fragments
    }

    /// True if there's no interpolation
    pub fn is_literal(&self) -> bool {
        self.fragments
            .iter()
            .all(|part| matches!(part, StringPart::Escaped(_)))
    }

    /// Concatenated text if there's no interpolation
    pub fn literal(&self) -> Option<String> {
        self.fragments
            .iter()
            .map(StringPart::escaped)
            .collect::<Option<String>>()
    }
}

impl Node for InterpolatedParts {
    fn kind(&self) -> NodeKind {
        NodeKind::InterpolatedParts
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        self.fragments
            .iter()
            .filter_map(StringPart::interpolation)
            .map(|expr| Some(NodeRef::from(expr)))
            .collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::InterpolatedParts(self)
    }
}
