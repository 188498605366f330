//! Node kind taxonomy

use std::fmt;

/// Syntactic kind of a node
///
/// The set is closed and every kind has exactly one concrete node type (see
/// [`NodeRef`](crate::syntax::NodeRef)). Expression kinds form one contiguous run from
/// [`NodeKind::FIRST_EXPR`] to [`NodeKind::LAST_EXPR`]: a new expression kind goes inside that
/// run, any other kind goes before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum NodeKind {
    // ----------------------------------------
    // Plain nodes
    // ----------------------------------------
    /// Keyword or punctuation kept only for its location
    Misc,
    /// Variable name, attribute name, lambda argument
    Identifier,
    /// One segment of an attribute path
    AttrName,
    /// `a.b."c".${d}`
    AttrPath,
    /// `path = value;`
    Binding,
    /// Bindings of an attribute set or a `let`
    Binds,
    // ----------------------------------------
    // Expressions
    // ----------------------------------------
    ExprInt,
    ExprFloat,
    ExprVar,
    ExprString,
    ExprPath,
    ExprParen,
    ExprAttrs,
    ExprSelect,
    ExprCall,
    ExprList,
    ExprIf,
    ExprAssert,
    ExprLet,
    ExprWith,
    ExprLambda,
    /// Literal fragments and `${..}` of a string or a path
    InterpolatedParts,
}

impl NodeKind {
    pub const FIRST_EXPR: NodeKind = NodeKind::ExprInt;
    pub const LAST_EXPR: NodeKind = NodeKind::InterpolatedParts;

    /// Every kind in declaration order
    pub const ALL: [NodeKind; 22] = [
        NodeKind::Misc,
        NodeKind::Identifier,
        NodeKind::AttrName,
        NodeKind::AttrPath,
        NodeKind::Binding,
        NodeKind::Binds,
        NodeKind::ExprInt,
        NodeKind::ExprFloat,
        NodeKind::ExprVar,
        NodeKind::ExprString,
        NodeKind::ExprPath,
        NodeKind::ExprParen,
        NodeKind::ExprAttrs,
        NodeKind::ExprSelect,
        NodeKind::ExprCall,
        NodeKind::ExprList,
        NodeKind::ExprIf,
        NodeKind::ExprAssert,
        NodeKind::ExprLet,
        NodeKind::ExprWith,
        NodeKind::ExprLambda,
        NodeKind::InterpolatedParts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Misc => "Misc",
            Self::Identifier => "Identifier",
            Self::AttrName => "AttrName",
            Self::AttrPath => "AttrPath",
            Self::Binding => "Binding",
            Self::Binds => "Binds",
            Self::ExprInt => "ExprInt",
            Self::ExprFloat => "ExprFloat",
            Self::ExprVar => "ExprVar",
            Self::ExprString => "ExprString",
            Self::ExprPath => "ExprPath",
            Self::ExprParen => "ExprParen",
            Self::ExprAttrs => "ExprAttrs",
            Self::ExprSelect => "ExprSelect",
            Self::ExprCall => "ExprCall",
            Self::ExprList => "ExprList",
            Self::ExprIf => "ExprIf",
            Self::ExprAssert => "ExprAssert",
            Self::ExprLet => "ExprLet",
            Self::ExprWith => "ExprWith",
            Self::ExprLambda => "ExprLambda",
            Self::InterpolatedParts => "InterpolatedParts",
        }
    }

    #[inline]
    pub fn is_expr(self) -> bool {
        (Self::FIRST_EXPR..=Self::LAST_EXPR).contains(&self)
    }

    /// Returns true if an expression of this kind might evaluate to a lambda.
    ///
    /// Over-approximation: only literal kinds answer `false`. Callers warning about calls on
    /// non-functions rely on never getting a false negative here.
    pub fn might_be_lambda(self) -> bool {
        if !self.is_expr() {
            return false;
        }

        !matches!(
            self,
            Self::ExprInt | Self::ExprFloat | Self::ExprAttrs | Self::ExprString | Self::ExprPath
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<NodeKind> for u16 {
    fn from(kind: NodeKind) -> Self {
        kind as u16
    }
}
