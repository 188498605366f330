//! Syntax tree
//!
//! Nodes are produced bottom-up by a parser: children first, then the parent taking ownership of
//! them. The finished tree is immutable and can be shared between threads for reading.

pub mod attrs;
pub mod document;
pub mod expr;
pub mod kind;
pub mod node;
pub mod ptr;
pub mod string;

pub use self::{
    attrs::{AttrName, AttrNameKind, AttrPath, Binding, Binds},
    document::Document,
    expr::{
        Expr, ExprAssert, ExprAttrs, ExprCall, ExprFloat, ExprIf, ExprInt, ExprLambda, ExprLet,
        ExprList, ExprParen, ExprPath, ExprSelect, ExprString, ExprVar, ExprWith,
    },
    kind::NodeKind,
    node::{AstNode, ChildVector, ContractError, Identifier, Misc, Node, NodeRef, Preorder},
    ptr::{AstPtr, NodePtr},
    string::{InterpolatedParts, StringPart},
};
