//! Evaluable structures lowered from syntax
//!
//! Nothing is evaluated here. Lowered structures are handed to an external evaluator; they keep
//! a reference to the syntax they came from so that its errors can be reported at a location.

pub mod lint;
pub mod lower;
pub mod sema_diag;

use rustc_hash::FxHashMap;

use crate::syntax::{AttrName, Expr, Node, NodeRef};

pub use self::{lower::Lowering, sema_diag::LowerError};

pub trait HaveSyntax {
    /// The syntax node before lowering.
    ///
    /// `None` for nodes created implicitly, e.g., the attribute set `a` in `{ a.b = 1; }`.
    /// Diagnostics on them have no precise location.
    fn syntax(&self) -> Option<NodeRef<'_>>;

    fn syntax_range(&self) -> Option<base::span::CursorRange> {
        self.syntax().map(NodeRef::range)
    }
}

/// Node that can be handed to the evaluator
pub trait Evaluable: HaveSyntax {}

impl HaveSyntax for Expr {
    fn syntax(&self) -> Option<NodeRef<'_>> {
        Some(self.as_node_ref())
    }
}

impl Evaluable for Expr {}

/// Attribute set with nested paths desugared
///
/// `{ a.b = 1; a.c = 2; }` lowers to `{ a = { b = 1; c = 2; }; }`.
#[derive(Debug, Clone, Default)]
pub struct SemaAttrs<'a> {
    syntax: Option<NodeRef<'a>>,
    recursive: bool,
    static_attrs: FxHashMap<String, Attribute<'a>>,
    dynamic_attrs: Vec<DynamicAttribute<'a>>,
}

impl<'a> SemaAttrs<'a> {
    pub(crate) fn new(syntax: Option<NodeRef<'a>>, recursive: bool) -> Self {
        Self {
            syntax,
            recursive,
            ..Default::default()
        }
    }

    /// Attribute set made up by desugaring an attribute path
    pub(crate) fn synthesized() -> Self {
        Self::default()
    }

    /// `rec { }` or `let`
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn get(&self, name: &str) -> Option<&Attribute<'a>> {
        self.static_attrs.get(name)
    }

    pub fn static_attrs(&self) -> &FxHashMap<String, Attribute<'a>> {
        &self.static_attrs
    }

    /// Attributes with names known only after evaluation (`${x} = ..`), in source order
    pub fn dynamic_attrs(&self) -> &[DynamicAttribute<'a>] {
        &self.dynamic_attrs
    }

    pub(crate) fn static_attrs_mut(&mut self) -> &mut FxHashMap<String, Attribute<'a>> {
        &mut self.static_attrs
    }

    pub(crate) fn push_dynamic(&mut self, attr: DynamicAttribute<'a>) {
        self.dynamic_attrs.push(attr);
    }

    pub(crate) fn into_parts(
        self,
    ) -> (FxHashMap<String, Attribute<'a>>, Vec<DynamicAttribute<'a>>) {
        (self.static_attrs, self.dynamic_attrs)
    }
}

impl<'a> HaveSyntax for SemaAttrs<'a> {
    fn syntax(&self) -> Option<NodeRef<'_>> {
        self.syntax
    }
}

impl<'a> Evaluable for SemaAttrs<'a> {}

/// Value of an attribute
#[derive(Debug, Clone)]
pub enum AttrValue<'a> {
    Expr(&'a Expr),
    /// Non-recursive attribute set, merged with other definitions under the same name
    Attrs(SemaAttrs<'a>),
}

impl<'a> AttrValue<'a> {
    pub fn as_expr(&self) -> Option<&'a Expr> {
        match self {
            Self::Expr(expr) => Some(*expr),
            Self::Attrs(_) => None,
        }
    }

    pub fn as_attrs(&self) -> Option<&SemaAttrs<'a>> {
        match self {
            Self::Expr(_) => None,
            Self::Attrs(attrs) => Some(attrs),
        }
    }
}

impl<'a> HaveSyntax for AttrValue<'a> {
    fn syntax(&self) -> Option<NodeRef<'_>> {
        match self {
            Self::Expr(expr) => expr.syntax(),
            Self::Attrs(attrs) => attrs.syntax(),
        }
    }
}

impl<'a> Evaluable for AttrValue<'a> {}

#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Name at the first definition
    key: &'a AttrName,
    value: AttrValue<'a>,
}

impl<'a> Attribute<'a> {
    pub(crate) fn new(key: &'a AttrName, value: AttrValue<'a>) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &'a AttrName {
        self.key
    }

    pub fn value(&self) -> &AttrValue<'a> {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut AttrValue<'a> {
        &mut self.value
    }

    pub fn into_value(self) -> AttrValue<'a> {
        self.value
    }
}

/// `${name} = value;`
#[derive(Debug, Clone)]
pub struct DynamicAttribute<'a> {
    key: &'a AttrName,
    value: AttrValue<'a>,
}

impl<'a> DynamicAttribute<'a> {
    pub(crate) fn new(key: &'a AttrName, value: AttrValue<'a>) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &'a AttrName {
        self.key
    }

    pub fn value(&self) -> &AttrValue<'a> {
        &self.value
    }
}
