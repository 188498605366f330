//! Attribute names, paths and bindings

use base::span::CursorRange;

use crate::syntax::{
    expr::{Expr, ExprString},
    kind::NodeKind,
    node::{self, ChildVector, ContractError, Identifier, Misc, Node, NodeRef},
};

/// What an [`AttrName`] is made of
#[derive(Debug, Clone, PartialEq)]
pub enum AttrNameKind {
    /// `a`
    Id(Identifier),
    /// `"a"`, possibly with interpolations
    String(ExprString),
    /// `${a}`
    Interpolation(Box<Expr>),
}

/// One segment of an [`AttrPath`]
#[derive(Debug, Clone, PartialEq)]
pub struct AttrName {
    range: CursorRange,
    name: AttrNameKind,
}

impl AttrName {
    pub fn new(range: CursorRange, name: AttrNameKind) -> Result<Self, ContractError> {
        node::validated(Self { range, name })
    }

    pub fn name_kind(&self) -> &AttrNameKind {
        &self.name
    }

    pub fn id(&self) -> Option<&Identifier> {
        match &self.name {
            AttrNameKind::Id(id) => Some(id),
            _ => None,
        }
    }

    /// True if the name is known without evaluation
    pub fn is_static(&self) -> bool {
        match &self.name {
            AttrNameKind::Id(_) => true,
            AttrNameKind::String(s) => s.parts().is_literal(),
            AttrNameKind::Interpolation(_) => false,
        }
    }

    /// The name, if it's known without evaluation
    pub fn static_name(&self) -> Option<String> {
        match &self.name {
            AttrNameKind::Id(id) => Some(id.name().to_string()),
            AttrNameKind::String(s) => s.parts().literal(),
            AttrNameKind::Interpolation(_) => None,
        }
    }
}

impl Node for AttrName {
    fn kind(&self) -> NodeKind {
        NodeKind::AttrName
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        let child = match &self.name {
            AttrNameKind::Id(id) => NodeRef::from(id),
            AttrNameKind::String(s) => NodeRef::from(s),
            AttrNameKind::Interpolation(expr) => NodeRef::from(expr.as_ref()),
        };
        smallvec::smallvec![Some(child)]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::AttrName(self)
    }
}

/// `a.b.c`
#[derive(Debug, Clone, PartialEq)]
pub struct AttrPath {
    range: CursorRange,
    names: Vec<AttrName>,
}

impl AttrPath {
    /// Fails if `names` is empty.
    pub fn new(range: CursorRange, names: Vec<AttrName>) -> Result<Self, ContractError> {
        if names.is_empty() {
            return Err(ContractError::MissingChild {
                node: NodeKind::AttrPath,
                child: "name",
            });
        }
        node::validated(Self { range, names })
    }

    /// Never empty
    pub fn names(&self) -> &[AttrName] {
        &self.names
    }
}

impl Node for AttrPath {
    fn kind(&self) -> NodeKind {
        NodeKind::AttrPath
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        self.names
            .iter()
            .map(|name| Some(NodeRef::from(name)))
            .collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::AttrPath(self)
    }
}

/// `path = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    range: CursorRange,
    path: AttrPath,
    eq: Option<Misc>,
    value: Option<Box<Expr>>,
}

impl Binding {
    pub fn new(
        range: CursorRange,
        path: Option<AttrPath>,
        eq: Option<Misc>,
        value: Option<Expr>,
    ) -> Result<Self, ContractError> {
        let path = node::required(path, NodeKind::Binding, "path")?;
        node::validated(Self {
            range,
            path,
            eq,
            value: value.map(Box::new),
        })
    }

    pub fn path(&self) -> &AttrPath {
        &self.path
    }

    /// `=`
    pub fn eq_token(&self) -> Option<&Misc> {
        self.eq.as_ref()
    }

    pub fn value(&self) -> Option<&Expr> {
        self.value.as_deref()
    }
}

impl Node for Binding {
    fn kind(&self) -> NodeKind {
        NodeKind::Binding
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            Some(NodeRef::from(&self.path)),
            self.eq.as_ref().map(NodeRef::from),
            self.value.as_deref().map(NodeRef::from),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Binding(self)
    }
}

/// Bindings of an attribute set or a `let`
#[derive(Debug, Clone, PartialEq)]
pub struct Binds {
    range: CursorRange,
    bindings: Vec<Binding>,
}

impl Binds {
    pub fn new(range: CursorRange, bindings: Vec<Binding>) -> Result<Self, ContractError> {
        node::validated(Self { range, bindings })
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

impl Node for Binds {
    fn kind(&self) -> NodeKind {
        NodeKind::Binds
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        self.bindings
            .iter()
            .map(|binding| Some(NodeRef::from(binding)))
            .collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Binds(self)
    }
}
