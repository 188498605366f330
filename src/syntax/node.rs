//! Node contract, borrowed views and tree queries

use base::span::{CursorRange, PositionRange};
use rowan::WalkEvent;
use smallvec::SmallVec;
use thiserror::Error;

use crate::syntax::{
    attrs::{AttrName, AttrPath, Binding, Binds},
    expr::{
        ExprAssert, ExprAttrs, ExprCall, ExprFloat, ExprIf, ExprInt, ExprLambda, ExprLet, ExprList,
        ExprParen, ExprPath, ExprSelect, ExprString, ExprVar, ExprWith,
    },
    kind::NodeKind,
    string::InterpolatedParts,
};

/// Children in declared order. `None` is an absent optional child.
pub type ChildVector<'a> = SmallVec<[Option<NodeRef<'a>>; 8]>;

/// Any element of the syntax tree
///
/// Nodes are built once, bottom-up, and never mutated. Every present child's range lies within
/// its parent's range.
pub trait Node {
    fn kind(&self) -> NodeKind;
    fn range(&self) -> CursorRange;
    fn children(&self) -> ChildVector<'_>;
    fn as_node_ref(&self) -> NodeRef<'_>;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn position_range(&self) -> PositionRange {
        self.range().position_range()
    }

    /// See [`NodeRef::descend`].
    fn descend(&self, range: PositionRange) -> Option<NodeRef<'_>> {
        self.as_node_ref().descend(range)
    }

    /// Slices the text this node was parsed from.
    ///
    /// `src` must be the buffer the node's offsets were produced from; other text panics or gives
    /// meaningless output.
    fn src<'s>(&self, src: &'s str) -> &'s str {
        self.range().span().slice(src)
    }
}

/// Typed node that can be downcast from a [`NodeRef`]
pub trait AstNode: Node {
    fn can_cast(kind: NodeKind) -> bool;
    fn cast_ref<'a>(node: NodeRef<'a>) -> Option<&'a Self>;
}

macro_rules! def_node_ref {
    ( $( $ty:ident ),* $(,)? ) => {
        /// Borrowed view to any node: one variant per [`NodeKind`]
        #[derive(Debug, Clone, Copy)]
        pub enum NodeRef<'a> {
            $( $ty(&'a $ty), )*
        }

        impl<'a> NodeRef<'a> {
            pub fn kind(self) -> NodeKind {
                match self {
                    $( Self::$ty(_) => NodeKind::$ty, )*
                }
            }

            pub fn range(self) -> CursorRange {
                match self {
                    $( Self::$ty(node) => node.range(), )*
                }
            }

            pub fn children(self) -> ChildVector<'a> {
                match self {
                    $( Self::$ty(node) => node.children(), )*
                }
            }

            fn addr(self) -> *const () {
                match self {
                    $( Self::$ty(node) => node as *const $ty as *const (), )*
                }
            }
        }

        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    Self::$ty(node)
                }
            }

            impl AstNode for $ty {
                fn can_cast(kind: NodeKind) -> bool {
                    kind == NodeKind::$ty
                }

                fn cast_ref<'a>(node: NodeRef<'a>) -> Option<&'a Self> {
                    match node {
                        NodeRef::$ty(node) => Some(node),
                        _ => None,
                    }
                }
            }
        )*
    };
}

def_node_ref!(
    Misc,
    Identifier,
    AttrName,
    AttrPath,
    Binding,
    Binds,
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
    InterpolatedParts,
);

impl<'a> NodeRef<'a> {
    pub fn name(self) -> &'static str {
        self.kind().name()
    }

    pub fn is_expr(self) -> bool {
        self.kind().is_expr()
    }

    pub fn position_range(self) -> PositionRange {
        self.range().position_range()
    }

    pub fn src<'s>(self, src: &'s str) -> &'s str {
        self.range().span().slice(src)
    }

    pub fn cast<N: AstNode>(self) -> Option<&'a N> {
        N::cast_ref(self)
    }

    /// True if both refer to the same node in memory, not just equal ones
    pub fn ptr_eq(self, other: NodeRef<'_>) -> bool {
        self.kind() == other.kind() && self.addr() == other.addr()
    }

    /// Most specific node whose range contains `range`.
    ///
    /// Returns `None` if `self` doesn't contain `range`. Otherwise walks down through the first
    /// child (in declared order) containing `range`, and returns the node where no child does.
    /// Absent children are skipped.
    pub fn descend(self, range: PositionRange) -> Option<NodeRef<'a>> {
        if !self.position_range().contains(range) {
            return None;
        }

        let mut node = self;
        'walk: loop {
            for child in node.children().into_iter().flatten() {
                if child.position_range().contains(range) {
                    node = child;
                    continue 'walk;
                }
            }

            log::trace!("descend {:?} -> {} {:?}", range, node.kind(), node.range());
            return Some(node);
        }
    }

    /// Like [`descend`](Self::descend), but returns every node on the way, root first.
    ///
    /// The tree doesn't store parents; this is how to get them.
    pub fn descend_path(self, range: PositionRange) -> Vec<NodeRef<'a>> {
        let mut path = Vec::new();
        if !self.position_range().contains(range) {
            return path;
        }

        let mut next = Some(self);
        while let Some(node) = next.take() {
            path.push(node);
            next = node
                .children()
                .into_iter()
                .flatten()
                .find(|child| child.position_range().contains(range));
        }

        path
    }

    /// Depth-first walk over present nodes
    pub fn preorder(self) -> Preorder<'a> {
        Preorder {
            start: Some(self),
            stack: Vec::new(),
        }
    }

    /// `self` and all its descendants in preorder
    pub fn descendants(self) -> impl Iterator<Item = NodeRef<'a>> {
        self.preorder().filter_map(|ev| match ev {
            WalkEvent::Enter(node) => Some(node),
            WalkEvent::Leave(_) => None,
        })
    }
}

/// Iterator of [`NodeRef::preorder`]
#[derive(Debug)]
pub struct Preorder<'a> {
    start: Option<NodeRef<'a>>,
    stack: Vec<(NodeRef<'a>, smallvec::IntoIter<[Option<NodeRef<'a>>; 8]>)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<NodeRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(node) = self.start.take() {
            self.stack.push((node, node.children().into_iter()));
            return Some(WalkEvent::Enter(node));
        }

        let (node, children) = self.stack.last_mut()?;
        let node = *node;

        match children.find_map(|child| child) {
            Some(child) => {
                self.stack.push((child, child.children().into_iter()));
                Some(WalkEvent::Enter(child))
            }
            None => {
                self.stack.pop();
                Some(WalkEvent::Leave(node))
            }
        }
    }
}

/// Violation of the node construction contract
///
/// These are bugs in whatever builds the tree, not problems in user code: missing pieces of
/// user code are represented by absent optional children.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("{node} requires `{child}`")]
    MissingChild {
        node: NodeKind,
        child: &'static str,
    },
    #[error("{child} ({child_range:?}) is outside of its parent {node} ({node_range:?})")]
    ChildOutsideParent {
        node: NodeKind,
        node_range: CursorRange,
        child: NodeKind,
        child_range: CursorRange,
    },
    #[error("root ({range:?}) is outside of the source text ({len} bytes)")]
    RootOutsideSource { range: CursorRange, len: usize },
}

/// Unwraps a mandatory child given by the parser.
pub(crate) fn required<T>(
    child: Option<T>,
    node: NodeKind,
    name: &'static str,
) -> Result<T, ContractError> {
    child.ok_or(ContractError::MissingChild { node, child: name })
}

/// Checks the children of a freshly built node and hands it back.
pub(crate) fn validated<N: Node>(node: N) -> Result<N, ContractError> {
    self::check_children(node.kind(), node.range(), &node.children())?;
    Ok(node)
}

fn check_children(
    kind: NodeKind,
    range: CursorRange,
    children: &ChildVector<'_>,
) -> Result<(), ContractError> {
    let mut last_end = range.lcur().offset();

    for child in children.iter().flatten() {
        let child_range = child.range();
        if !range.contains(child_range) {
            return Err(ContractError::ChildOutsideParent {
                node: kind,
                node_range: range,
                child: child.kind(),
                child_range,
            });
        }

        // `descend` takes the first matching child, which is only right for disjoint children
        debug_assert!(
            last_end <= child_range.lcur().offset(),
            "children of {kind} overlap or are out of source order at {child_range:?}",
        );
        last_end = child_range.rcur().offset();
    }

    Ok(())
}

/// Keyword or punctuation (`let`, `in`, `(`, `=`, ..)
///
/// Only the location matters. Kept for linting and formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Misc {
    range: CursorRange,
}

impl Misc {
    pub fn new(range: CursorRange) -> Self {
        Self { range }
    }
}

impl Node for Misc {
    fn kind(&self) -> NodeKind {
        NodeKind::Misc
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        ChildVector::new()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Misc(self)
    }
}

/// Variable names, attribute names, etc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    range: CursorRange,
    name: String,
}

impl Identifier {
    pub fn new(range: CursorRange, name: impl Into<String>) -> Self {
        Self {
            range,
            name: name.into(),
        }
    }

    /// The identifier text. Use [`Node::kind`] for the node kind name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Identifier {
    fn kind(&self) -> NodeKind {
        NodeKind::Identifier
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        ChildVector::new()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::Identifier(self)
    }
}
