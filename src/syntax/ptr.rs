//! Syntax pointers
//!
//! Node references borrow the tree of one parse and can't outlive it. A pointer is a kind plus a
//! range instead, so it can be kept across parses and resolved against whichever tree is current.

use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use base::span::CursorRange;

use crate::syntax::{
    kind::NodeKind,
    node::{AstNode, Node, NodeRef},
};

/// A "pointer" to a node, via its location in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr {
    kind: NodeKind,
    range: CursorRange,
}

impl NodePtr {
    pub fn new<N: Node + ?Sized>(node: &N) -> Self {
        Self {
            kind: node.kind(),
            range: node.range(),
        }
    }

    pub fn from_node_ref(node: NodeRef<'_>) -> Self {
        Self {
            kind: node.kind(),
            range: node.range(),
        }
    }

    pub fn from_range(kind: NodeKind, range: CursorRange) -> Self {
        Self { kind, range }
    }

    /// "Dereferences" the pointer in the tree under `root`.
    ///
    /// Returns `None` if that tree has no node of the same kind and range, e.g., when `root` was
    /// parsed from different text.
    pub fn to_node<'a>(&self, root: NodeRef<'a>) -> Option<NodeRef<'a>> {
        root.descend_path(self.range.position_range())
            .into_iter()
            .find(|node| node.range() == self.range && node.kind() == self.kind)
    }

    /// Casts this to an [`AstPtr`] to the given node type if possible.
    pub fn cast<N: AstNode>(self) -> Option<AstPtr<N>> {
        if !N::can_cast(self.kind) {
            return None;
        }

        Some(AstPtr {
            raw: self,
            _ty: PhantomData,
        })
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn range(&self) -> CursorRange {
        self.range
    }
}

/// Like [`NodePtr`], but remembers the type of node.
pub struct AstPtr<N: AstNode> {
    raw: NodePtr,
    _ty: PhantomData<fn() -> N>,
}

impl<N: AstNode> AstPtr<N> {
    pub fn new(node: &N) -> Self {
        Self {
            raw: NodePtr::new(node),
            _ty: PhantomData,
        }
    }

    /// See [`NodePtr::to_node`].
    pub fn to_node<'a>(&self, root: NodeRef<'a>) -> Option<&'a N> {
        self.raw.to_node(root).and_then(N::cast_ref)
    }

    pub fn node_ptr(&self) -> NodePtr {
        self.raw
    }

    /// Casts this to an [`AstPtr`] to the given node type if possible.
    pub fn cast<U: AstNode>(self) -> Option<AstPtr<U>> {
        self.raw.cast()
    }
}

impl<N: AstNode> fmt::Debug for AstPtr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstPtr").field("raw", &self.raw).finish()
    }
}

impl<N: AstNode> Clone for AstPtr<N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: AstNode> Copy for AstPtr<N> {}

impl<N: AstNode> PartialEq for AstPtr<N> {
    fn eq(&self, other: &AstPtr<N>) -> bool {
        self.raw == other.raw
    }
}

impl<N: AstNode> Eq for AstPtr<N> {}

impl<N: AstNode> Hash for AstPtr<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state)
    }
}

impl<N: AstNode> From<AstPtr<N>> for NodePtr {
    fn from(ptr: AstPtr<N>) -> NodePtr {
        ptr.raw
    }
}
