//! One parse of one file

use base::{
    ln::LineTable,
    span::{CursorRange, Offset, Position, PositionRange, Span},
};

use crate::syntax::{
    expr::Expr,
    node::{ContractError, Node, NodeRef},
};

/// Source text and the tree parsed from it
///
/// A new parse makes a new `Document`; the old one (and every [`NodeRef`] borrowed from it) is
/// dropped as a whole. Use [`NodePtr`](crate::syntax::NodePtr) to carry a location over.
#[derive(Debug)]
pub struct Document {
    version: i32,
    text: String,
    line_table: LineTable,
    /// `None` if the parser produced nothing, e.g., for an empty file
    root: Option<Expr>,
}

impl Document {
    /// Fails if the root range is outside of `text`.
    pub fn new(
        version: i32,
        text: impl Into<String>,
        root: Option<Expr>,
    ) -> Result<Self, ContractError> {
        let text = text.into();

        if let Some(root) = &root {
            let range = root.range();
            let span = range.span();
            let in_text = span.end.into_usize() <= text.len()
                && text.is_char_boundary(span.start.into_usize())
                && text.is_char_boundary(span.end.into_usize());
            if !in_text {
                return Err(ContractError::RootOutsideSource {
                    range,
                    len: text.len(),
                });
            }
        }

        let line_table = LineTable::new(&text);
        Ok(Self {
            version,
            text,
            line_table,
            root,
        })
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_table(&self) -> &LineTable {
        &self.line_table
    }

    pub fn root(&self) -> Option<&Expr> {
        self.root.as_ref()
    }

    /// See [`NodeRef::descend`].
    pub fn descend(&self, range: PositionRange) -> Option<NodeRef<'_>> {
        self.root.as_ref()?.descend(range)
    }

    /// Most specific node at the byte offset
    pub fn node_at(&self, offset: Offset) -> Option<NodeRef<'_>> {
        self.descend(PositionRange::at(self.position_of(offset)))
    }

    /// Source text of a node in this document's tree
    pub fn src_of<N: Node + ?Sized>(&self, node: &N) -> &str {
        node.src(&self.text)
    }

    /// Line and column of a byte offset
    pub fn position_of(&self, offset: Offset) -> Position {
        self.line_table.position(offset)
    }

    /// Range of a byte span of this document's text
    pub fn cursor_range(&self, span: Span) -> CursorRange {
        self.line_table.cursor_range(span)
    }
}
