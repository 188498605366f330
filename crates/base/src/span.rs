//! Offsets, spans, positions and cursors

use std::{fmt, ops};

/// Byte offset into UTF-8 source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(u32);

impl Offset {
    pub fn into_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Offset {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

/// Panics if `x` doesn't fit in `u32`. Source text is limited to 4 GiB, as with
/// `rowan::TextSize`.
impl From<usize> for Offset {
    fn from(x: usize) -> Self {
        Self(u32::try_from(x).expect("source text larger than 4 GiB"))
    }
}

impl From<Offset> for u32 {
    fn from(x: Offset) -> Self {
        x.0
    }
}

impl From<rowan::TextSize> for Offset {
    fn from(x: rowan::TextSize) -> Self {
        Self(x.into())
    }
}

impl From<Offset> for rowan::TextSize {
    fn from(x: Offset) -> Self {
        x.0.into()
    }
}

impl ops::Add<u32> for Offset {
    type Output = Offset;

    fn add(self, rhs: u32) -> Offset {
        Offset(self.0 + rhs)
    }
}

impl ops::Sub<Offset> for Offset {
    type Output = u32;

    fn sub(self, rhs: Offset) -> u32 {
        self.0 - rhs.0
    }
}

/// Half-open byte range `[start, end)` of source text
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Offset,
    pub end: Offset,
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.0, self.end.0)
    }
}

impl Span {
    pub fn from(start: impl Into<Offset>, end: impl Into<Offset>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `other` lies within `self` (both ends inclusive of `self`'s bounds)
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Panics if `self` is out of `s` or not on char boundaries, i.e., if `s` is not the text the
    /// span was made from.
    pub fn slice<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start.into_usize()..self.end.into_usize()]
    }

    pub fn from_rowan_range(range: rowan::TextRange) -> Self {
        Self::from(range.start(), range.end())
    }

    pub fn into_rowan_range(self) -> rowan::TextRange {
        rowan::TextRange::new(self.start.into(), self.end.into())
    }
}

/// `span - line_start`: span relative to the given offset
impl ops::Sub<Offset> for Span {
    type Output = Span;

    fn sub(self, rhs: Offset) -> Span {
        Span::from(self.start - rhs, self.end - rhs)
    }
}

/// 0-based line and column. The column counts characters, not bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line1(), self.column1())
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn line0_usize(&self) -> usize {
        self.line as usize
    }

    /// 1-based line number for display
    pub fn line1(&self) -> u32 {
        self.line + 1
    }

    /// 1-based column number for display
    pub fn column1(&self) -> u32 {
        self.column + 1
    }
}

/// Range of [`Position`]s. This is what editors send as a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionRange {
    pub start: Position,
    pub end: Position,
}

impl PositionRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at the position
    pub fn at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn contains(&self, other: PositionRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Position plus the byte offset it corresponds to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    line: u32,
    column: u32,
    offset: Offset,
}

impl Cursor {
    pub fn new(line: u32, column: u32, offset: impl Into<Offset>) -> Self {
        Self {
            line,
            column,
            offset: offset.into(),
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Pair of cursors `[lcur, rcur)`, the range every syntax node carries
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CursorRange {
    lcur: Cursor,
    rcur: Cursor,
}

impl fmt::Debug for CursorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}:{}@{:?}",
            self.lcur.line,
            self.lcur.column,
            self.rcur.line,
            self.rcur.column,
            self.span()
        )
    }
}

impl CursorRange {
    pub fn new(lcur: Cursor, rcur: Cursor) -> Self {
        debug_assert!(lcur.offset <= rcur.offset, "{lcur:?} > {rcur:?}");
        Self { lcur, rcur }
    }

    pub fn lcur(&self) -> Cursor {
        self.lcur
    }

    pub fn rcur(&self) -> Cursor {
        self.rcur
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.lcur.offset,
            end: self.rcur.offset,
        }
    }

    pub fn position_range(&self) -> PositionRange {
        PositionRange {
            start: self.lcur.position(),
            end: self.rcur.position(),
        }
    }

    /// Containment by byte offsets
    pub fn contains(&self, other: CursorRange) -> bool {
        self.span().contains(other.span())
    }
}

impl From<CursorRange> for rowan::TextRange {
    fn from(range: CursorRange) -> Self {
        range.span().into_rowan_range()
    }
}
