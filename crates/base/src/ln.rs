//! Line, column and byte offset conversion

use crate::span::{Cursor, CursorRange, Offset, Position, Span};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineTable {
    /// Always has at least one element for the first line
    lines: Vec<LineInfo>,
    end_offset: Offset,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LineInfo {
    /// Offset of line start
    start: Offset,
    /// Spans of chars with utf8 length > 1
    wide_chars: Vec<Span>,
}

impl LineTable {
    pub fn new(source_text: &str) -> Self {
        let mut lines = vec![LineInfo {
            start: Offset::from(0u32),
            wide_chars: Vec::new(),
        }];

        for (i, c) in source_text.char_indices() {
            if c == '\n' {
                lines.push(LineInfo {
                    start: Offset::from(i + 1),
                    wide_chars: Vec::new(),
                })
            } else if c.len_utf8() > 1 {
                if let Some(line) = lines.last_mut() {
                    line.wide_chars.push(Span::from(i, i + c.len_utf8()));
                }
            }
        }

        LineTable {
            lines,
            end_offset: Offset::from(source_text.len()),
        }
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn end_offset(&self) -> Offset {
        self.end_offset
    }

    /// Given a line/column pair, returns the byte offset. Out-of-range positions are clamped to
    /// the end of the text.
    pub fn offset(&self, position: Position) -> Offset {
        self.offset_with(position, |_| 1)
    }

    pub fn position(&self, offset: Offset) -> Position {
        self.position_with(offset, |_| 1)
    }

    /// [`offset`](Self::offset) with the column counted in UTF-16 code units, as LSP clients do.
    /// A column pointing into a surrogate pair resolves to the end of the char.
    pub fn offset_utf16(&self, position: Position) -> Offset {
        self.offset_with(position, self::len_utf16)
    }

    /// [`position`](Self::position) with the column counted in UTF-16 code units
    pub fn position_utf16(&self, offset: Offset) -> Position {
        self.position_with(offset, self::len_utf16)
    }

    /// Char column to UTF-16 column
    pub fn to_utf16(&self, position: Position) -> Position {
        self.position_utf16(self.offset(position))
    }

    /// UTF-16 column to char column
    pub fn from_utf16(&self, position: Position) -> Position {
        self.position(self.offset_utf16(position))
    }

    /// `width` is the number of columns a wide char takes
    fn offset_with(&self, position: Position, width: impl Fn(Span) -> u32) -> Offset {
        if position.line0_usize() >= self.num_lines() {
            return self.end_offset;
        }
        let line = &self.lines[position.line0_usize()];
        let mut offset = u32::from(line.start + position.column);
        for wc in line.wide_chars.iter() {
            if u32::from(wc.start) >= offset {
                break;
            }
            let cols = width(*wc);
            if offset < u32::from(wc.start) + cols {
                offset = u32::from(wc.end);
                break;
            }
            offset += wc.len() - cols;
        }
        Offset::from(offset).min(self.end_offset)
    }

    fn position_with(&self, offset: Offset, width: impl Fn(Span) -> u32) -> Position {
        match self.lines.binary_search_by_key(&offset, |l| l.start) {
            Ok(line0) => Position::new(line0 as u32, 0),
            Err(next_line0) => {
                let line0 = next_line0 - 1;
                let line = &self.lines[line0];
                // byte offset from the line start, minus the extra bytes of wide chars before
                // `offset`
                let mut column0 = offset - line.start;
                for wc in line.wide_chars.iter() {
                    if wc.start >= offset {
                        break;
                    }
                    // e.g.: 🙂 will have len 4, but we count it as 1 character, so we subtract 3
                    column0 -= wc.len() - width(*wc);
                }
                Position::new(line0 as u32, column0)
            }
        }
    }

    pub fn cursor(&self, offset: Offset) -> Cursor {
        let pos = self.position(offset);
        Cursor::new(pos.line, pos.column, offset)
    }

    pub fn cursor_range(&self, span: Span) -> CursorRange {
        CursorRange::new(self.cursor(span.start), self.cursor(span.end))
    }

    /// Span of the line `offset` is at, including the trailing newline
    pub fn line_span(&self, offset: Offset) -> Span {
        let (i, start) = match self.lines.binary_search_by_key(&offset, |l| l.start) {
            Ok(line0) => (line0, self.lines[line0].start),
            Err(next_line0) => (next_line0 - 1, self.lines[next_line0 - 1].start),
        };

        let end = match self.lines.get(i + 1) {
            Some(next) => next.start,
            None => self.end_offset,
        };

        Span { start, end }
    }
}

/// UTF-16 length of a wide char: 4-byte chars are surrogate pairs
fn len_utf16(wide_char: Span) -> u32 {
    if wide_char.len() == 4 {
        2
    } else {
        1
    }
}
