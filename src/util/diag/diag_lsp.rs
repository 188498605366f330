//! LSP diagnostic type conversion

use base::{
    ln::LineTable,
    span::{Position, PositionRange},
};

use crate::util::diag::{self, Diagnostic};

impl diag::Severity {
    pub fn into_lsp_type(self) -> lsp_types::DiagnosticSeverity {
        use lsp_types::DiagnosticSeverity as D;

        match self {
            diag::Severity::Error => D::ERROR,
            diag::Severity::Warning => D::WARNING,
            diag::Severity::Info => D::INFORMATION,
            diag::Severity::Hint => D::HINT,
        }
    }
}

/// Char column to LSP position. LSP columns count UTF-16 code units.
pub fn position_to_lsp(ln_tbl: &LineTable, pos: Position) -> lsp_types::Position {
    let pos = ln_tbl.to_utf16(pos);
    lsp_types::Position {
        line: pos.line,
        character: pos.column,
    }
}

pub fn position_from_lsp(ln_tbl: &LineTable, pos: lsp_types::Position) -> Position {
    ln_tbl.from_utf16(Position::new(pos.line, pos.character))
}

pub fn range_to_lsp(ln_tbl: &LineTable, range: PositionRange) -> lsp_types::Range {
    lsp_types::Range {
        start: self::position_to_lsp(ln_tbl, range.start),
        end: self::position_to_lsp(ln_tbl, range.end),
    }
}

/// Converts a range sent by the client into a [`descend`](crate::syntax::NodeRef::descend) query.
pub fn range_from_lsp(ln_tbl: &LineTable, range: lsp_types::Range) -> PositionRange {
    PositionRange::new(
        self::position_from_lsp(ln_tbl, range.start),
        self::position_from_lsp(ln_tbl, range.end),
    )
}

/// Diagnostics without location are put at the start of the document. `ln_tbl` must be of the
/// text the diagnostic is about.
pub fn to_lsp_diagnostic(
    diag: &impl Diagnostic,
    uri: &lsp_types::Url,
    ln_tbl: &LineTable,
) -> lsp_types::Diagnostic {
    let range = diag
        .range()
        .map(|r| self::range_to_lsp(ln_tbl, r.position_range()))
        .unwrap_or_default();

    let mut message = diag.msg();
    let mut related = Vec::new();

    for note in diag.notes() {
        match note.range {
            Some(r) => related.push(lsp_types::DiagnosticRelatedInformation {
                location: lsp_types::Location {
                    uri: uri.clone(),
                    range: self::range_to_lsp(ln_tbl, r.position_range()),
                },
                message: note.msg,
            }),
            None => {
                message.push_str(&format!("\nnote: {} (no precise location)", note.msg));
            }
        }
    }

    lsp_types::Diagnostic {
        range,
        severity: Some(diag.severity().into_lsp_type()),
        code: Some(lsp_types::NumberOrString::String(diag.code().to_string())),
        code_description: None,
        source: Some(env!("CARGO_PKG_NAME").to_string()),
        message,
        related_information: if related.is_empty() {
            None
        } else {
            Some(related)
        },
        tags: None,
        data: None,
    }
}
