//! Source handling
//!
//! Byte offsets, line/column positions and the table converting between them. Syntax nodes only
//! store these values; the source text itself is owned by whoever produced the parse.

pub mod ln;
pub mod span;
