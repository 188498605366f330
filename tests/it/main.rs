//! The only integration test crate

pub mod test_syntax;
