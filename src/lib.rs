/*!
Position-addressable syntax tree for Nix language tooling

Parsed source is an owned, immutable tree of [`syntax::Node`]s. Editor features ask the tree which
node covers a range ([`syntax::NodeRef::descend`]); lowering walks [`syntax::Expr`]s into
[`sema`] structures that keep back-references to the syntax they came from.
*/

pub mod sema;
pub mod syntax;
pub mod util;
