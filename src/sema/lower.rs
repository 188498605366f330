//! Lowers attribute sets and `let` bindings
//!
//! Nested attribute paths are desugared into nested sets:
//!
//! ```text
//! { a.b = 1; a = { c = 2; }; }  =>  { a = { b = 1; c = 2; }; }
//! ```

use std::collections::hash_map::Entry;

use crate::{
    sema::{AttrValue, Attribute, DynamicAttribute, HaveSyntax, LowerError, SemaAttrs},
    syntax::{AttrName, Binds, Expr, ExprAttrs, ExprLet, Node, NodeRef},
};

/// Lowering context. Collects diagnostics over any number of lowered nodes.
#[derive(Debug, Default)]
pub struct Lowering {
    errs: Vec<LowerError>,
}

impl Lowering {
    pub fn new() -> Self {
        Self::default()
    }

    /// `{ .. }` or `rec { .. }`
    pub fn lower_attrs<'a>(&mut self, attrs: &'a ExprAttrs) -> SemaAttrs<'a> {
        let mut sema = SemaAttrs::new(Some(NodeRef::from(attrs)), attrs.is_rec());
        if let Some(binds) = attrs.binds() {
            self.lower_binds(&mut sema, binds, false);
        }

        log::debug!(
            "lowered attrs at {:?}: {} static, {} dynamic",
            attrs.range(),
            sema.static_attrs().len(),
            sema.dynamic_attrs().len(),
        );
        sema
    }

    /// Bindings of `let .. in`, as a recursive attribute set. Its syntax is the [`Binds`].
    pub fn lower_let<'a>(&mut self, let_: &'a ExprLet) -> SemaAttrs<'a> {
        let binds = let_.binds();
        let mut sema = SemaAttrs::new(binds.map(NodeRef::from), true);
        if let Some(binds) = binds {
            self.lower_binds(&mut sema, binds, true);
        }

        log::debug!(
            "lowered let at {:?}: {} bindings",
            let_.range(),
            sema.static_attrs().len(),
        );
        sema
    }

    pub fn errors(&self) -> &[LowerError] {
        &self.errs
    }

    pub fn finish(self) -> Vec<LowerError> {
        self.errs
    }

    fn lower_binds<'a>(&mut self, sema: &mut SemaAttrs<'a>, binds: &'a Binds, in_let: bool) {
        for binding in binds.bindings() {
            let Some(value) = binding.value() else {
                self.errs.push(LowerError::MissingValue { range: binding.range() });
                continue;
            };

            let value = self.lower_value(value);
            self.insert(sema, binding.path().names(), value, in_let);
        }
    }

    /// Non-recursive attribute sets are lowered so that they can be merged.
    fn lower_value<'a>(&mut self, expr: &'a Expr) -> AttrValue<'a> {
        match expr {
            Expr::Attrs(attrs) if !attrs.is_rec() => AttrValue::Attrs(self.lower_attrs(attrs)),
            _ => AttrValue::Expr(expr),
        }
    }

    /// Inserts `names = value` into `sema`, creating synthesized sets for the path prefix.
    fn insert<'a>(
        &mut self,
        sema: &mut SemaAttrs<'a>,
        names: &'a [AttrName],
        value: AttrValue<'a>,
        in_let: bool,
    ) {
        let Some((key, rest)) = names.split_first() else {
            return;
        };

        let Some(name) = key.static_name() else {
            if in_let {
                self.errs.push(LowerError::DynamicInLet { range: key.range() });
                return;
            }

            let value = self.nest(rest, value);
            sema.push_dynamic(DynamicAttribute::new(key, value));
            return;
        };

        match sema.static_attrs_mut().entry(name) {
            Entry::Vacant(entry) => {
                let value = self.nest(rest, value);
                entry.insert(Attribute::new(key, value));
            }
            Entry::Occupied(mut entry) => {
                let prev = entry.get().value().syntax_range();
                let name = entry.key().clone();

                match (entry.get_mut().value_mut(), rest.is_empty()) {
                    (AttrValue::Attrs(nested), false) if !nested.is_recursive() => {
                        self.insert(nested, rest, value, false);
                    }
                    (AttrValue::Attrs(nested), true) if !nested.is_recursive() => match value {
                        AttrValue::Attrs(other) if !other.is_recursive() => {
                            self.merge(nested, other);
                        }
                        _ => self.duplicated(name, key, prev),
                    },
                    _ => self.duplicated(name, key, prev),
                }
            }
        }
    }

    /// `value` wrapped in synthesized sets, one per remaining name
    fn nest<'a>(&mut self, rest: &'a [AttrName], value: AttrValue<'a>) -> AttrValue<'a> {
        if rest.is_empty() {
            return value;
        }

        let mut nested = SemaAttrs::synthesized();
        self.insert(&mut nested, rest, value, false);
        AttrValue::Attrs(nested)
    }

    /// Moves the attributes of `from` into `into`.
    fn merge<'a>(&mut self, into: &mut SemaAttrs<'a>, from: SemaAttrs<'a>) {
        let (statics, dynamics) = from.into_parts();

        for (name, attr) in statics {
            match into.static_attrs_mut().entry(name) {
                Entry::Vacant(entry) => {
                    entry.insert(attr);
                }
                Entry::Occupied(mut entry) => {
                    let prev = entry.get().value().syntax_range();
                    let name = entry.key().clone();
                    let key = attr.key();

                    match (entry.get_mut().value_mut(), attr.into_value()) {
                        (AttrValue::Attrs(lhs), AttrValue::Attrs(rhs))
                            if !lhs.is_recursive() && !rhs.is_recursive() =>
                        {
                            self.merge(lhs, rhs);
                        }
                        _ => self.duplicated(name, key, prev),
                    }
                }
            }
        }

        for attr in dynamics {
            into.push_dynamic(attr);
        }
    }

    fn duplicated(&mut self, name: String, key: &AttrName, prev: Option<base::span::CursorRange>) {
        log::debug!("duplicated attribute `{}` at {:?}", name, key.range());
        self.errs.push(LowerError::DuplicatedAttr {
            name,
            range: key.range(),
            prev,
        });
    }
}
