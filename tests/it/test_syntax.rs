//! Tests for `syntax` module.

use base::span::{Position, PositionRange};
use nixsyn::syntax::{
    AstNode, AstPtr, AttrName, ContractError, Document, Expr, ExprAssert, ExprAttrs, ExprCall,
    ExprIf, ExprLambda, ExprLet, ExprList, ExprParen, ExprSelect, ExprString, ExprVar, ExprWith,
    Identifier, InterpolatedParts, Misc, Node, NodeKind, NodePtr, NodeRef, StringPart,
};
use rowan::WalkEvent;

use crate::util::Fixture;

/// `let a = 1; in a`
fn let_in() -> (Fixture, Expr) {
    let f = Fixture::new("let a = 1; in a");

    let binding = f.binding(f.path("a", 0), f.int("1", 0));
    let binds = f.binds(vec![binding]);
    let let_ = ExprLet::new(
        f.whole(),
        Some(f.misc("let", 0)),
        Some(binds),
        Some(f.misc("in", 0)),
        Some(f.var("a", 1)),
    )
    .unwrap();

    (f, let_.into())
}

/// `"abc${x}def"`
fn interpolated() -> (Fixture, Expr) {
    let f = Fixture::new(r#""abc${x}def""#);

    let parts = InterpolatedParts::new(
        f.span(1, 11),
        vec![
            StringPart::from("abc".to_string()),
            StringPart::from(f.var("x", 0)),
            StringPart::from("def".to_string()),
        ],
    )
    .unwrap();
    let string = ExprString::new(f.whole(), Some(parts)).unwrap();

    (f, string.into())
}

/// `f a b`
fn call() -> (Fixture, Expr) {
    let f = Fixture::new("f a b");

    let call = ExprCall::new(
        f.whole(),
        Some(f.var("f", 0)),
        vec![f.var("a", 0), f.var("b", 0)],
    )
    .unwrap();

    (f, call.into())
}

fn fixtures() -> Vec<(Fixture, Expr)> {
    vec![self::let_in(), self::interpolated(), self::call()]
}

#[test]
fn let_in_structure() {
    let (f, root) = self::let_in();

    let let_ = root.as_node_ref().cast::<ExprLet>().unwrap();
    assert_eq!(let_.kw_let().src(&f.src), "let");
    assert_eq!(let_.kw_in().unwrap().src(&f.src), "in");

    let binds = let_.binds().unwrap();
    assert_eq!(binds.bindings().len(), 1);
    assert_eq!(binds.bindings()[0].src(&f.src), "a = 1;");

    let body = let_.expr().unwrap();
    assert_eq!(body.kind(), NodeKind::ExprVar);
    assert_eq!(body.src(&f.src), "a");
}

#[test]
fn descend_to_identifier() {
    let (f, root) = self::let_in();

    let last_a = f.range("a", 1).position_range();
    let node = root.descend(last_a).unwrap();

    assert_eq!(node.kind(), NodeKind::Identifier);
    assert_eq!(node.cast::<Identifier>().unwrap().name(), "a");
    assert_eq!(node.range(), f.range("a", 1));
}

#[test]
fn descend_path_reconstructs_parents() {
    let (f, root) = self::let_in();

    let path = root.as_node_ref().descend_path(f.range("1", 0).position_range());
    let kinds = path.iter().map(|n| n.kind()).collect::<Vec<_>>();

    assert_eq!(
        kinds,
        [
            NodeKind::ExprLet,
            NodeKind::Binds,
            NodeKind::Binding,
            NodeKind::ExprInt,
        ]
    );
}

#[test]
fn descend_outside_of_root() {
    let (_f, root) = self::call();

    let outside = PositionRange::new(Position::new(0, 3), Position::new(0, 9));
    assert!(root.descend(outside).is_none());

    let next_line = PositionRange::at(Position::new(1, 0));
    assert!(root.descend(next_line).is_none());
}

#[test]
fn descend_over_siblings_returns_parent() {
    let (f, root) = self::call();

    // `a b`
    let range = PositionRange::new(
        f.range("a", 0).position_range().start,
        f.range("b", 0).position_range().end,
    );
    let node = root.descend(range).unwrap();
    assert_eq!(node.kind(), NodeKind::ExprCall);
}

#[test]
fn descend_result_contains_query() {
    for (f, root) in self::fixtures() {
        for start in 0..=f.src.len() {
            let query = f.span(start, start).position_range();
            let node = root.descend(query).unwrap();
            assert!(node.position_range().contains(query), "{:?}", node);

            // no child of the result contains the query
            assert!(node
                .children()
                .into_iter()
                .flatten()
                .all(|child| !child.position_range().contains(query)));
        }
    }
}

#[test]
fn cursor_marker_query() {
    let (f, offset) = Fixture::with_cursor("f $0a b");

    let call = ExprCall::new(
        f.whole(),
        Some(f.var("f", 0)),
        vec![f.var("a", 0), f.var("b", 0)],
    )
    .unwrap();
    let doc = Document::new(0, f.src.clone(), Some(call.into())).unwrap();

    let node = doc.node_at(offset).unwrap();
    assert_eq!(node.cast::<Identifier>().unwrap().name(), "a");
}

#[test]
fn children_are_contained() {
    for (_f, root) in self::fixtures() {
        for node in root.as_node_ref().descendants() {
            for child in node.children().into_iter().flatten() {
                assert!(
                    node.range().contains(child.range()),
                    "{} {:?} / {} {:?}",
                    node.kind(),
                    node.range(),
                    child.kind(),
                    child.range(),
                );
            }
        }
    }
}

#[test]
fn preorder_enters_and_leaves() {
    let (_f, root) = self::call();

    let mut depth = 0;
    let mut max_depth = 0;
    let mut entered = Vec::new();

    for ev in root.as_node_ref().preorder() {
        match ev {
            WalkEvent::Enter(node) => {
                depth += 1;
                max_depth = max_depth.max(depth);
                entered.push(node.kind());
            }
            WalkEvent::Leave(_) => depth -= 1,
        }
    }

    assert_eq!(depth, 0);
    assert_eq!(max_depth, 3);
    assert_eq!(
        entered,
        [
            NodeKind::ExprCall,
            NodeKind::ExprVar,
            NodeKind::Identifier,
            NodeKind::ExprVar,
            NodeKind::Identifier,
            NodeKind::ExprVar,
            NodeKind::Identifier,
        ]
    );
}

#[test]
fn src_slices_round_trip() {
    for (f, root) in self::fixtures() {
        for node in root.as_node_ref().descendants() {
            let span = node.range().span();
            assert_eq!(
                node.src(&f.src),
                &f.src[span.start.into_usize()..span.end.into_usize()]
            );
        }
        assert_eq!(root.src(&f.src), f.src);
    }
}

#[test]
fn interpolated_fragments_in_order() {
    let (f, root) = self::interpolated();

    let string = root.as_node_ref().cast::<ExprString>().unwrap();
    let fragments = string.parts().fragments();

    assert_eq!(fragments.len(), 3);
    assert_eq!(fragments[0].escaped(), Some("abc"));
    let x = fragments[1].interpolation().unwrap();
    assert_eq!(x.kind(), NodeKind::ExprVar);
    assert_eq!(x.src(&f.src), "x");
    assert_eq!(fragments[2].escaped(), Some("def"));

    assert!(!string.parts().is_literal());
    assert_eq!(string.parts().literal(), None);

    // only the interpolation is a child node
    assert_eq!(string.parts().children().len(), 1);
    assert!(string.parts().kind().might_be_lambda());
}

#[test]
fn call_children_function_first() {
    let (f, root) = self::call();

    let call = root.as_node_ref().cast::<ExprCall>().unwrap();
    assert_eq!(call.func().src(&f.src), "f");
    let args = call.args().iter().map(|a| a.src(&f.src)).collect::<Vec<_>>();
    assert_eq!(args, ["a", "b"]);

    let children = call
        .children()
        .into_iter()
        .map(|c| c.unwrap().src(&f.src))
        .collect::<Vec<_>>();
    assert_eq!(children, ["f", "a", "b"]);
}

#[test]
fn if_without_else() {
    let f = Fixture::new("if c then x");

    let if_ = ExprIf::new(f.whole(), Some(f.var("c", 0)), Some(f.var("x", 0)), None).unwrap();
    let children = if_.children();

    assert_eq!(children.len(), 3);
    assert!(children[0].is_some());
    assert!(children[1].is_some());
    assert!(children[2].is_none());

    let node = if_.descend(f.range("x", 0).position_range()).unwrap();
    assert_eq!(node.kind(), NodeKind::Identifier);
    assert_eq!(if_.as_node_ref().descendants().count(), 5);

    // only a condition
    let only_cond = ExprIf::new(f.whole(), Some(f.var("c", 0)), None, None).unwrap();
    assert_eq!(only_cond.children().iter().flatten().count(), 1);
}

#[test]
fn missing_mandatory_child() {
    let f = Fixture::new("let in a");

    let err = ExprLet::new(f.whole(), None, None, Some(f.misc("in", 0)), Some(f.var("a", 0)))
        .unwrap_err();
    assert_eq!(
        err,
        ContractError::MissingChild {
            node: NodeKind::ExprLet,
            child: "let",
        }
    );

    let err = ExprCall::new(f.whole(), None, vec![f.var("a", 0)]).unwrap_err();
    assert!(matches!(err, ContractError::MissingChild { node: NodeKind::ExprCall, .. }));

    let err = ExprVar::new(f.range("a", 0), None).unwrap_err();
    assert!(matches!(err, ContractError::MissingChild { node: NodeKind::ExprVar, .. }));
}

#[test]
fn child_outside_parent() {
    let f = Fixture::new("f a b");

    // the call doesn't cover `b`
    let err = ExprCall::new(f.span(0, 3), Some(f.var("f", 0)), vec![f.var("b", 0)]).unwrap_err();
    assert!(matches!(
        err,
        ContractError::ChildOutsideParent {
            node: NodeKind::ExprCall,
            child: NodeKind::ExprVar,
            ..
        }
    ));
}

#[test]
fn empty_attr_path() {
    let f = Fixture::new("{ }");

    let err = nixsyn::syntax::AttrPath::new(f.span(1, 1), vec![]).unwrap_err();
    assert_eq!(
        err,
        ContractError::MissingChild {
            node: NodeKind::AttrPath,
            child: "name",
        }
    );
}

#[test]
fn cast_matches_kind() {
    for (_f, root) in self::fixtures() {
        for node in root.as_node_ref().descendants() {
            assert_eq!(Identifier::can_cast(node.kind()), node.cast::<Identifier>().is_some());
            assert_eq!(ExprVar::can_cast(node.kind()), node.cast::<ExprVar>().is_some());
            assert_eq!(Misc::can_cast(node.kind()), node.cast::<Misc>().is_some());
            assert_eq!(AttrName::can_cast(node.kind()), node.cast::<AttrName>().is_some());
            assert!(node.cast::<ExprAttrs>().is_none());
            assert!(!node.name().is_empty());
        }
    }
}

#[test]
fn node_ref_identity() {
    let (_f, root) = self::call();
    let call = root.as_node_ref();

    let a = call.children()[1].unwrap();
    let b = call.children()[2].unwrap();
    assert!(a.ptr_eq(call.children()[1].unwrap()));
    assert!(!a.ptr_eq(b));
    assert!(call.ptr_eq(NodeRef::from(&root)));
}

#[test]
fn pointers_resolve_across_parses() {
    let (f, old) = self::let_in();
    let (_, new) = self::let_in();

    let old_id = old.descend(f.range("a", 1).position_range()).unwrap();
    let ptr = NodePtr::from_node_ref(old_id);
    assert_eq!(ptr.kind(), NodeKind::Identifier);

    let new_id = ptr.to_node(new.as_node_ref()).unwrap();
    assert_eq!(new_id.range(), old_id.range());
    assert!(!new_id.ptr_eq(old_id));

    let typed: AstPtr<Identifier> = ptr.cast().unwrap();
    assert_eq!(typed.to_node(new.as_node_ref()).unwrap().name(), "a");
    assert!(ptr.cast::<ExprVar>().is_none());

    // a tree parsed from other text
    let (_, other) = self::call();
    assert!(ptr.to_node(other.as_node_ref()).is_none());
}

#[test]
fn document_snapshot() {
    let (f, root) = self::let_in();

    let doc = Document::new(3, f.src.clone(), Some(root)).unwrap();
    assert_eq!(doc.version(), 3);
    assert_eq!(doc.text(), "let a = 1; in a");

    let node = doc.node_at(f.range("1", 0).span().start).unwrap();
    assert_eq!(node.kind(), NodeKind::ExprInt);
    assert_eq!(node.src(doc.text()), "1");
    assert_eq!(doc.src_of(doc.root().unwrap()), doc.text());

    let pos = doc.position_of(f.range("in", 0).span().start);
    assert_eq!(pos, Position::new(0, 11));

    let empty = Document::new(0, "", None).unwrap();
    assert!(empty.root().is_none());
    assert!(empty.node_at(0u32.into()).is_none());
}

#[test]
fn document_root_outside_text() {
    let (_f, root) = self::let_in();

    let err = Document::new(0, "let", Some(root)).unwrap_err();
    assert!(matches!(err, ContractError::RootOutsideSource { len: 3, .. }));
}

#[test]
fn select_with_default() {
    let f = Fixture::new("a.b or c");

    let select = ExprSelect::new(
        f.whole(),
        Some(f.var("a", 0)),
        Some(f.path("b", 0)),
        Some(f.var("c", 0)),
    )
    .unwrap();
    assert_eq!(select.expr().src(&f.src), "a");
    assert_eq!(select.path().src(&f.src), "b");
    assert_eq!(select.default_expr().unwrap().src(&f.src), "c");

    let kinds = select
        .children()
        .into_iter()
        .map(|c| c.unwrap().kind())
        .collect::<Vec<_>>();
    assert_eq!(kinds, [NodeKind::ExprVar, NodeKind::AttrPath, NodeKind::ExprVar]);

    let path = select.as_node_ref().descend_path(f.range("c", 0).position_range());
    let kinds = path.iter().map(|n| n.kind()).collect::<Vec<_>>();
    assert_eq!(kinds, [NodeKind::ExprSelect, NodeKind::ExprVar, NodeKind::Identifier]);

    // `or` isn't a node
    let or = select.descend(f.range("or", 0).position_range()).unwrap();
    assert_eq!(or.kind(), NodeKind::ExprSelect);
}

#[test]
fn select_without_path() {
    let f = Fixture::new("a.");

    let err = ExprSelect::new(f.whole(), Some(f.var("a", 0)), None, None).unwrap_err();
    assert_eq!(
        err,
        ContractError::MissingChild {
            node: NodeKind::ExprSelect,
            child: "path",
        }
    );

    let err = ExprSelect::new(f.whole(), None, Some(f.path("a", 0)), None).unwrap_err();
    assert!(matches!(err, ContractError::MissingChild { child: "expr", .. }));
}

#[test]
fn empty_list_and_call_without_args() {
    let f = Fixture::new("[ ]");

    let list = ExprList::new(f.whole(), vec![]).unwrap();
    assert!(list.elements().is_empty());
    assert!(list.children().is_empty());
    let node = list.descend(f.span(1, 1).position_range()).unwrap();
    assert!(node.ptr_eq(list.as_node_ref()));

    // the call covers a trailing space its function doesn't
    let f = Fixture::new("f ");
    let call = ExprCall::new(f.whole(), Some(f.var("f", 0)), vec![]).unwrap();
    assert!(call.args().is_empty());
    assert_eq!(call.children().len(), 1);
    let node = call.descend(f.whole().position_range()).unwrap();
    assert!(node.ptr_eq(call.as_node_ref()));
}

#[test]
fn list_elements_in_order() {
    let f = Fixture::new("[ 1 x 3 ]");

    let list = ExprList::new(f.whole(), vec![f.int("1", 0), f.var("x", 0), f.int("3", 0)]).unwrap();
    let elems = list.elements().iter().map(|e| e.src(&f.src)).collect::<Vec<_>>();
    assert_eq!(elems, ["1", "x", "3"]);

    let node = list.descend(f.range("x", 0).position_range()).unwrap();
    assert_eq!(node.cast::<Identifier>().unwrap().name(), "x");
}

#[test]
fn assert_and_with() {
    let f = Fixture::new("assert c; x");
    let assert_ = ExprAssert::new(f.whole(), Some(f.var("c", 0)), Some(f.var("x", 0))).unwrap();
    assert_eq!(assert_.cond().unwrap().src(&f.src), "c");
    assert_eq!(assert_.value().unwrap().src(&f.src), "x");

    let node = assert_.descend(f.range("x", 0).position_range()).unwrap();
    assert_eq!(node.cast::<Identifier>().unwrap().name(), "x");

    // `assert c;` with the value missing
    let partial = ExprAssert::new(f.span(0, 9), Some(f.var("c", 0)), None).unwrap();
    let children = partial.children();
    assert!(children[0].is_some());
    assert!(children[1].is_none());

    let f = Fixture::new("with s; x");
    let with = ExprWith::new(f.whole(), Some(f.var("s", 0)), Some(f.var("x", 0))).unwrap();
    assert_eq!(with.with().unwrap().src(&f.src), "s");
    assert_eq!(with.expr().unwrap().src(&f.src), "x");

    let node = with.descend(f.range("s", 0).position_range()).unwrap();
    assert_eq!(node.cast::<Identifier>().unwrap().name(), "s");
    let node = with.descend(f.range(";", 0).position_range()).unwrap();
    assert_eq!(node.kind(), NodeKind::ExprWith);
}

#[test]
fn paren_tokens_are_children() {
    let f = Fixture::new("(x)");

    let paren = ExprParen::new(
        f.whole(),
        Some(f.misc("(", 0)),
        Some(f.var("x", 0)),
        Some(f.misc(")", 0)),
    )
    .unwrap();
    assert_eq!(paren.lparen().src(&f.src), "(");
    assert_eq!(paren.expr().unwrap().src(&f.src), "x");
    assert_eq!(paren.rparen().unwrap().src(&f.src), ")");

    let kinds = paren
        .children()
        .into_iter()
        .map(|c| c.unwrap().kind())
        .collect::<Vec<_>>();
    assert_eq!(kinds, [NodeKind::Misc, NodeKind::ExprVar, NodeKind::Misc]);

    let node = paren.descend(f.range(")", 0).position_range()).unwrap();
    assert_eq!(node.kind(), NodeKind::Misc);

    let err = ExprParen::new(f.whole(), None, Some(f.var("x", 0)), None).unwrap_err();
    assert_eq!(
        err,
        ContractError::MissingChild {
            node: NodeKind::ExprParen,
            child: "(",
        }
    );
}

#[test]
fn lambda_arg_and_body() {
    let f = Fixture::new("x: x");

    let lambda = ExprLambda::new(f.whole(), Some(f.ident("x", 0)), Some(f.var("x", 1))).unwrap();
    assert_eq!(lambda.arg().unwrap().name(), "x");
    assert_eq!(lambda.body().unwrap().src(&f.src), "x");

    let arg = lambda.descend(f.range("x", 0).position_range()).unwrap();
    assert_eq!(arg.range(), f.range("x", 0));
    let body = lambda.descend(f.range("x", 1).position_range()).unwrap();
    assert_eq!(body.range(), f.range("x", 1));
    assert_eq!(body.kind(), NodeKind::Identifier);

    let path = lambda.as_node_ref().descend_path(f.range("x", 1).position_range());
    assert_eq!(path.len(), 3);
    assert_eq!(path[1].kind(), NodeKind::ExprVar);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "overlap or are out of source order")]
fn children_out_of_source_order() {
    let f = Fixture::new("f a b");

    let _ = ExprCall::new(f.whole(), Some(f.var("f", 0)), vec![f.var("b", 0), f.var("a", 0)]);
}

#[test]
fn trees_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Expr>();
    assert_send_sync::<NodeRef<'static>>();
    assert_send_sync::<Document>();
    assert_send_sync::<NodePtr>();
}
