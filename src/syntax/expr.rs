//! Expressions
//!
//! Each expression owns its sub-expressions exclusively. Mandatory children are given to the
//! constructors as `Option`s, the way a bottom-up parser produces them, and a `None` is a
//! [`ContractError`]. Optional children stay `None` when the source doesn't have them.

use base::span::CursorRange;

use crate::{
    syntax::{
        attrs::{AttrPath, Binds},
        kind::NodeKind,
        node::{self, ChildVector, ContractError, Identifier, Misc, Node, NodeRef},
        string::InterpolatedParts,
    },
    util::define_enum,
};

define_enum! {
    /// Any expression node
    #[derive(Debug, Clone, PartialEq)]
    pub Expr = Int(ExprInt)
        | Float(ExprFloat)
        | Var(ExprVar)
        | String(ExprString)
        | Path(ExprPath)
        | Paren(ExprParen)
        | Attrs(ExprAttrs)
        | Select(ExprSelect)
        | Call(ExprCall)
        | List(ExprList)
        | If(ExprIf)
        | Assert(ExprAssert)
        | Let(ExprLet)
        | With(ExprWith)
        | Lambda(ExprLambda)
        | Parts(InterpolatedParts);
}

impl Expr {
    /// See [`NodeKind::might_be_lambda`].
    pub fn might_be_lambda(&self) -> bool {
        self.kind().might_be_lambda()
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        expr.as_node_ref()
    }
}

impl Node for Expr {
    fn kind(&self) -> NodeKind {
        self.as_node_ref().kind()
    }

    fn range(&self) -> CursorRange {
        self.as_node_ref().range()
    }

    fn children(&self) -> ChildVector<'_> {
        self.as_node_ref().children()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Int(x) => x.into(),
            Self::Float(x) => x.into(),
            Self::Var(x) => x.into(),
            Self::String(x) => x.into(),
            Self::Path(x) => x.into(),
            Self::Paren(x) => x.into(),
            Self::Attrs(x) => x.into(),
            Self::Select(x) => x.into(),
            Self::Call(x) => x.into(),
            Self::List(x) => x.into(),
            Self::If(x) => x.into(),
            Self::Assert(x) => x.into(),
            Self::Let(x) => x.into(),
            Self::With(x) => x.into(),
            Self::Lambda(x) => x.into(),
            Self::Parts(x) => x.into(),
        }
    }
}

fn expr_ref(expr: &Option<Box<Expr>>) -> Option<NodeRef<'_>> {
    expr.as_deref().map(NodeRef::from)
}

/// Integer literal
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInt {
    range: CursorRange,
    value: i64,
}

impl ExprInt {
    pub fn new(range: CursorRange, value: i64) -> Self {
        Self { range, value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Node for ExprInt {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprInt
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        ChildVector::new()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprInt(self)
    }
}

/// Float literal
#[derive(Debug, Clone, PartialEq)]
pub struct ExprFloat {
    range: CursorRange,
    value: f64,
}

impl ExprFloat {
    pub fn new(range: CursorRange, value: f64) -> Self {
        Self { range, value }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Node for ExprFloat {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprFloat
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        ChildVector::new()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprFloat(self)
    }
}

/// Variable reference
#[derive(Debug, Clone, PartialEq)]
pub struct ExprVar {
    range: CursorRange,
    id: Identifier,
}

impl ExprVar {
    pub fn new(range: CursorRange, id: Option<Identifier>) -> Result<Self, ContractError> {
        let id = node::required(id, NodeKind::ExprVar, "id")?;
        node::validated(Self { range, id })
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

impl Node for ExprVar {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprVar
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![Some(NodeRef::from(&self.id))]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprVar(self)
    }
}

/// `"..."` or `''...''`. The range includes the quotes, the parts' range doesn't.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprString {
    range: CursorRange,
    parts: InterpolatedParts,
}

impl ExprString {
    pub fn new(
        range: CursorRange,
        parts: Option<InterpolatedParts>,
    ) -> Result<Self, ContractError> {
        let parts = node::required(parts, NodeKind::ExprString, "parts")?;
        node::validated(Self { range, parts })
    }

    pub fn parts(&self) -> &InterpolatedParts {
        &self.parts
    }
}

impl Node for ExprString {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprString
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![Some(NodeRef::from(&self.parts))]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprString(self)
    }
}

/// `./a/${b}`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprPath {
    range: CursorRange,
    parts: InterpolatedParts,
}

impl ExprPath {
    pub fn new(
        range: CursorRange,
        parts: Option<InterpolatedParts>,
    ) -> Result<Self, ContractError> {
        let parts = node::required(parts, NodeKind::ExprPath, "parts")?;
        node::validated(Self { range, parts })
    }

    pub fn parts(&self) -> &InterpolatedParts {
        &self.parts
    }
}

impl Node for ExprPath {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprPath
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![Some(NodeRef::from(&self.parts))]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprPath(self)
    }
}

/// `( expr )`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprParen {
    range: CursorRange,
    lparen: Misc,
    expr: Option<Box<Expr>>,
    rparen: Option<Misc>,
}

impl ExprParen {
    pub fn new(
        range: CursorRange,
        lparen: Option<Misc>,
        expr: Option<Expr>,
        rparen: Option<Misc>,
    ) -> Result<Self, ContractError> {
        let lparen = node::required(lparen, NodeKind::ExprParen, "(")?;
        node::validated(Self {
            range,
            lparen,
            expr: expr.map(Box::new),
            rparen,
        })
    }

    pub fn lparen(&self) -> &Misc {
        &self.lparen
    }

    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_deref()
    }

    pub fn rparen(&self) -> Option<&Misc> {
        self.rparen.as_ref()
    }
}

impl Node for ExprParen {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprParen
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            Some(NodeRef::from(&self.lparen)),
            expr_ref(&self.expr),
            self.rparen.as_ref().map(NodeRef::from),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprParen(self)
    }
}

/// `{ .. }` or `rec { .. }`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAttrs {
    range: CursorRange,
    rec: Option<Misc>,
    binds: Option<Binds>,
}

impl ExprAttrs {
    pub fn new(
        range: CursorRange,
        rec: Option<Misc>,
        binds: Option<Binds>,
    ) -> Result<Self, ContractError> {
        node::validated(Self { range, rec, binds })
    }

    /// `rec` keyword
    pub fn rec(&self) -> Option<&Misc> {
        self.rec.as_ref()
    }

    pub fn is_rec(&self) -> bool {
        self.rec.is_some()
    }

    pub fn binds(&self) -> Option<&Binds> {
        self.binds.as_ref()
    }
}

impl Node for ExprAttrs {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprAttrs
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            self.rec.as_ref().map(NodeRef::from),
            self.binds.as_ref().map(NodeRef::from),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprAttrs(self)
    }
}

/// `expr.path` or `expr.path or default`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprSelect {
    range: CursorRange,
    expr: Box<Expr>,
    path: AttrPath,
    default: Option<Box<Expr>>,
}

impl ExprSelect {
    pub fn new(
        range: CursorRange,
        expr: Option<Expr>,
        path: Option<AttrPath>,
        default: Option<Expr>,
    ) -> Result<Self, ContractError> {
        let expr = node::required(expr, NodeKind::ExprSelect, "expr")?;
        let path = node::required(path, NodeKind::ExprSelect, "path")?;
        node::validated(Self {
            range,
            expr: Box::new(expr),
            path,
            default: default.map(Box::new),
        })
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn path(&self) -> &AttrPath {
        &self.path
    }

    pub fn default_expr(&self) -> Option<&Expr> {
        self.default.as_deref()
    }
}

impl Node for ExprSelect {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprSelect
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            Some(NodeRef::from(self.expr.as_ref())),
            Some(NodeRef::from(&self.path)),
            expr_ref(&self.default),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprSelect(self)
    }
}

/// Function application: `f a b`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    range: CursorRange,
    func: Box<Expr>,
    args: Vec<Expr>,
}

impl ExprCall {
    pub fn new(
        range: CursorRange,
        func: Option<Expr>,
        args: Vec<Expr>,
    ) -> Result<Self, ContractError> {
        let func = node::required(func, NodeKind::ExprCall, "fn")?;
        node::validated(Self {
            range,
            func: Box::new(func),
            args,
        })
    }

    pub fn func(&self) -> &Expr {
        &self.func
    }

    pub fn args(&self) -> &[Expr] {
        &self.args
    }
}

impl Node for ExprCall {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprCall
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        let mut children = ChildVector::with_capacity(self.args.len() + 1);
        children.push(Some(NodeRef::from(self.func.as_ref())));
        children.extend(self.args.iter().map(|arg| Some(NodeRef::from(arg))));
        children
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprCall(self)
    }
}

/// `[ a b c ]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprList {
    range: CursorRange,
    elements: Vec<Expr>,
}

impl ExprList {
    pub fn new(range: CursorRange, elements: Vec<Expr>) -> Result<Self, ContractError> {
        node::validated(Self { range, elements })
    }

    pub fn elements(&self) -> &[Expr] {
        &self.elements
    }
}

impl Node for ExprList {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprList
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        self.elements
            .iter()
            .map(|elem| Some(NodeRef::from(elem)))
            .collect()
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprList(self)
    }
}

/// `if cond then a else b`
///
/// Every branch is optional so that incomplete input still has a node. A well-formed parse
/// always has the condition and the `then` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIf {
    range: CursorRange,
    cond: Option<Box<Expr>>,
    then: Option<Box<Expr>>,
    else_: Option<Box<Expr>>,
}

impl ExprIf {
    pub fn new(
        range: CursorRange,
        cond: Option<Expr>,
        then: Option<Expr>,
        else_: Option<Expr>,
    ) -> Result<Self, ContractError> {
        node::validated(Self {
            range,
            cond: cond.map(Box::new),
            then: then.map(Box::new),
            else_: else_.map(Box::new),
        })
    }

    pub fn cond(&self) -> Option<&Expr> {
        self.cond.as_deref()
    }

    pub fn then(&self) -> Option<&Expr> {
        self.then.as_deref()
    }

    pub fn else_expr(&self) -> Option<&Expr> {
        self.else_.as_deref()
    }
}

impl Node for ExprIf {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprIf
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            expr_ref(&self.cond),
            expr_ref(&self.then),
            expr_ref(&self.else_),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprIf(self)
    }
}

/// `assert cond; value`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAssert {
    range: CursorRange,
    cond: Option<Box<Expr>>,
    /// Returned when `cond` holds
    value: Option<Box<Expr>>,
}

impl ExprAssert {
    pub fn new(
        range: CursorRange,
        cond: Option<Expr>,
        value: Option<Expr>,
    ) -> Result<Self, ContractError> {
        node::validated(Self {
            range,
            cond: cond.map(Box::new),
            value: value.map(Box::new),
        })
    }

    pub fn cond(&self) -> Option<&Expr> {
        self.cond.as_deref()
    }

    pub fn value(&self) -> Option<&Expr> {
        self.value.as_deref()
    }
}

impl Node for ExprAssert {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprAssert
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![expr_ref(&self.cond), expr_ref(&self.value)]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprAssert(self)
    }
}

/// `let binds in expr`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLet {
    range: CursorRange,
    kw_let: Misc,
    binds: Option<Binds>,
    kw_in: Option<Misc>,
    expr: Option<Box<Expr>>,
}

impl ExprLet {
    pub fn new(
        range: CursorRange,
        kw_let: Option<Misc>,
        binds: Option<Binds>,
        kw_in: Option<Misc>,
        expr: Option<Expr>,
    ) -> Result<Self, ContractError> {
        let kw_let = node::required(kw_let, NodeKind::ExprLet, "let")?;
        node::validated(Self {
            range,
            kw_let,
            binds,
            kw_in,
            expr: expr.map(Box::new),
        })
    }

    /// `let` keyword
    pub fn kw_let(&self) -> &Misc {
        &self.kw_let
    }

    pub fn binds(&self) -> Option<&Binds> {
        self.binds.as_ref()
    }

    /// `in` keyword
    pub fn kw_in(&self) -> Option<&Misc> {
        self.kw_in.as_ref()
    }

    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_deref()
    }
}

impl Node for ExprLet {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprLet
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![
            Some(NodeRef::from(&self.kw_let)),
            self.binds.as_ref().map(NodeRef::from),
            self.kw_in.as_ref().map(NodeRef::from),
            expr_ref(&self.expr),
        ]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprLet(self)
    }
}

/// `with scope; expr`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprWith {
    range: CursorRange,
    with: Option<Box<Expr>>,
    expr: Option<Box<Expr>>,
}

impl ExprWith {
    pub fn new(
        range: CursorRange,
        with: Option<Expr>,
        expr: Option<Expr>,
    ) -> Result<Self, ContractError> {
        node::validated(Self {
            range,
            with: with.map(Box::new),
            expr: expr.map(Box::new),
        })
    }

    /// The scope expression
    pub fn with(&self) -> Option<&Expr> {
        self.with.as_deref()
    }

    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_deref()
    }
}

impl Node for ExprWith {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprWith
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![expr_ref(&self.with), expr_ref(&self.expr)]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprWith(self)
    }
}

/// `arg: body`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLambda {
    range: CursorRange,
    arg: Option<Identifier>,
    body: Option<Box<Expr>>,
}

impl ExprLambda {
    pub fn new(
        range: CursorRange,
        arg: Option<Identifier>,
        body: Option<Expr>,
    ) -> Result<Self, ContractError> {
        node::validated(Self {
            range,
            arg,
            body: body.map(Box::new),
        })
    }

    pub fn arg(&self) -> Option<&Identifier> {
        self.arg.as_ref()
    }

    pub fn body(&self) -> Option<&Expr> {
        self.body.as_deref()
    }
}

impl Node for ExprLambda {
    fn kind(&self) -> NodeKind {
        NodeKind::ExprLambda
    }

    fn range(&self) -> CursorRange {
        self.range
    }

    fn children(&self) -> ChildVector<'_> {
        smallvec::smallvec![self.arg.as_ref().map(NodeRef::from), expr_ref(&self.body)]
    }

    fn as_node_ref(&self) -> NodeRef<'_> {
        NodeRef::ExprLambda(self)
    }
}
