use remoteq_core::{Expr, Lambda, TypeRef, UnaryOp};

/// Fluent composition of a query operator chain.
///
/// Every operator becomes a static `Queryable` call whose first argument is
/// the chain built so far. Lambda arguments are quoted.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryBuilder {
    expr: Expr,
}

impl QueryBuilder {
    /// Start from `root`, which must have a query type.
    pub fn new(root: Expr) -> Self {
        Self { expr: root }
    }

    pub fn from_source(collection: impl Into<String>, element: TypeRef) -> Self {
        Self::new(Expr::source(collection, element))
    }

    /// Query over an unnamed placeholder source, for deferred execution.
    pub fn for_type(element: TypeRef) -> Self {
        Self::from_source("", element)
    }

    pub fn element_type(&self) -> TypeRef {
        self.expr
            .ty()
            .element_type()
            .cloned()
            .unwrap_or(TypeRef::Object)
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn build(self) -> Expr {
        self.expr
    }

    /// Append operator `name` yielding a query of `element`.
    pub fn operator(self, name: impl Into<String>, args: Vec<Expr>, element: TypeRef) -> Self {
        let ty = TypeRef::queryable_of(element);
        Self {
            expr: self.call(name, args, ty),
        }
    }

    fn call(self, name: impl Into<String>, args: Vec<Expr>, ty: TypeRef) -> Expr {
        let mut all = Vec::with_capacity(args.len() + 1);
        all.push(self.expr);
        all.extend(args);
        Expr::static_call(TypeRef::queryable_class(), name, all, ty)
    }

    fn keep(self, name: &str, args: Vec<Expr>) -> Self {
        let element = self.element_type();
        self.operator(name, args, element)
    }

    pub fn filter(self, predicate: Lambda) -> Self {
        self.keep("Where", vec![quote(predicate)])
    }

    pub fn select(self, selector: Lambda) -> Self {
        let element = selector.body.ty();
        self.operator("Select", vec![quote(selector)], element)
    }

    pub fn order_by(self, key: Lambda) -> Self {
        self.keep("OrderBy", vec![quote(key)])
    }

    pub fn order_by_descending(self, key: Lambda) -> Self {
        self.keep("OrderByDescending", vec![quote(key)])
    }

    pub fn then_by(self, key: Lambda) -> Self {
        self.keep("ThenBy", vec![quote(key)])
    }

    pub fn then_by_descending(self, key: Lambda) -> Self {
        self.keep("ThenByDescending", vec![quote(key)])
    }

    pub fn skip(self, count: i32) -> Self {
        self.keep("Skip", vec![Expr::constant(count)])
    }

    pub fn take(self, count: i32) -> Self {
        self.keep("Take", vec![Expr::constant(count)])
    }

    /// Include the navigation `path` in the response.
    pub fn expand(self, path: impl Into<String>) -> Self {
        self.keep("Expand", vec![Expr::constant(path.into())])
    }

    // ========================================================================
    // Terminal operators
    // ========================================================================

    fn terminal(self, name: &str, predicate: Option<Lambda>, ty: TypeRef) -> Expr {
        self.call(name, predicate.map(quote).into_iter().collect(), ty)
    }

    fn terminal_element(self, name: &str, predicate: Option<Lambda>) -> Expr {
        let element = self.element_type();
        self.terminal(name, predicate, element)
    }

    pub fn first(self) -> Expr {
        self.terminal_element("First", None)
    }

    pub fn first_where(self, predicate: Lambda) -> Expr {
        self.terminal_element("First", Some(predicate))
    }

    pub fn first_or_default(self) -> Expr {
        self.terminal_element("FirstOrDefault", None)
    }

    pub fn first_or_default_where(self, predicate: Lambda) -> Expr {
        self.terminal_element("FirstOrDefault", Some(predicate))
    }

    pub fn count(self) -> Expr {
        self.terminal("Count", None, TypeRef::I32)
    }

    pub fn count_where(self, predicate: Lambda) -> Expr {
        self.terminal("Count", Some(predicate), TypeRef::I32)
    }

    pub fn long_count(self) -> Expr {
        self.terminal("LongCount", None, TypeRef::I64)
    }

    pub fn any(self) -> Expr {
        self.terminal("Any", None, TypeRef::Bool)
    }

    pub fn any_where(self, predicate: Lambda) -> Expr {
        self.terminal("Any", Some(predicate), TypeRef::Bool)
    }

    pub fn single(self) -> Expr {
        self.terminal_element("Single", None)
    }

    pub fn single_or_default(self) -> Expr {
        self.terminal_element("SingleOrDefault", None)
    }

    pub fn last(self) -> Expr {
        self.terminal_element("Last", None)
    }

    pub fn last_or_default(self) -> Expr {
        self.terminal_element("LastOrDefault", None)
    }
}

fn quote(lambda: Lambda) -> Expr {
    Expr::unary(UnaryOp::Quote, lambda.into())
}
