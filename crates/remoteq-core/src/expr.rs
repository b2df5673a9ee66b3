//! Typed expression tree.
//!
//! Every node carries its static type. Children are owned by their parent,
//! so a tree never shares nodes and never contains cycles. Parameters are
//! identified by name and type: two parameter nodes with the same name and
//! type refer to the same lambda parameter.

use serde::{Deserialize, Serialize};

use crate::{TypeRef, Value};

/// Expression tree node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Constant {
        value: Value,
        ty: TypeRef,
    },
    Parameter(Parameter),
    /// Field or property read. `target` is absent for static members.
    Member {
        #[serde(default)]
        target: Option<Box<Expr>>,
        member: String,
        declaring_type: TypeRef,
        ty: TypeRef,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        ty: TypeRef,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        #[serde(default)]
        lifted_to_null: bool,
        ty: TypeRef,
    },
    Call(MethodCall),
    Lambda(Lambda),
    New(NewExpr),
    MemberInit {
        new: NewExpr,
        bindings: Vec<MemberBinding>,
    },
    NewArray {
        element_type: TypeRef,
        items: Vec<Expr>,
    },
    ListInit {
        new: NewExpr,
        initializers: Vec<ElementInit>,
    },
    Invoke {
        target: Box<Expr>,
        args: Vec<Expr>,
        ty: TypeRef,
    },
    Conditional {
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Box<Expr>,
        ty: TypeRef,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Negate,
    Convert,
    Quote,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    AndAlso,
    OrElse,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    /// Comparison and logical operators produce `bool`.
    pub fn is_predicate(self) -> bool {
        !matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Modulo
        )
    }
}

/// Lambda parameter. Unnamed parameters render as `Param_<index>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: Option<String>,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: TypeRef) -> Self {
        Self { name: None, ty }
    }

    /// Declared name, or the textual form of an unnamed parameter at `index`.
    pub fn display_name(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Param_{index}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    #[serde(default)]
    pub target: Option<Box<Expr>>,
    pub method: String,
    pub declaring_type: TypeRef,
    #[serde(default)]
    pub args: Vec<Expr>,
    pub ty: TypeRef,
}

impl MethodCall {
    /// Static call on `declaring_type` named `method`.
    pub fn is_static(&self, declaring_type: &str, method: &str) -> bool {
        self.target.is_none() && self.declaring_type.is_class(declaring_type) && self.method == method
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<Parameter>,
    pub body: Box<Expr>,
}

impl Lambda {
    pub fn ty(&self) -> TypeRef {
        TypeRef::function(
            self.params.iter().map(|p| p.ty.clone()).collect(),
            self.body.ty(),
        )
    }
}

/// Constructor call. `members` names the constructed members of an
/// anonymous type, positionally matching `args`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewExpr {
    pub ty: TypeRef,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub members: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberBinding {
    pub member: String,
    pub expr: Expr,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementInit {
    pub add_method: String,
    pub args: Vec<Expr>,
}

impl Expr {
    /// Static type of the node.
    pub fn ty(&self) -> TypeRef {
        match self {
            Self::Constant { ty, .. }
            | Self::Member { ty, .. }
            | Self::Unary { ty, .. }
            | Self::Binary { ty, .. }
            | Self::Invoke { ty, .. }
            | Self::Conditional { ty, .. } => ty.clone(),
            Self::Parameter(p) => p.ty.clone(),
            Self::Call(call) => call.ty.clone(),
            Self::Lambda(lambda) => lambda.ty(),
            Self::New(new) | Self::MemberInit { new, .. } | Self::ListInit { new, .. } => {
                new.ty.clone()
            }
            Self::NewArray { element_type, .. } => TypeRef::sequence_of(element_type.clone()),
        }
    }

    /// Node kind name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "Constant",
            Self::Parameter(_) => "Parameter",
            Self::Member { .. } => "MemberAccess",
            Self::Unary { .. } => "Unary",
            Self::Binary { .. } => "Binary",
            Self::Call(_) => "MethodCall",
            Self::Lambda(_) => "Lambda",
            Self::New(_) => "New",
            Self::MemberInit { .. } => "MemberInit",
            Self::NewArray { .. } => "NewArray",
            Self::ListInit { .. } => "ListInit",
            Self::Invoke { .. } => "Invoke",
            Self::Conditional { .. } => "Conditional",
        }
    }

    /// Direct children, in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Constant { .. } | Self::Parameter(_) => Vec::new(),
            Self::Member { target, .. } => target.iter().map(|t| t.as_ref()).collect(),
            Self::Unary { operand, .. } => vec![&**operand],
            Self::Binary { left, right, .. } => vec![&**left, &**right],
            Self::Call(call) => call
                .target
                .iter()
                .map(|t| t.as_ref())
                .chain(call.args.iter())
                .collect(),
            Self::Lambda(lambda) => vec![&*lambda.body],
            Self::New(new) => new.args.iter().collect(),
            Self::MemberInit { new, bindings } => new
                .args
                .iter()
                .chain(bindings.iter().map(|b| &b.expr))
                .collect(),
            Self::NewArray { items, .. } => items.iter().collect(),
            Self::ListInit { new, initializers } => new
                .args
                .iter()
                .chain(initializers.iter().flat_map(|i| i.args.iter()))
                .collect(),
            Self::Invoke { target, args, .. } => {
                std::iter::once(target.as_ref()).chain(args.iter()).collect()
            }
            Self::Conditional {
                test,
                if_true,
                if_false,
                ..
            } => vec![&**test, &**if_true, &**if_false],
        }
    }

    /// Parameters referenced but not bound by a lambda inside this tree.
    pub fn free_parameters(&self) -> Vec<&Parameter> {
        let mut bound: Vec<&Parameter> = Vec::new();
        let mut free: Vec<&Parameter> = Vec::new();
        collect_free(self, &mut bound, &mut free);
        free
    }

    /// Whether the tree can be evaluated without binding any parameter.
    pub fn is_closed(&self) -> bool {
        self.free_parameters().is_empty()
    }

    /// Whether any of `params` occurs free in this tree.
    pub fn references_any(&self, params: &[Parameter]) -> bool {
        self.free_parameters().iter().any(|p| params.contains(p))
    }

    /// Strip `Quote` and `Convert` wrappers.
    pub fn unwrap_conversions(&self) -> &Expr {
        match self {
            Self::Unary {
                op: UnaryOp::Quote | UnaryOp::Convert,
                operand,
                ..
            } => operand.unwrap_conversions(),
            other => other,
        }
    }

    /// The lambda behind optional `Quote`/`Convert` wrappers.
    pub fn as_lambda(&self) -> Option<&Lambda> {
        match self.unwrap_conversions() {
            Self::Lambda(lambda) => Some(lambda),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&MethodCall> {
        match self {
            Self::Call(call) => Some(call),
            _ => None,
        }
    }
}

fn collect_free<'a>(expr: &'a Expr, bound: &mut Vec<&'a Parameter>, free: &mut Vec<&'a Parameter>) {
    match expr {
        Expr::Parameter(p) => {
            if !bound.contains(&p) && !free.contains(&p) {
                free.push(p);
            }
        }
        Expr::Lambda(lambda) => {
            let depth = bound.len();
            bound.extend(lambda.params.iter());
            collect_free(&lambda.body, bound, free);
            bound.truncate(depth);
        }
        other => {
            for child in other.children() {
                collect_free(child, bound, free);
            }
        }
    }
}
