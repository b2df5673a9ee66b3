//! Constructors for building expression trees by hand.
//!
//! These mirror what a host language's compiler would produce for lambda
//! syntax such as `c => c.Name.StartsWith("A") && c.Age > 18`.

use crate::{
    BinaryOp, Expr, Lambda, MemberBinding, MethodCall, NewExpr, Parameter, TypeRef, UnaryOp, Value,
};

impl Expr {
    /// Constant typed by its runtime value.
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        let ty = value.runtime_type();
        Self::Constant { value, ty }
    }

    pub fn typed_constant(value: Value, ty: TypeRef) -> Self {
        Self::Constant { value, ty }
    }

    /// Root marker of an operator chain over `collection` with `element` rows.
    pub fn source(collection: impl Into<String>, element: TypeRef) -> Self {
        Self::Constant {
            value: Value::Source(collection.into()),
            ty: TypeRef::queryable_of(element),
        }
    }

    pub fn param(param: &Parameter) -> Self {
        Self::Parameter(param.clone())
    }

    /// Instance member read; the declaring type is this node's type.
    pub fn member(self, name: impl Into<String>, ty: TypeRef) -> Self {
        let declaring_type = self.ty();
        Self::Member {
            target: Some(Box::new(self)),
            member: name.into(),
            declaring_type,
            ty,
        }
    }

    pub fn static_member(declaring_type: TypeRef, name: impl Into<String>, ty: TypeRef) -> Self {
        Self::Member {
            target: None,
            member: name.into(),
            declaring_type,
            ty,
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        let ty = match op {
            UnaryOp::Not => TypeRef::Bool,
            _ => operand.ty(),
        };
        Self::Unary {
            op,
            operand: Box::new(operand),
            ty,
        }
    }

    pub fn convert(self, ty: TypeRef) -> Self {
        Self::Unary {
            op: UnaryOp::Convert,
            operand: Box::new(self),
            ty,
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let ty = if op.is_predicate() {
            TypeRef::Bool
        } else {
            left.ty()
        };
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            lifted_to_null: false,
            ty,
        }
    }

    pub fn equal(self, other: Expr) -> Self {
        Self::binary(BinaryOp::Equal, self, other)
    }

    pub fn not_equal(self, other: Expr) -> Self {
        Self::binary(BinaryOp::NotEqual, self, other)
    }

    pub fn gt(self, other: Expr) -> Self {
        Self::binary(BinaryOp::GreaterThan, self, other)
    }

    pub fn ge(self, other: Expr) -> Self {
        Self::binary(BinaryOp::GreaterThanOrEqual, self, other)
    }

    pub fn lt(self, other: Expr) -> Self {
        Self::binary(BinaryOp::LessThan, self, other)
    }

    pub fn le(self, other: Expr) -> Self {
        Self::binary(BinaryOp::LessThanOrEqual, self, other)
    }

    pub fn and(self, other: Expr) -> Self {
        Self::binary(BinaryOp::AndAlso, self, other)
    }

    pub fn or(self, other: Expr) -> Self {
        Self::binary(BinaryOp::OrElse, self, other)
    }

    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// Instance method call on this node.
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>, ty: TypeRef) -> Self {
        let declaring_type = self.ty().non_nullable().clone();
        Self::Call(MethodCall {
            target: Some(Box::new(self)),
            method: method.into(),
            declaring_type,
            args,
            ty,
        })
    }

    pub fn static_call(
        declaring_type: TypeRef,
        method: impl Into<String>,
        args: Vec<Expr>,
        ty: TypeRef,
    ) -> Self {
        Self::Call(MethodCall {
            target: None,
            method: method.into(),
            declaring_type,
            args,
            ty,
        })
    }

    pub fn lambda(params: Vec<Parameter>, body: Expr) -> Self {
        Self::Lambda(Lambda {
            params,
            body: Box::new(body),
        })
    }

    /// Anonymous-type construction: `new { A = .., B = .. }`.
    pub fn new_anonymous<N: Into<String>>(
        ty: TypeRef,
        members: impl IntoIterator<Item = (N, Expr)>,
    ) -> Self {
        let (names, args): (Vec<String>, Vec<Expr>) =
            members.into_iter().map(|(n, e)| (n.into(), e)).unzip();
        Self::New(NewExpr {
            ty,
            args,
            members: Some(names),
        })
    }

    /// Object initializer: `new T { A = .., B = .. }`.
    pub fn member_init<N: Into<String>>(
        ty: TypeRef,
        bindings: impl IntoIterator<Item = (N, Expr)>,
    ) -> Self {
        Self::MemberInit {
            new: NewExpr {
                ty,
                args: Vec::new(),
                members: None,
            },
            bindings: bindings
                .into_iter()
                .map(|(member, expr)| MemberBinding {
                    member: member.into(),
                    expr,
                })
                .collect(),
        }
    }

    pub fn new_array(element_type: TypeRef, items: Vec<Expr>) -> Self {
        Self::NewArray {
            element_type,
            items,
        }
    }

    pub fn invoke(target: Expr, args: Vec<Expr>) -> Self {
        let ty = match target.ty() {
            TypeRef::Function(_, ret) => *ret,
            other => other,
        };
        Self::Invoke {
            target: Box::new(target),
            args,
            ty,
        }
    }

    pub fn conditional(test: Expr, if_true: Expr, if_false: Expr) -> Self {
        let ty = if_true.ty();
        Self::Conditional {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
            ty,
        }
    }
}

impl Parameter {
    pub fn expr(&self) -> Expr {
        Expr::Parameter(self.clone())
    }
}

impl Lambda {
    pub fn new(params: Vec<Parameter>, body: Expr) -> Self {
        Self {
            params,
            body: Box::new(body),
        }
    }
}

impl From<Lambda> for Expr {
    fn from(lambda: Lambda) -> Self {
        Expr::Lambda(lambda)
    }
}
