use remoteq_core::{Expr, QUERYABLE_CLASS, TypeRef, UnaryOp};

use super::*;
use crate::test_utils::{c, customer, customers, field, lambda};

#[test]
fn operators_wrap_the_upstream_chain() {
    let c = c();
    let predicate = lambda(&c, field(&c, "Age").gt(Expr::constant(1)));
    let chain = customers().filter(predicate.clone()).build();

    let call = chain.as_call().unwrap();
    assert!(call.is_static(QUERYABLE_CLASS, "Where"));
    assert_eq!(call.ty, TypeRef::queryable_of(customer()));
    assert_eq!(call.args[0], Expr::source("Customers", customer()));
    assert_eq!(
        call.args[1],
        Expr::unary(UnaryOp::Quote, predicate.into())
    );
}

#[test]
fn select_changes_element_type() {
    let c = c();
    let builder = customers().select(lambda(&c, field(&c, "Name")));
    assert_eq!(builder.element_type(), TypeRef::String);

    let builder = builder.take(2);
    assert_eq!(builder.expr().ty(), TypeRef::queryable_of(TypeRef::String));
}

#[test]
fn terminal_types() {
    assert_eq!(customers().count().ty(), TypeRef::I32);
    assert_eq!(customers().long_count().ty(), TypeRef::I64);
    assert_eq!(customers().any().ty(), TypeRef::Bool);
    assert_eq!(customers().first().ty(), customer());
    assert_eq!(customers().last_or_default().ty(), customer());
}

#[test]
fn terminal_predicate_is_quoted() {
    let c = c();
    let first = customers().first_where(lambda(&c, field(&c, "Age").gt(Expr::constant(1))));
    let call = first.as_call().unwrap();
    assert_eq!(call.method, "First");
    assert_eq!(call.args.len(), 2);
    assert!(call.args[1].as_lambda().is_some());
    assert!(matches!(call.args[1], Expr::Unary { op: UnaryOp::Quote, .. }));
}

#[test]
fn placeholder_source() {
    let builder = QueryBuilder::for_type(customer());
    assert_eq!(builder.element_type(), customer());
    assert_eq!(builder.build(), Expr::source("", customer()));
}
