use indoc::indoc;

use crate::{BinaryOp, Expr, Parameter, TypeRef, Value};

fn customer() -> TypeRef {
    TypeRef::entity("Customer")
}

fn name_of(param: &Parameter) -> Expr {
    param.expr().member("Name", TypeRef::String)
}

#[test]
fn lambda_type_is_function_of_params() {
    let c = Parameter::new("c", customer());
    let lambda = Expr::lambda(vec![c.clone()], name_of(&c));
    assert_eq!(
        lambda.ty(),
        TypeRef::function(vec![customer()], TypeRef::String)
    );
}

#[test]
fn comparison_builds_bool() {
    let c = Parameter::new("c", customer());
    let body = name_of(&c).equal(Expr::constant("Ann"));
    assert_eq!(body.ty(), TypeRef::Bool);
    let Expr::Binary { op, .. } = &body else {
        panic!("expected binary");
    };
    assert_eq!(*op, BinaryOp::Equal);
}

#[test]
fn free_parameters_exclude_bound_ones() {
    let c = Parameter::new("c", customer());
    let body = name_of(&c).equal(Expr::constant("Ann"));

    assert_eq!(body.free_parameters(), vec![&c]);
    assert!(!body.is_closed());

    let lambda = Expr::lambda(vec![c.clone()], body);
    assert!(lambda.is_closed());
}

#[test]
fn references_any_checks_given_params() {
    let c = Parameter::new("c", customer());
    let o = Parameter::new("o", TypeRef::entity("Order"));
    let body = name_of(&c);
    assert!(body.references_any(std::slice::from_ref(&c)));
    assert!(!body.references_any(std::slice::from_ref(&o)));
}

#[test]
fn closed_constant_member_read() {
    let captured = Expr::constant(Value::record([("limit", Value::I32(5))]));
    let read = captured.member("limit", TypeRef::I32);
    assert!(read.is_closed());
    assert_eq!(read.children().len(), 1);
}

#[test]
fn unwrap_conversions_finds_lambda() {
    let c = Parameter::new("c", customer());
    let lambda = Expr::lambda(vec![c.clone()], name_of(&c));
    let quoted = Expr::unary(crate::UnaryOp::Quote, lambda.clone());
    assert_eq!(quoted.as_lambda().map(|l| l.params.len()), Some(1));
    assert_eq!(quoted.unwrap_conversions(), &lambda);
}

#[test]
fn unnamed_parameter_display_name() {
    let p = Parameter::unnamed(TypeRef::String);
    assert_eq!(p.display_name(0), "Param_0");
    assert_eq!(Parameter::new("t", TypeRef::String).display_name(3), "t");
}

#[test]
fn deserializes_lambda_from_json() {
    let json = indoc! {r#"
        {
          "kind": "lambda",
          "params": [{ "name": "c", "ty": { "entity": "Customer" } }],
          "body": {
            "kind": "binary",
            "op": "greater_than",
            "left": {
              "kind": "member",
              "target": { "kind": "parameter", "name": "c", "ty": { "entity": "Customer" } },
              "member": "Age",
              "declaring_type": { "entity": "Customer" },
              "ty": "i32"
            },
            "right": { "kind": "constant", "value": { "i32": 18 }, "ty": "i32" },
            "ty": "bool"
          }
        }
    "#};

    let parsed: Expr = serde_json::from_str(json).unwrap();

    let c = Parameter::new("c", customer());
    let expected = Expr::lambda(
        vec![c.clone()],
        c.expr()
            .member("Age", TypeRef::I32)
            .gt(Expr::constant(Value::I32(18))),
    );
    assert_eq!(parsed, expected);
}
