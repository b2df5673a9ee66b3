//! Shared fixtures for compiler tests.

use std::sync::Mutex;

use remoteq_core::{Expr, Lambda, Parameter, Schema, TypeRef, Value};

use crate::decompose::RemoteDataParameter;
use crate::emit::{ExprWriter, MethodWriters};
use crate::literal::LiteralWriters;
use crate::query::{QueryBuilder, QueryTranslator, Transport, TransportError};
use crate::{Result, TranslatorConfig};

pub fn customer() -> TypeRef {
    TypeRef::entity("Customer")
}

pub fn contact() -> TypeRef {
    TypeRef::entity("Contact")
}

pub fn order() -> TypeRef {
    TypeRef::entity("Order")
}

fn person_members() -> Vec<(&'static str, TypeRef)> {
    vec![
        ("Id", TypeRef::I32),
        ("Name", TypeRef::String),
        ("Age", TypeRef::I32),
        ("City", TypeRef::String),
        ("Tags", TypeRef::sequence_of(TypeRef::String)),
        ("Orders", TypeRef::sequence_of(order())),
        ("Created", TypeRef::DateTime),
        ("Score", TypeRef::nullable_of(TypeRef::I32)),
        ("Status", TypeRef::enumeration("Shop.Status")),
    ]
}

/// `Customer` and `Contact` share a shape; `Order` hangs off both.
pub fn schema() -> Schema {
    Schema::new()
        .with_entity("Customer", person_members())
        .with_entity("Contact", person_members())
        .with_entity("Order", [("Id", TypeRef::I32), ("Amount", TypeRef::Decimal)])
        .with_enum("Shop.Status", ["Active", "Closed"])
}

/// Lambda parameter `c` over `Customer`.
pub fn c() -> Parameter {
    Parameter::new("c", customer())
}

/// `param.name`, typed from the fixture schema.
pub fn field(param: &Parameter, name: &str) -> Expr {
    field_of(param.expr(), name)
}

pub fn field_of(target: Expr, name: &str) -> Expr {
    let ty = schema()
        .member_type(&target.ty(), name)
        .cloned()
        .unwrap_or(TypeRef::Object);
    target.member(name, ty)
}

pub fn lambda(param: &Parameter, body: Expr) -> Lambda {
    Lambda::new(vec![param.clone()], body)
}

pub fn customers() -> QueryBuilder {
    QueryBuilder::from_source("Customers", customer())
}

/// Write `expr` with default writers and configuration.
pub fn write(expr: &Expr) -> Result<String> {
    write_with(expr, &TranslatorConfig::default())
}

pub fn write_with(expr: &Expr, config: &TranslatorConfig) -> Result<String> {
    let literals = LiteralWriters::default();
    let methods = MethodWriters::default();
    ExprWriter::new(&literals, &methods, config).write(expr)
}

/// Write the body of `c => body`.
pub fn write_predicate(body: Expr) -> String {
    write(&lambda(&c(), body).into()).unwrap()
}

pub fn translate(chain: &Expr) -> Result<RemoteDataParameter> {
    QueryTranslator::default().translate(chain)
}

/// Query string of `chain` with `$filter` left unencoded.
pub fn query_string(chain: &Expr) -> String {
    translate(chain).unwrap().build_uri_unencoded()
}

/// Records every request and answers with the number of requests so far.
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: Mutex<Vec<(String, TypeRef)>>,
}

impl Transport for RecordingTransport {
    fn execute(
        &self,
        query: &RemoteDataParameter,
        expected: &TypeRef,
    ) -> std::result::Result<Value, TransportError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((query.build_uri_unencoded(), expected.clone()));
        Ok(Value::I32(calls.len() as i32))
    }
}

impl RecordingTransport {
    pub fn requests(&self) -> Vec<(String, TypeRef)> {
        self.calls.lock().unwrap().clone()
    }
}
