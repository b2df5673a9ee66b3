#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for remoteq query translation.
//!
//! Three layers:
//! - **Types and values**: `TypeRef` static types and `Value` runtime values
//! - **Expression tree**: `Expr`, the typed AST that queries are built from
//! - **Schema**: registration-time member descriptors, replacing reflection
//!
//! Everything here is plain data. Translation lives in `remoteq-compiler`.

mod builder;
mod expr;
mod schema;
mod types;
mod value;

#[cfg(test)]
mod expr_tests;
#[cfg(test)]
mod types_tests;

pub use expr::{
    BinaryOp, ElementInit, Expr, Lambda, MemberBinding, MethodCall, NewExpr, Parameter, UnaryOp,
};
pub use schema::{MemberDescriptor, MemberLookup, Schema};
pub use types::{ENUMERABLE_CLASS, MATH_CLASS, QUERYABLE_CLASS, TypeRef};
pub use value::{BinaryStream, ForwardOnly, SharedStream, Value};
