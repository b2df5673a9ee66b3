//! Expression writer facade and method-call writers.
//!
//! `ExprWriter::write` turns a predicate, selector or key expression into
//! protocol filter grammar. Calls go through [`MethodWriters`]; closed
//! sub-trees are evaluated and written as literals; open sub-trees are
//! written structurally.

mod methods;
mod writer;


pub use methods::{CanHandleFn, MethodRule, MethodWriteFn, MethodWriters};
pub use writer::ExprWriter;
