//! remoteq compiler: expression trees to OData query strings.
//!
//! This crate provides the translation pipeline for remote queries:
//! - `literal` - protocol literals for runtime values
//! - `eval` - closed-form evaluation of constant-foldable sub-trees
//! - `emit` - expression writer facade and method-call writers
//! - `decompose` - operator chain decomposition and URI building
//! - `rewrite` - cross-type expression rewriting
//! - `query` - query builder, attachable facade, sources and registry

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod decompose;
pub mod emit;
pub mod eval;
pub mod literal;
pub mod query;
pub mod rewrite;

#[cfg(test)]
pub mod test_utils;

pub use config::TranslatorConfig;
pub use decompose::{Decomposer, RemoteDataParameter};
pub use emit::{ExprWriter, MethodRule, MethodWriters};
pub use eval::Evaluator;
pub use literal::{LiteralKind, LiteralWriters};
pub use query::{
    DeferredQuery, QueryBuilder, QueryCache, QuerySource, QueryTranslator, RemoteSource,
    ServiceResolver, TranslatorProfile, TranslatorRegistry, Transport, TransportError,
};
pub use rewrite::{Rewriter, rewrite};

use remoteq_core::TypeRef;

/// Errors that can occur while translating or rewriting a query.
///
/// Every error aborts the whole translation; no partial query string is
/// ever produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("query operator `{operator}` is not supported: {hint}")]
    UnsupportedOperator {
        operator: String,
        hint: &'static str,
    },

    #[error("unsupported projection: {0}")]
    UnsupportedProjection(String),

    #[error("no literal writer for type `{0}`")]
    UnsupportedLiteralType(TypeRef),

    #[error("expression node `{0}` cannot be translated")]
    UnsupportedNodeKind(&'static str),

    #[error("member `{member}` cannot be mapped onto type `{type_name}`")]
    UnsupportedMemberMapping { type_name: String, member: String },

    #[error("member `{member}` is ambiguous on type `{type_name}`")]
    AmbiguousMemberMapping { type_name: String, member: String },

    #[error("parameter `{0}` is not bound")]
    UnboundParameter(String),

    #[error("`{declaring_type}.{method}` cannot be evaluated")]
    UnsupportedMethod {
        declaring_type: String,
        method: String,
    },

    #[error("expected a sequence, found `{0}`")]
    NotASequence(TypeRef),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Expression nested deeper than the configured recursion limit.
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("failed to read stream literal")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, Error>;
