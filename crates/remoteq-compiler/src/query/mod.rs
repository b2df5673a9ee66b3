//! Query composition, translation and execution.
//!
//! - `builder` composes operator chains
//! - `translator` compiles a chain into a [`RemoteDataParameter`](crate::RemoteDataParameter)
//! - `registry` shares translator profiles per element type
//! - `source` defines the collaborator traits and the remote source
//! - `deferred` replays a recorded chain on a source of another type

mod builder;
mod deferred;
mod registry;
mod source;
mod translator;

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod deferred_tests;
#[cfg(test)]
mod registry_tests;
#[cfg(test)]
mod source_tests;

pub use builder::QueryBuilder;
pub use deferred::DeferredQuery;
pub use registry::{TranslatorProfile, TranslatorRegistry};
pub use source::{QueryCache, QuerySource, RemoteSource, ServiceResolver, Transport, TransportError};
pub use translator::QueryTranslator;
