//! Query sources and the collaborators a remote source needs.

use std::fmt;
use std::sync::Arc;

use remoteq_core::{Expr, Schema, TypeRef, Value};
use tracing::debug;

use super::{QueryBuilder, TranslatorRegistry};
use crate::Result;
use crate::decompose::RemoteDataParameter;

/// Errors reported by transport collaborators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("no service registered under `{0}`")]
    UnknownService(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("response could not be read as `{expected}`: {reason}")]
    Materialize { expected: TypeRef, reason: String },
}

/// Sends a built query and materializes the typed response.
pub trait Transport: Send + Sync {
    fn execute(
        &self,
        query: &RemoteDataParameter,
        expected: &TypeRef,
    ) -> std::result::Result<Value, TransportError>;
}

/// Resolves transports by service name.
pub trait ServiceResolver: Send + Sync {
    fn resolve(&self, service: &str) -> Option<Arc<dyn Transport>>;
}

/// Thread-safe response cache.
pub trait QueryCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn insert(&self, key: String, value: Value);
}

/// Something an operator chain can run against.
pub trait QuerySource {
    fn element_type(&self) -> TypeRef;

    /// Root marker chains over this source start from.
    fn root(&self) -> Expr;

    fn schema(&self) -> &Schema;

    fn execute(&self, chain: &Expr) -> Result<Value>;
}

/// A remote collection reached through a [`Transport`].
#[derive(Clone)]
pub struct RemoteSource {
    collection: String,
    element: TypeRef,
    schema: Arc<Schema>,
    transport: Arc<dyn Transport>,
    registry: Arc<TranslatorRegistry>,
    cache: Option<Arc<dyn QueryCache>>,
}

impl fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("collection", &self.collection)
            .field("element", &self.element)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl RemoteSource {
    pub fn new(
        collection: impl Into<String>,
        element: TypeRef,
        schema: Arc<Schema>,
        transport: Arc<dyn Transport>,
        registry: Arc<TranslatorRegistry>,
    ) -> Self {
        Self {
            collection: collection.into(),
            element,
            schema,
            transport,
            registry,
            cache: None,
        }
    }

    /// Source whose transport is the service `service` of `resolver`.
    pub fn resolve(
        service: &str,
        resolver: &dyn ServiceResolver,
        collection: impl Into<String>,
        element: TypeRef,
        schema: Arc<Schema>,
        registry: Arc<TranslatorRegistry>,
    ) -> Result<Self> {
        let transport = resolver
            .resolve(service)
            .ok_or_else(|| TransportError::UnknownService(service.to_string()))?;
        Ok(Self::new(collection, element, schema, transport, registry))
    }

    pub fn with_cache(mut self, cache: Arc<dyn QueryCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Start composing a query over this source.
    pub fn query(&self) -> QueryBuilder {
        QueryBuilder::new(self.root())
    }

    /// Cache key: `<collection>?<query string>`, plus `#<executor>` for
    /// terminal operators.
    fn cache_key(&self, query_string: &str, executor: &str) -> String {
        let mut key = format!("{}?{query_string}", self.collection);
        if !executor.is_empty() {
            key.push('#');
            key.push_str(executor);
        }
        key
    }
}

impl QuerySource for RemoteSource {
    fn element_type(&self) -> TypeRef {
        self.element.clone()
    }

    fn root(&self) -> Expr {
        Expr::source(self.collection.clone(), self.element.clone())
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn execute(&self, chain: &Expr) -> Result<Value> {
        let translator = self.registry.translator_for(&self.element);
        let query = translator.translate(chain)?;
        let expected = match chain.ty() {
            TypeRef::Queryable(element) => TypeRef::Sequence(element),
            other => other,
        };

        let key = self.cache_key(&translator.query_string(&query), &query.executor);
        if let Some(cache) = &self.cache
            && let Some(hit) = cache.get(&key)
        {
            debug!(key = %key, "query served from cache");
            return Ok(hit);
        }

        let value = self.transport.execute(&query, &expected)?;
        if let Some(cache) = &self.cache {
            cache.insert(key, value.clone());
        }
        Ok(value)
    }
}
