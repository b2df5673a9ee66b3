use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use remoteq_core::{Expr, TypeRef, Value};

use super::*;
use crate::Error;
use crate::decompose::RemoteDataParameter;
use crate::test_utils::{RecordingTransport, c, customer, field, lambda, schema};

struct FailingTransport;

impl Transport for FailingTransport {
    fn execute(
        &self,
        _: &RemoteDataParameter,
        _: &TypeRef,
    ) -> std::result::Result<Value, TransportError> {
        Err(TransportError::Request("503 Service Unavailable".into()))
    }
}

#[derive(Default)]
struct MapCache(DashMap<String, Value>);

impl QueryCache for MapCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.0.get(key).map(|v| v.value().clone())
    }

    fn insert(&self, key: String, value: Value) {
        self.0.insert(key, value);
    }
}

struct Services(HashMap<&'static str, Arc<dyn Transport>>);

impl ServiceResolver for Services {
    fn resolve(&self, service: &str) -> Option<Arc<dyn Transport>> {
        self.0.get(service).cloned()
    }
}

fn source(transport: Arc<dyn Transport>) -> RemoteSource {
    RemoteSource::new(
        "Customers",
        customer(),
        Arc::new(schema()),
        transport,
        Arc::new(TranslatorRegistry::new()),
    )
}

fn adults(source: &RemoteSource) -> QueryBuilder {
    let c = c();
    source
        .query()
        .filter(lambda(&c, field(&c, "Age").ge(Expr::constant(18))))
}

#[test]
fn execute_sends_query_and_expected_type() {
    let transport = Arc::new(RecordingTransport::default());
    let source = source(transport.clone());

    source.execute(&adults(&source).take(2).build()).unwrap();
    source.execute(&adults(&source).count()).unwrap();

    insta::assert_debug_snapshot!(transport.requests(), @r#"
    [
        (
            "$filter=Age ge 18&$top=2",
            Sequence(
                Entity(
                    "Customer",
                ),
            ),
        ),
        (
            "$filter=Age ge 18",
            I32,
        ),
    ]
    "#);
}

#[test]
fn cache_is_keyed_by_query_and_executor() {
    let transport = Arc::new(RecordingTransport::default());
    let cache = Arc::new(MapCache::default());
    let source = source(transport.clone()).with_cache(cache.clone());

    let list = adults(&source).build();
    assert_eq!(source.execute(&list).unwrap(), Value::I32(1));
    assert_eq!(source.execute(&list).unwrap(), Value::I32(1));
    assert_eq!(source.execute(&adults(&source).count()).unwrap(), Value::I32(2));

    assert_eq!(transport.requests().len(), 2);
    assert!(cache.0.contains_key("Customers?$filter=Age%20ge%2018"));
    assert!(cache.0.contains_key("Customers?$filter=Age%20ge%2018#Count"));
}

#[test]
fn transport_errors_propagate() {
    let source = source(Arc::new(FailingTransport));
    let err = source.execute(&source.query().build()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"request failed: 503 Service Unavailable");
}

#[test]
fn translation_errors_skip_transport() {
    let transport = Arc::new(RecordingTransport::default());
    let source = source(transport.clone());
    let err = source.execute(&source.query().single()).unwrap_err();

    assert!(matches!(err, Error::UnsupportedOperator { .. }));
    assert!(transport.requests().is_empty());
}

#[test]
fn resolve_by_service_name() {
    let transport: Arc<dyn Transport> = Arc::new(RecordingTransport::default());
    let services = Services(HashMap::from([("crm", transport)]));
    let registry = Arc::new(TranslatorRegistry::new());
    let schema = Arc::new(schema());

    let source = RemoteSource::resolve(
        "crm",
        &services,
        "Customers",
        customer(),
        schema.clone(),
        registry.clone(),
    )
    .unwrap();
    assert_eq!(source.collection(), "Customers");
    assert_eq!(source.root(), Expr::source("Customers", customer()));

    let err = RemoteSource::resolve("billing", &services, "Invoices", customer(), schema, registry)
        .unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::UnknownService(ref s)) if s == "billing"));
}
