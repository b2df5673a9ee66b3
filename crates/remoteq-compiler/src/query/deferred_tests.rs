use std::sync::Arc;

use remoteq_core::{Expr, Lambda, Parameter, TypeRef, Value};

use super::*;
use crate::Error;
use crate::test_utils::{RecordingTransport, c, contact, customer, field, lambda, schema};

fn adults(p: &Parameter) -> Lambda {
    lambda(p, field(p, "Age").ge(Expr::constant(18)))
}

fn by_name(p: &Parameter) -> Lambda {
    lambda(p, field(p, "Name"))
}

fn authored() -> Expr {
    let c = c();
    QueryBuilder::for_type(customer())
        .filter(adults(&c))
        .order_by(by_name(&c))
        .take(3)
        .build()
}

fn contacts(transport: Arc<RecordingTransport>) -> RemoteSource {
    RemoteSource::new(
        "Contacts",
        contact(),
        Arc::new(schema()),
        transport,
        Arc::new(TranslatorRegistry::new()),
    )
}

#[test]
fn records_operators_in_source_order() {
    let deferred = DeferredQuery::from_chain(&authored()).unwrap();
    assert_eq!(deferred.declared_type(), &customer());
    assert_eq!(
        deferred.operator_names().collect::<Vec<_>>(),
        ["Where", "OrderBy", "Take"]
    );
}

#[test]
fn root_must_be_a_query() {
    let err = DeferredQuery::from_chain(&Expr::constant(1)).unwrap_err();
    assert!(matches!(err, Error::NotASequence(TypeRef::I32)));
}

#[test]
fn replay_matches_chain_authored_on_target() {
    let deferred = DeferredQuery::from_chain(&authored()).unwrap();
    let root = Expr::source("Contacts", contact());
    let replayed = deferred.replay(root, &contact(), &schema()).unwrap();

    let p = Parameter::new("c", contact());
    let expected = QueryBuilder::from_source("Contacts", contact())
        .filter(adults(&p))
        .order_by(by_name(&p))
        .take(3)
        .build();
    assert_eq!(replayed, expected);
}

#[test]
fn attach_executes_on_source() {
    let transport = Arc::new(RecordingTransport::default());
    let source = contacts(transport.clone());

    let deferred = DeferredQuery::from_chain(&authored()).unwrap();
    assert_eq!(deferred.attach(&source).unwrap(), Value::I32(1));

    insta::assert_debug_snapshot!(transport.requests(), @r#"
    [
        (
            "$filter=Age ge 18&$top=3&$orderby=Name",
            Sequence(
                Entity(
                    "Contact",
                ),
            ),
        ),
    ]
    "#);
}

#[test]
fn attach_terminal_query() {
    let transport = Arc::new(RecordingTransport::default());
    let source = contacts(transport.clone());

    let c = c();
    let chain = QueryBuilder::for_type(customer()).first_where(adults(&c));
    DeferredQuery::from_chain(&chain).unwrap().attach(&source).unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].0, "$filter=Age ge 18&$top=1");
    assert_eq!(requests[0].1, contact());
}

#[test]
fn same_type_replays_unchanged() {
    let chain = authored();
    let deferred = DeferredQuery::from_chain(&chain).unwrap();
    let replayed = deferred
        .replay(Expr::source("", customer()), &customer(), &schema())
        .unwrap();
    assert_eq!(replayed, chain);
}

#[test]
fn unmappable_member_fails_before_transport() {
    let transport = Arc::new(RecordingTransport::default());
    let schema = schema().with_entity("Lead", [("Name", TypeRef::String)]);
    let source = RemoteSource::new(
        "Leads",
        TypeRef::entity("Lead"),
        Arc::new(schema),
        transport.clone(),
        Arc::new(TranslatorRegistry::new()),
    );

    let err = DeferredQuery::from_chain(&authored())
        .unwrap()
        .attach(&source)
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"member `Age` cannot be mapped onto type `Lead`");
    assert!(transport.requests().is_empty());
}
