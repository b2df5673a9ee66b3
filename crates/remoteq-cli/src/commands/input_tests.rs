use std::path::Path;

use remoteq_core::{Expr, TypeRef};

use super::input::{load_document, parse_document};
use super::test_fixtures::ADULTS;

#[test]
fn parses_schema_and_query() {
    let doc = parse_document(ADULTS).unwrap();

    assert_eq!(
        doc.schema.entity_names().collect::<Vec<_>>(),
        ["Customer", "Contact", "Lead"]
    );
    assert_eq!(
        doc.query.ty(),
        TypeRef::queryable_of(TypeRef::entity("Customer"))
    );
    assert!(matches!(doc.query, Expr::Call(ref call) if call.method == "Take"));
}

#[test]
fn schema_is_optional() {
    let doc =
        parse_document(r#"{ "query": { "kind": "constant", "value": "null", "ty": "object" } }"#)
            .unwrap();

    assert_eq!(doc.schema.entity_names().count(), 0);
}

#[test]
fn empty_document_is_rejected() {
    let err = parse_document("  \n").unwrap_err();

    insta::assert_snapshot!(err, @"query document cannot be empty");
}

#[test]
fn missing_query_is_rejected() {
    let err = parse_document(r#"{ "schema": {} }"#).unwrap_err();

    assert!(
        err.to_string()
            .starts_with("invalid query document: missing field `query`"),
        "{err}"
    );
}

#[test]
fn unreadable_file_names_the_path() {
    let err = load_document(Path::new("does/not/exist.json")).unwrap_err();

    assert!(
        err.to_string()
            .starts_with("failed to read 'does/not/exist.json': "),
        "{err}"
    );
}
