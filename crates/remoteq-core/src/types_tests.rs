use crate::TypeRef;

fn customer() -> TypeRef {
    TypeRef::entity("Customer")
}

fn contact() -> TypeRef {
    TypeRef::entity("Contact")
}

#[test]
fn substitute_replaces_nested_positions() {
    let ty = TypeRef::function(
        vec![TypeRef::queryable_of(customer())],
        TypeRef::sequence_of(TypeRef::nullable_of(customer())),
    );

    let replaced = ty.substitute(&customer(), &contact());

    assert_eq!(
        replaced,
        TypeRef::function(
            vec![TypeRef::queryable_of(contact())],
            TypeRef::sequence_of(TypeRef::nullable_of(contact())),
        )
    );
}

#[test]
fn substitute_leaves_unrelated_types() {
    assert_eq!(TypeRef::I32.substitute(&customer(), &contact()), TypeRef::I32);
    assert_eq!(
        TypeRef::entity("Order").substitute(&customer(), &contact()),
        TypeRef::entity("Order")
    );
}

#[test]
fn element_type_of_sequences() {
    assert_eq!(
        TypeRef::queryable_of(customer()).element_type(),
        Some(&customer())
    );
    assert_eq!(
        TypeRef::sequence_of(TypeRef::String).element_type(),
        Some(&TypeRef::String)
    );
    assert_eq!(TypeRef::String.element_type(), None);
}

#[test]
fn mentions_finds_nested_type() {
    let ty = TypeRef::function(vec![customer()], TypeRef::Bool);
    assert!(ty.mentions(&customer()));
    assert!(!ty.mentions(&contact()));
}

#[test]
fn display_forms() {
    assert_eq!(TypeRef::queryable_of(customer()).to_string(), "query<Customer>");
    assert_eq!(TypeRef::nullable_of(TypeRef::I32).to_string(), "i32?");
    assert_eq!(
        TypeRef::function(vec![customer(), TypeRef::I32], TypeRef::Bool).to_string(),
        "fn(Customer, i32) -> bool"
    );
}

#[test]
fn deserializes_from_json() {
    let ty: TypeRef = serde_json::from_str(r#"{"queryable": {"entity": "Customer"}}"#).unwrap();
    assert_eq!(ty, TypeRef::queryable_of(customer()));

    let scalar: TypeRef = serde_json::from_str(r#""date_time_offset""#).unwrap();
    assert_eq!(scalar, TypeRef::DateTimeOffset);
}
