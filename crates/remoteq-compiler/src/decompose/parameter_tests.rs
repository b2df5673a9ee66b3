use super::*;
use crate::Error;

#[test]
fn empty_model_renders_nothing() {
    let param = RemoteDataParameter::new();
    assert!(param.is_empty());
    assert_eq!(param.build_uri(), "");
}

#[test]
fn single_field_has_no_separator() {
    let param = RemoteDataParameter {
        take: Some("5".into()),
        ..Default::default()
    };
    assert_eq!(param.build_uri(), "$top=5");
}

#[test]
fn fixed_part_order() {
    let mut param = RemoteDataParameter {
        expand: Some("Orders".into()),
        take: Some("10".into()),
        skip: Some("20".into()),
        order_by: vec!["Name".into(), "Age desc".into()],
        ..Default::default()
    };
    param.and_filter("Age gt 18");
    param.set_select("Name,Age").unwrap();

    insta::assert_snapshot!(param.build_uri_unencoded(), @"$filter=Age gt 18&$select=Name,Age&$skip=20&$top=10&$orderby=Name,Age desc&$expand=Orders");
}

#[test]
fn filter_is_percent_encoded_as_a_whole() {
    let mut param = RemoteDataParameter::new();
    param.and_filter("Name eq 'A B' and Age ge 2");
    param.order_by.push("Name desc".into());

    insta::assert_snapshot!(param.build_uri(), @"$filter=Name%20eq%20%27A%20B%27%20and%20Age%20ge%202&$orderby=Name desc");
}

#[test]
fn filters_accumulate_with_and() {
    let mut param = RemoteDataParameter::new();
    param.and_filter("a");
    assert_eq!(param.filter.as_deref(), Some("a"));

    param.and_filter("b");
    param.and_filter("c");
    assert_eq!(param.filter.as_deref(), Some("((a) and (b)) and (c)"));
}

#[test]
fn select_is_set_once() {
    let mut param = RemoteDataParameter::new();
    param.set_select("Name").unwrap();

    let err = param.set_select("Age").unwrap_err();
    assert!(matches!(err, Error::UnsupportedProjection(_)));
    assert_eq!(param.select(), Some("Name"));
}

#[test]
fn empty_values_are_skipped() {
    let param = RemoteDataParameter {
        filter: Some(String::new()),
        skip: Some("3".into()),
        ..Default::default()
    };
    assert_eq!(param.build_uri(), "$skip=3");
}

#[test]
fn json_omits_unset_fields() {
    let mut param = RemoteDataParameter::new();
    param.and_filter("Age gt 18");
    param.take = Some("1".into());
    param.executor = "First".into();

    let json = serde_json::to_string(&param).unwrap();
    insta::assert_snapshot!(json, @r#"{"filter":"Age gt 18","take":"1","executor":"First"}"#);

    let back: RemoteDataParameter = serde_json::from_str(&json).unwrap();
    assert_eq!(back, param);
}
