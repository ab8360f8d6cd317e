use reqres_test::{resolve_path, PathError};
use serde_json::{json, Value};

#[test]
fn test_resolve_simple_field() {
    let v = json!({"token": "QpwL5tke4Pnpja7X4"});
    assert_eq!(resolve_path(&v, "token").unwrap(), json!("QpwL5tke4Pnpja7X4"));
}

#[test]
fn test_resolve_nested_field() {
    let v = json!({"data": {"first_name": "Janet"}});
    assert_eq!(resolve_path(&v, "data.first_name").unwrap(), json!("Janet"));
}

#[test]
fn test_resolve_array_index() {
    let v = json!({"data": [{"id": 7}, {"id": 8}]});
    assert_eq!(resolve_path(&v, "data[0].id").unwrap(), json!(7));
    assert_eq!(resolve_path(&v, "data[1].id").unwrap(), json!(8));
}

#[test]
fn test_resolve_len_and_size() {
    let v = json!({"data": [1, 2, 3], "support": {"url": "u", "text": "t"}});
    assert_eq!(resolve_path(&v, "data.len()").unwrap(), json!(3));
    assert_eq!(resolve_path(&v, "support.size()").unwrap(), json!(2));
}

#[test]
fn test_resolve_missing_is_null() {
    let v = json!({"data": []});
    assert_eq!(resolve_path(&v, "data[0].email").unwrap(), Value::Null);
    assert_eq!(resolve_path(&v, "nope").unwrap(), Value::Null);
    assert_eq!(resolve_path(&v, "data.len().x").unwrap(), Value::Null);
}

#[test]
fn test_resolve_empty_path_is_root() {
    let v = json!({});
    assert_eq!(resolve_path(&v, "").unwrap(), v);
}

#[test]
fn test_resolve_bad_index() {
    let v = json!({"data": []});
    assert_eq!(
        resolve_path(&v, "data[first]"),
        Err(PathError::BadIndex("first".into()))
    );
}
