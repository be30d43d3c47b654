use super::{DottedPath, Lookup};
use serde_json::{json, Value};

#[test]
fn splits_on_dots() {
    let path = DottedPath::parse("customer.address.city");
    assert_eq!(path.segments(), ["customer", "address", "city"]);
    assert_eq!(path.to_string(), "customer.address.city");
}

#[test]
fn walks_nested_objects() {
    let document = json!({"customer": {"address": {"city": "Seattle"}}});
    assert_eq!(
        DottedPath::parse("customer.address.city").lookup(&document),
        Lookup::Found(&json!("Seattle"))
    );
    assert_eq!(
        DottedPath::parse("customer.address").lookup(&document),
        Lookup::Found(&json!({"city": "Seattle"}))
    );
}

#[test]
fn distinguishes_missing_from_null() {
    let document = json!({"customer": {"address": null}});
    assert_eq!(
        DottedPath::parse("customer.address").lookup(&document),
        Lookup::Found(&Value::Null)
    );
    assert_eq!(DottedPath::parse("customer.phone").lookup(&document), Lookup::Missing);
    assert_eq!(DottedPath::parse("customer.address.city").lookup(&document), Lookup::Missing);
}

#[test]
fn present_collapses_missing_and_null() {
    let document = json!({"a": null, "b": 0});
    assert_eq!(DottedPath::parse("a").lookup(&document).present(), None);
    assert_eq!(DottedPath::parse("zzz").lookup(&document).present(), None);
    assert_eq!(DottedPath::parse("b").lookup(&document).present(), Some(&json!(0)));
}

#[test]
fn does_not_descend_into_arrays_or_scalars() {
    let document = json!({"items": [{"id": 1}], "name": "x"});
    assert_eq!(DottedPath::parse("items.id").lookup(&document), Lookup::Missing);
    assert_eq!(DottedPath::parse("name.length").lookup(&document), Lookup::Missing);
}
