use std::fmt;
use std::io;

use khan_error::{
    fields, get_fields, get_kind, graphql_response, internal, invalid_input, is, is_khan_error,
    khan_service, not_allowed, not_found, not_implemented, service, stringify_field,
    transient_khan_service, transient_service, unauthorized, unwrap, wrap, Cause, Error,
    FieldValue, Kind, MESSAGE_KEY,
};

#[derive(Debug, PartialEq)]
struct MyError {
    msg: &'static str,
}

impl fmt::Display for MyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.msg)
    }
}

impl std::error::Error for MyError {}

fn my_error(msg: &'static str) -> Cause {
    Cause::foreign(MyError { msg })
}

#[test]
fn simple_error() {
    let e = internal!("Testing one two");
    assert_eq!(e.to_string(), "internal error Testing one two");
    assert_eq!(
        get_fields(&e),
        fields! { "Kind" => "internal error", "Message" => "Testing one two" }
    );
}

#[test]
fn extra_fields_display() {
    let e = internal!(
        "Testing",
        fields! { "kaid" => "123", "tags" => vec!["one", "two"], "empty" => "", "panicValue" => "" }
    );
    assert_eq!(
        e.to_string(),
        r#"internal error Testing, empty = , kaid = 123, tags = ["one" "two"]"#
    );

    let fields = get_fields(&e);
    assert_eq!(fields["panicValue"], "");
    assert_eq!(fields["tags"], FieldValue::Strings(vec!["one".into(), "two".into()]));

    let outer = internal!(e);
    assert_eq!(get_fields(&outer), fields);
    assert_eq!(
        outer.to_string(),
        "internal error Testing, empty = , kaid = 123, tags = [\"one\" \"two\"]\nWrapped by: internal error"
    );
}

#[test]
fn empty_error() {
    let e = internal!();
    assert_eq!(e.to_string(), "internal error");
    assert_eq!(get_fields(&e), fields! { "Kind" => "internal error" });
}

#[test]
fn wrapped_foreign_error() {
    let e = internal!(my_error("This is not OK"));
    assert_eq!(e.to_string(), "This is not OK\nWrapped by: internal error");
    assert_eq!(get_fields(&e)[MESSAGE_KEY], "This is not OK");

    // The cause is tagged with the kind first, then held by the error.
    let root = unwrap(unwrap(&e).unwrap()).unwrap();
    assert_eq!(root.downcast_ref::<MyError>(), Some(&MyError { msg: "This is not OK" }));
}

#[test]
fn new_with_fields() {
    let e = internal!("yikes", fields! { "a" => "b" });
    assert_eq!(get_fields(&e)[MESSAGE_KEY], "yikes");
    assert_eq!(get_kind(&e), Kind::Internal);
    assert_eq!(
        get_fields(&e),
        fields! { "Kind" => "internal error", "a" => "b", "Message" => "yikes" }
    );
}

#[test]
fn invalid_parameter() {
    let e = internal!("Message", 42);
    let fields = get_fields(&e);
    assert_eq!(
        fields["Invalid error arguments"],
        FieldValue::Strings(vec!["42".to_string()])
    );
    assert_eq!(fields[MESSAGE_KEY], "Invalid error constructor argument(s): Message");
    assert_eq!(get_kind(&e), Kind::Internal);
}

#[test]
fn kind_resolution() {
    let inner = io::Error::new(io::ErrorKind::Other, "more inner");
    assert_eq!(get_kind(&inner), Kind::Unspecified);

    let e = wrap(Some(inner), vec![fields! {}.into()]).unwrap();
    assert_eq!(get_kind(&e), Kind::Internal);

    let e = wrap(Some(Kind::Unauthorized), vec![]).unwrap();
    assert_eq!(get_kind(&e), Kind::Unauthorized);

    let e = wrap(Some(Kind::Internal), vec![]).unwrap();
    assert_eq!(get_kind(&e), Kind::Internal);

    assert_eq!(get_kind(&Kind::NotAllowed), Kind::NotAllowed);
}

#[test]
fn is_matching() {
    let e = unauthorized!();
    assert!(is(&e, &Kind::Unauthorized));
    assert!(!is(&e, &Kind::Internal));
    assert!(!is(&e, &Kind::NotFound));
    assert!(!is(&e, &MyError { msg: "sentinel" }));

    let e2 = internal!(e);
    assert!(is(&e2, &Kind::Internal));
    assert!(is(&e2, &Kind::Unauthorized));
    assert!(!is(&e2, &Kind::NotFound));
    assert!(!is(&e2, &MyError { msg: "sentinel" }));

    let e3 = MyError { msg: "sentinel" };
    assert!(!is(&e3, &Kind::Internal));
    assert!(!is(&e3, &Kind::Unauthorized));
    assert!(is(&e3, &MyError { msg: "sentinel" }));

    let e4 = not_found!(my_error("sentinel"));
    assert!(!is(&e4, &Kind::Internal));
    assert!(!is(&e4, &Kind::Unauthorized));
    assert!(is(&e4, &Kind::NotFound));
    assert!(is(&e4, &MyError { msg: "sentinel" }));
}

#[test]
fn constructors() {
    assert_eq!(get_kind(&not_found!()), Kind::NotFound);
    assert_eq!(get_kind(&invalid_input!()), Kind::InvalidInput);
    assert_eq!(get_kind(&not_allowed!()), Kind::NotAllowed);
    assert_eq!(get_kind(&unauthorized!()), Kind::Unauthorized);
    assert_eq!(get_kind(&internal!()), Kind::Internal);
    assert_eq!(get_kind(&not_implemented!()), Kind::NotImplemented);
    assert_eq!(get_kind(&graphql_response!()), Kind::GraphqlResponse);
    assert_eq!(get_kind(&transient_khan_service!()), Kind::TransientKhanService);
    assert_eq!(get_kind(&khan_service!()), Kind::KhanService);
    assert_eq!(get_kind(&service!()), Kind::Service);
    assert_eq!(get_kind(&transient_service!()), Kind::TransientService);
}

#[test]
fn constructor_functions_match_macros() {
    let e = khan_error::service(vec!["datastore down".into()]);
    assert_eq!(e.kind(), Kind::Service);
    assert_eq!(e.message(), "datastore down");
}

#[test]
fn find_foreign_error() {
    let e = internal!();
    assert!(khan_error::find::<MyError>(&e).is_none());

    let e2 = internal!(my_error(""));
    assert_eq!(khan_error::find::<MyError>(&e2), Some(&MyError { msg: "" }));
}

#[test]
fn wrap_keeps_kind_and_layers_fields() {
    let e = not_found!("Testing one two", fields! { "three" => "not yet" });
    assert_eq!(get_fields(&e)["three"], "not yet");

    let e2 = khan_error::wrap!(e, "three", 4);
    assert_eq!(get_kind(&e2), Kind::NotFound);
    assert_eq!(
        get_fields(&e2),
        fields! { "Kind" => "not found", "Message" => "Testing one two", "three" => 4 }
    );
    assert_eq!(
        e2.to_string(),
        "not found Testing one two, three = not yet\nWrapped by: not found, three = 4"
    );
}

#[test]
fn wrap_foreign_defaults_to_internal() {
    let e = khan_error::wrap!(my_error("sentinal"), "three", 4);
    assert_eq!(get_kind(&e), Kind::Internal);
    assert_eq!(
        get_fields(&e),
        fields! { "Kind" => "internal error", "Message" => "sentinal", "three" => 4 }
    );
    assert_eq!(e.to_string(), "sentinal\nWrapped by: internal error, three = 4");
}

#[test]
fn wrap_odd_number_of_args() {
    let e = not_found!("Testing one two", fields! { "three" => "not yet" });
    let e2 = khan_error::wrap!(e, "three", 4, "five");

    assert_eq!(get_kind(&e2), Kind::Internal);
    let fields = get_fields(&e2);
    assert_eq!(stringify_field(&fields["badargs"]), "[three 4 five]");
    assert_eq!(fields["three"], "not yet");
    assert!(khan_error::find::<Error>(unwrap(&e2).unwrap()).is_some());
    assert!(is(&e2, &Kind::NotFound));
}

#[test]
fn wrap_non_string_key() {
    let e = not_found!("Testing one two", fields! { "three" => "not yet" });
    let e2 = khan_error::wrap!(e, "three", 4, 5, 6);

    assert_eq!(get_kind(&e2), Kind::Internal);
    let fields = get_fields(&e2);
    assert_eq!(fields["key"], FieldValue::Int(5));
    assert_eq!(fields[MESSAGE_KEY], "Passed a non-string key-field to wrap()");
    assert!(is(&e2, &Kind::NotFound));
}

#[test]
fn wrap_nil() {
    assert!(wrap(None::<Error>, vec!["three".into(), 4.into()]).is_none());
}

#[test]
fn field_precedence_across_wrap() {
    let e = internal!("msg", fields! { "k" => "inner" });
    let e = khan_error::wrap!(e, "k", "outer");
    assert_eq!(get_fields(&e)["k"], "outer");
    assert_eq!(get_kind(&e), Kind::Internal);
}

#[test]
fn nested_kinds_resolve_nearest() {
    let foo = internal!(my_error("Something went wrong"), fields! { "internal" => "inside" });
    let bar = unauthorized!(foo, fields! { "bar" => true });
    let e = not_found!(bar, fields! { "found" => false });

    assert_eq!(get_kind(&e), Kind::NotFound);
    let fields = get_fields(&e);
    assert_eq!(fields["Kind"], "not found");
    assert_eq!(fields["internal"], "inside");
    assert_eq!(fields["bar"], FieldValue::Bool(true));
    assert_eq!(fields["found"], FieldValue::Bool(false));
    assert_eq!(fields[MESSAGE_KEY], "Something went wrong");
    assert!(is(&e, &Kind::Unauthorized));
    assert!(is(&e, &Kind::Internal));
}

#[test]
fn get_fields_is_idempotent() {
    let e = not_found!("x", fields! { "a" => 1 });
    assert_eq!(get_fields(&e), get_fields(&e));
    assert!(get_fields(&io::Error::new(io::ErrorKind::Other, "plain")).is_empty());
}

#[test]
fn is_khan_error_checks_outer_only() {
    let foreign = io::Error::new(io::ErrorKind::Other, "plain");
    assert!(!is_khan_error(&foreign));

    for e in [not_found!(), internal!(my_error("x")), service!("down")] {
        assert!(is_khan_error(&e));
    }
}

#[test]
fn stringify() {
    assert_eq!(stringify_field(&42.into()), "42");
    assert_eq!(stringify_field(&"a".into()), "a");
    assert_eq!(stringify_field(&FieldValue::List(vec![1.into(), 2.into()])), "[1 2]");
    assert_eq!(stringify_field(&vec!["a", "b"].into()), r#"["a" "b"]"#);
}
