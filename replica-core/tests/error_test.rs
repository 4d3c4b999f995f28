// replica-core - Error propagation tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod common;

use common::*;

#[test]
fn test_unspecified_handle_fails_whole_copy() {
    let socket = Value::Foreign(ForeignRef::unspecified("Socket", 8080u16));
    let source = Value::list(TypeTag::Any, vec![Value::int(1), socket]);

    let err = copy(&source).unwrap_err();
    assert_eq!(
        err,
        Error::UnclassifiableShape {
            type_name: "Socket".into(),
            reason: "foreign handle is not declared shareable".into(),
        }
    );
}

#[test]
fn test_nested_member_error_propagates() {
    let secret = Shape::class("Secret")
        .set_only("Key", TypeTag::String)
        .build();
    let holder = Shape::class("Holder")
        .field("Inner", TypeTag::named("Secret"))
        .build();
    let source = Value::object(
        Record::zeroed(holder).with("Inner", Value::object(Record::zeroed(secret))),
    );

    assert_eq!(
        copy(&source),
        Err(Error::UnreadableMember {
            shape: "Secret".into(),
            member: "Key".into(),
        })
    );

    let lenient = CopyOptions::new().with_member_policy(MemberPolicy::SkipInaccessible);
    let clone = copy_with(&source, &lenient).unwrap();
    assert!(clone.field("Inner").is_some());
}

#[test]
fn test_mismatched_record_container() {
    let source = Value::object(Record::zeroed(Shape::value_record("Point").build()));
    assert!(matches!(
        copy(&source),
        Err(Error::UnclassifiableShape { type_name, .. }) if type_name == "Point"
    ));
}

#[test]
fn test_depth_exceeded_on_cycle_free_chain() {
    let mut value = Value::nil();
    for _ in 0..10 {
        value = Value::tuple(vec![value]);
    }
    let options = CopyOptions::new().with_max_depth(5);
    assert_eq!(
        copy_with(&value, &options),
        Err(Error::DepthExceeded { limit: 5 })
    );
}

#[test]
fn test_depth_limit_allows_cycles() {
    let source = Value::list(TypeTag::Any, vec![]);
    push(&source, source.clone());
    let options = CopyOptions::new().with_max_depth(2);
    assert!(copy_with(&source, &options).is_ok());
}

#[test]
fn test_error_messages() {
    let err = Error::UnconstructibleShape {
        shape: "Registry".into(),
    };
    assert_eq!(err.to_string(), "Cannot construct an instance of Registry");
}
