//! Integration tests for the in-memory platform
//!
//! Tests cover:
//! - Interfaces and annotation types in assignability
//! - Shadowed fields in class hierarchies
//! - Static fields and final field writes
//! - Receiver checks on instance members
//! - Releasing objects

use mirror_runtime::{core_class_ids::*, ClassBuilder, ConstructorDef, FieldDef, MethodDef, Runtime};
use mirror_sdk::{ClassKind, MemberRef, Modifiers, PlatformError, ReflectContext, Value};

#[test]
fn test_interfaces_and_annotations() {
    let runtime = Runtime::new();
    let named = runtime.define(ClassBuilder::interface("app.Named")).unwrap();
    let marker = runtime.define(ClassBuilder::annotation("app.Marker")).unwrap();
    let person = runtime
        .define(ClassBuilder::class("app.Person").implements(named))
        .unwrap();

    assert!(runtime.is_assignable(named, person));
    assert!(runtime.is_assignable(OBJECT, person));
    assert!(!runtime.is_assignable(person, named));
    assert!(runtime.is_assignable(ANNOTATION, marker));

    let info = runtime.class_info(marker).unwrap();
    assert_eq!(info.kind, ClassKind::Annotation);
    assert_eq!(info.superclass, None);
    assert_eq!(runtime.class_info(person).unwrap().superclass, Some(OBJECT));
}

#[test]
fn test_shadowed_fields_are_separate_slots() {
    let runtime = Runtime::new();
    let base = runtime
        .define(
            ClassBuilder::class("app.Base")
                .field(FieldDef::new("id", INT, Modifiers::PUBLIC).initial(1)),
        )
        .unwrap();
    let derived = runtime
        .define(
            ClassBuilder::class("app.Derived")
                .extends(base)
                .field(FieldDef::new("id", STRING, Modifiers::PUBLIC).initial("d"))
                .constructor(ConstructorDef::new(Modifiers::PUBLIC)),
        )
        .unwrap();

    let ctor = runtime.declared_constructors(derived)[0].id;
    let obj = runtime.new_instance(ctor, &[]).unwrap();
    let base_id = runtime.declared_fields(base)[0].id;
    let derived_id = runtime.declared_fields(derived)[0].id;

    assert_eq!(runtime.get_field(base_id, Some(&obj)).unwrap(), Value::from(1));
    assert_eq!(runtime.get_field(derived_id, Some(&obj)).unwrap(), Value::from("d"));
    assert_eq!(runtime.read_field(&obj, "id").unwrap(), Value::from("d"));
}

#[test]
fn test_static_and_final_fields() {
    let runtime = Runtime::new();
    let class = runtime
        .define(
            ClassBuilder::class("app.Config")
                .field(FieldDef::new("LIMIT", INT, Modifiers::PUBLIC | Modifiers::STATIC).initial(10))
                .field(
                    FieldDef::new("NAME", STRING, Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL)
                        .initial("cfg"),
                )
                .field(FieldDef::new("id", INT, Modifiers::PUBLIC | Modifiers::FINAL))
                .constructor(ConstructorDef::new(Modifiers::PUBLIC)),
        )
        .unwrap();
    let fields = runtime.declared_fields(class);
    let (limit, name, id) = (fields[0].id, fields[1].id, fields[2].id);

    runtime.set_field(limit, None, Value::from(20)).unwrap();
    assert_eq!(runtime.get_field(limit, None).unwrap(), Value::from(20));
    assert!(matches!(
        runtime.set_field(name, None, Value::from("x")),
        Err(PlatformError::IllegalAccess(_))
    ));

    let ctor = runtime.declared_constructors(class)[0].id;
    let obj = runtime.new_instance(ctor, &[]).unwrap();
    assert!(matches!(
        runtime.set_field(id, Some(&obj), Value::from(5)),
        Err(PlatformError::IllegalAccess(_))
    ));
    assert!(runtime.set_accessible(MemberRef::Field(id)));
    runtime.set_field(id, Some(&obj), Value::from(5)).unwrap();
    assert_eq!(runtime.get_field(id, Some(&obj)).unwrap(), Value::from(5));
}

#[test]
fn test_receiver_checks() {
    let runtime = Runtime::new();
    let class = runtime
        .define(
            ClassBuilder::class("app.Clock")
                .method(MethodDef::new("tick", INT, Modifiers::PUBLIC).body(|_, _, _| Ok(Value::from(1)))),
        )
        .unwrap();
    let tick = runtime.declared_methods(class)[0].id;

    assert!(matches!(
        runtime.invoke(tick, None, &[]),
        Err(PlatformError::IllegalArgument(_))
    ));
    assert!(matches!(
        runtime.invoke(tick, Some(&Value::from("not a clock")), &[]),
        Err(PlatformError::IllegalArgument(_))
    ));
    assert!(!runtime.can_access(MemberRef::Method(tick), Some(&Value::from("not a clock"))));
    assert_eq!(runtime.object_count(), 0);
}

#[test]
fn test_released_objects_leave_the_heap() {
    let runtime = Runtime::new();
    let class = runtime
        .define(
            ClassBuilder::class("app.Token")
                .field(FieldDef::new("id", INT, Modifiers::PUBLIC).initial(7))
                .constructor(ConstructorDef::new(Modifiers::PUBLIC)),
        )
        .unwrap();
    let ctor = runtime.declared_constructors(class)[0].id;
    let id = runtime.declared_fields(class)[0].id;

    let tokens: Vec<Value> = (0..100)
        .map(|_| runtime.new_instance(ctor, &[]).unwrap())
        .collect();
    assert_eq!(runtime.object_count(), 100);

    let kept = tokens[0].clone();
    for token in &tokens[1..] {
        assert!(runtime.release(token));
    }
    assert_eq!(runtime.object_count(), 1);
    assert_eq!(runtime.get_field(id, Some(&kept)).unwrap(), Value::from(7));

    assert!(!runtime.release(&tokens[1]));
    assert!(matches!(
        runtime.get_field(id, Some(&tokens[1])),
        Err(PlatformError::UnknownMember(_))
    ));
    assert!(!runtime.release(&Value::from("not an object")));
    assert!(!runtime.release(&Value::Null));
}
