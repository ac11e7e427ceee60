//! Shared fixtures for the mirror integration tests
//!
//! - `MockAnnotation`: a marker annotation
//! - `MockClass`: constructors `()`, `(int)`, `@MockAnnotation (String)` and
//!   `(int, String)`, plus a handful of methods and fields
//! - `MockUser`: private `(String username, String email)` constructor and
//!   private fields
//! - `MockUserSubClass`: public subclass of `MockUser`

#![allow(dead_code)]

use mirror_runtime::{
    core_class_ids::*, ClassBuilder, ConstructorDef, FieldDef, MethodDef, Param, Runtime,
};
use mirror_sdk::{Annotation, ClassId, Modifiers, PlatformError, PlatformResult, Value};

pub struct Fixtures {
    pub runtime: Runtime,
    pub mock_annotation: ClassId,
    pub mock_class: ClassId,
    pub mock_user: ClassId,
    pub mock_user_sub: ClassId,
}

const PUBLIC: Modifiers = Modifiers::PUBLIC;
const PRIVATE: Modifiers = Modifiers::PRIVATE;

fn receiver(this: Option<&Value>) -> PlatformResult<&Value> {
    this.ok_or_else(|| PlatformError::IllegalArgument("missing receiver".to_string()))
}

fn define_mock_class(runtime: &Runtime, mock_annotation: ClassId) -> ClassId {
    runtime
        .define(
            ClassBuilder::class("fixtures.MockClass")
                .field(FieldDef::new("value", INT, PRIVATE))
                .field(FieldDef::new("label", STRING, PUBLIC))
                .field(FieldDef::new("count", INTEGER, PUBLIC))
                .field(FieldDef::new("DEFAULT_LABEL", STRING, PUBLIC | Modifiers::STATIC).initial("none"))
                .constructor(ConstructorDef::new(PUBLIC))
                .constructor(
                    ConstructorDef::new(PUBLIC)
                        .param(Param::new("value", INT))
                        .body(|rt, this, args| rt.write_field(this, "value", args[0].clone())),
                )
                .constructor(
                    ConstructorDef::new(PUBLIC)
                        .param(Param::new("label", STRING))
                        .annotate(Annotation::marker(mock_annotation))
                        .body(|rt, this, args| rt.write_field(this, "label", args[0].clone())),
                )
                .constructor(
                    ConstructorDef::new(PUBLIC)
                        .param(Param::new("value", INT))
                        .param(Param::new("label", STRING))
                        .body(|rt, this, args| {
                            rt.write_field(this, "value", args[0].clone())?;
                            rt.write_field(this, "label", args[1].clone())
                        }),
                )
                .method(
                    MethodDef::new("getValue", INT, PUBLIC)
                        .body(|rt, this, _| rt.read_field(receiver(this)?, "value")),
                )
                .method(
                    MethodDef::new("describe", STRING, PUBLIC)
                        .param(Param::new("prefix", STRING))
                        .annotate(Annotation::marker(mock_annotation))
                        .body(|rt, this, args| {
                            let label = rt.read_field(receiver(this)?, "label")?;
                            Ok(Value::from(format!("{}{}", args[0], label)))
                        }),
                )
                .method(
                    MethodDef::new("total", INTEGER, PUBLIC)
                        .body(|rt, this, _| rt.read_field(receiver(this)?, "count")),
                )
                .method(
                    MethodDef::new("accept", BOOLEAN, PUBLIC)
                        .param(Param::new("number", NUMBER))
                        .body(|_, _, _| Ok(Value::from(true))),
                )
                .method(
                    MethodDef::new("sum", INT, PUBLIC | Modifiers::STATIC)
                        .param(Param::new("a", INT))
                        .param(Param::new("b", INT))
                        .body(|_, _, args| {
                            let a = args[0].as_i32().unwrap_or_default();
                            let b = args[1].as_i32().unwrap_or_default();
                            Ok(Value::from(a + b))
                        }),
                )
                .method(MethodDef::new("explode", VOID, PUBLIC).body(|_, _, _| {
                    Err(PlatformError::thrown("lang.IllegalStateException", "exploded"))
                })),
        )
        .unwrap()
}

fn define_mock_user(runtime: &Runtime) -> ClassId {
    runtime
        .define(
            ClassBuilder::class("fixtures.MockUser")
                .field(FieldDef::new("username", STRING, PRIVATE))
                .field(FieldDef::new("email", STRING, PRIVATE))
                .constructor(
                    ConstructorDef::new(PRIVATE)
                        .param(Param::new("username", STRING))
                        .param(Param::new("email", STRING))
                        .body(|rt, this, args| {
                            rt.write_field(this, "username", args[0].clone())?;
                            rt.write_field(this, "email", args[1].clone())
                        }),
                )
                .method(
                    MethodDef::new("getUsername", STRING, PUBLIC)
                        .body(|rt, this, _| rt.read_field(receiver(this)?, "username")),
                ),
        )
        .unwrap()
}

fn define_mock_user_sub(runtime: &Runtime, mock_user: ClassId) -> ClassId {
    runtime
        .define(
            ClassBuilder::class("fixtures.MockUserSubClass")
                .extends(mock_user)
                .field(FieldDef::new("nickname", STRING, PRIVATE))
                .constructor(
                    ConstructorDef::new(PUBLIC)
                        .param(Param::new("username", STRING))
                        .param(Param::new("email", STRING))
                        .body(|rt, this, args| {
                            rt.write_field(this, "username", args[0].clone())?;
                            rt.write_field(this, "email", args[1].clone())
                        }),
                )
                .method(
                    MethodDef::new("greet", STRING, PUBLIC)
                        .param(Param::new("other", mock_user))
                        .body(|rt, _, args| {
                            let name = rt.read_field(&args[0], "username")?;
                            Ok(Value::from(format!("hello {}", name)))
                        }),
                ),
        )
        .unwrap()
}

pub fn fixtures() -> Fixtures {
    let runtime = Runtime::new();
    let mock_annotation = runtime
        .define(ClassBuilder::annotation("fixtures.MockAnnotation"))
        .unwrap();
    let mock_class = define_mock_class(&runtime, mock_annotation);
    let mock_user = define_mock_user(&runtime);
    let mock_user_sub = define_mock_user_sub(&runtime, mock_user);

    Fixtures {
        runtime,
        mock_annotation,
        mock_class,
        mock_user,
        mock_user_sub,
    }
}
