//! Method handles

use std::borrow::Cow;
use std::fmt;

use mirror_sdk::{
    Annotation, ClassId, MemberRef, MethodId, MethodInfo, Modifiers, ParameterInfo, Value,
};

use super::{
    Accessible, Annotated, Declared, MClass, Member, Modified, Named, Parameterized, Reflected,
    Typed,
};
use crate::error::MirrorResult;
use crate::{format, invoke, Mirror};

/// Handle to a method, optionally bound to a receiver
#[derive(Clone)]
pub struct MMethod<'a> {
    mirror: Mirror<'a>,
    info: MethodInfo,
    bound: Option<Value>,
}

impl fmt::Debug for MMethod<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MMethod")
            .field("signature", &self.signature())
            .field("bound", &self.bound)
            .finish()
    }
}

impl<'a> MMethod<'a> {
    pub(crate) fn from_raw(mirror: Mirror<'a>, info: MethodInfo) -> Self {
        Self {
            mirror,
            info,
            bound: None,
        }
    }

    /// Raw method handle
    pub fn id(&self) -> MethodId {
        self.info.id
    }

    /// Raw method record
    pub fn raw(&self) -> &MethodInfo {
        &self.info
    }

    /// A copy of this handle bound to `instance`
    pub fn bind(&self, instance: impl Into<Value>) -> Self {
        Self {
            bound: Some(instance.into()),
            ..self.clone()
        }
    }

    /// The bound receiver
    pub fn bound(&self) -> Option<&Value> {
        self.bound.as_ref()
    }

    /// Declared return type
    pub fn return_type(&self) -> ClassId {
        self.info.return_type
    }

    /// Handle to the declared return type
    pub fn return_class(&self) -> Option<MClass<'a>> {
        self.mirror.class(self.info.return_type)
    }

    /// Invoke against the bound receiver (none for static methods)
    pub fn invoke(&self, args: &[Value]) -> MirrorResult<Value> {
        self.invoke_with_instance(None, args)
    }

    /// Invoke against `instance`, falling back to the bound receiver
    pub fn invoke_with_instance(&self, instance: Option<&Value>, args: &[Value]) -> MirrorResult<Value> {
        let id = self.info.id;
        invoke::invoke(self, instance, args, |ctx, receiver| {
            ctx.invoke(id, receiver, args)
        })
    }

    /// Invoke without any receiver
    pub fn invoke_static(&self, args: &[Value]) -> MirrorResult<Value> {
        let unbound = Self {
            bound: None,
            ..self.clone()
        };
        unbound.invoke_with_instance(None, args)
    }
}

impl<'a> Reflected<'a> for MMethod<'a> {
    fn mirror(&self) -> Mirror<'a> {
        self.mirror
    }
}

impl Named for MMethod<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.info.name)
    }
}

impl Typed for MMethod<'_> {
    fn declared_type(&self) -> ClassId {
        self.info.return_type
    }
}

impl Modified for MMethod<'_> {
    fn modifiers(&self) -> Modifiers {
        self.info.modifiers
    }
}

impl<'a> Annotated<'a> for MMethod<'a> {
    fn raw_annotations(&self) -> &[Annotation] {
        &self.info.annotations
    }
}

impl<'a> Declared<'a> for MMethod<'a> {
    fn declaring_class_id(&self) -> ClassId {
        self.info.id.class
    }
}

impl<'a> Member<'a> for MMethod<'a> {
    fn member_ref(&self) -> MemberRef {
        MemberRef::Method(self.info.id)
    }
}

impl<'a> Accessible<'a> for MMethod<'a> {
    fn signature(&self) -> String {
        format::method_signature(self.mirror.context(), &self.info)
    }

    fn bound_instance(&self) -> Option<&Value> {
        self.bound.as_ref()
    }
}

impl<'a> Parameterized<'a> for MMethod<'a> {
    fn raw_parameters(&self) -> &[ParameterInfo] {
        &self.info.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MirrorError;
    use mirror_runtime::{core_class_ids::*, ClassBuilder, ConstructorDef, MethodDef, Param, Runtime};
    use mirror_sdk::PlatformError;

    fn define_counter(rt: &Runtime) -> ClassId {
        rt.define(
            ClassBuilder::class("app.Counter")
                .constructor(ConstructorDef::new(Modifiers::PUBLIC))
                .method(
                    MethodDef::new("echo", STRING, Modifiers::PUBLIC)
                        .param(Param::new("text", STRING))
                        .body(|_, _, args| Ok(args[0].clone())),
                )
                .method(
                    MethodDef::new("twice", INT, Modifiers::PUBLIC | Modifiers::STATIC)
                        .param(Param::new("n", INT))
                        .body(|_, _, args| Ok(Value::from(args[0].as_i32().unwrap_or(0) * 2))),
                )
                .method(
                    MethodDef::new("fail", VOID, Modifiers::PUBLIC).body(|_, _, _| {
                        Err(PlatformError::thrown("lang.IllegalStateException", "broken"))
                    }),
                ),
        )
        .unwrap()
    }

    #[test]
    fn test_bound_invocation() {
        let rt = Runtime::new();
        let class = Mirror::new(&rt).class(define_counter(&rt)).unwrap();
        let obj = class.constructor().unwrap().new_instance(&[]).unwrap();
        let echo = class.method_named("echo").unwrap();

        assert!(echo.bound().is_none());
        let bound = echo.bind(obj.clone());
        assert_eq!(bound.bound(), Some(&obj));
        assert!(echo.bound().is_none());

        assert_eq!(bound.invoke(&[Value::from("hi")]).unwrap(), Value::from("hi"));
        assert_eq!(
            echo.invoke_with_instance(Some(&obj), &[Value::from("yo")]).unwrap(),
            Value::from("yo")
        );
    }

    #[test]
    fn test_missing_instance() {
        let rt = Runtime::new();
        let class = Mirror::new(&rt).class(define_counter(&rt)).unwrap();
        let echo = class.method_named("echo").unwrap();

        assert!(matches!(
            echo.invoke(&[Value::from("hi")]),
            Err(MirrorError::Invocation { cause: None, .. })
        ));
    }

    #[test]
    fn test_static_invocation() {
        let rt = Runtime::new();
        let class = Mirror::new(&rt).class(define_counter(&rt)).unwrap();
        let obj = class.constructor().unwrap().new_instance(&[]).unwrap();
        let twice = class.method_named("twice").unwrap();

        assert!(twice.is_static());
        assert_eq!(twice.invoke_static(&[Value::from(21)]).unwrap(), Value::from(42));
        assert_eq!(
            twice.bind(obj.clone()).invoke_static(&[Value::from(2)]).unwrap(),
            Value::from(4)
        );
        assert!(matches!(
            twice.invoke_with_instance(Some(&obj), &[Value::from(1)]),
            Err(MirrorError::Invocation { cause: None, .. })
        ));
    }

    #[test]
    fn test_mismatch_reports_signature() {
        let rt = Runtime::new();
        let class = Mirror::new(&rt).class(define_counter(&rt)).unwrap();
        let twice = class.method_named("twice").unwrap();

        match twice.invoke_static(&[Value::from("x")]) {
            Err(MirrorError::MismatchedArguments {
                signature,
                class,
                expected,
                provided,
            }) => {
                assert_eq!(signature, "twice(int)");
                assert_eq!(class, "app.Counter");
                assert_eq!(expected, vec!["int"]);
                assert_eq!(provided, vec!["\"x\""]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_thrown_failure_is_the_cause() {
        let rt = Runtime::new();
        let class = Mirror::new(&rt).class(define_counter(&rt)).unwrap();
        let obj = class.constructor().unwrap().new_instance(&[]).unwrap();
        let fail = class.method_named("fail").unwrap().bind(obj);

        let err = fail.invoke(&[]).unwrap_err();
        assert_eq!(
            err.cause(),
            Some(&PlatformError::thrown("lang.IllegalStateException", "broken"))
        );
        assert_eq!(fail.return_type(), VOID);
        assert_eq!(fail.return_class().unwrap().name(), "void");
    }
}
