//! Fluent class definitions
//!
//! A [`ClassBuilder`] collects a class's shape (supertypes, modifiers,
//! annotations) and its members, each with a Rust closure as its body.
//! [`Runtime::define`](crate::Runtime::define) turns it into a registered
//! class.

use std::sync::Arc;

use mirror_sdk::{Annotation, ClassId, ClassKind, Modifiers, PlatformResult, Value};

use crate::Runtime;

/// Constructor body: receives the freshly allocated instance and the arguments
pub type ConstructorBody = Arc<dyn Fn(&Runtime, &Value, &[Value]) -> PlatformResult<()> + Send + Sync>;

/// Method body: receives the receiver (None when static) and the arguments
pub type MethodBody =
    Arc<dyn Fn(&Runtime, Option<&Value>, &[Value]) -> PlatformResult<Value> + Send + Sync>;

fn empty_constructor(_: &Runtime, _: &Value, _: &[Value]) -> PlatformResult<()> {
    Ok(())
}

fn null_method(_: &Runtime, _: Option<&Value>, _: &[Value]) -> PlatformResult<Value> {
    Ok(Value::Null)
}

/// Parameter declaration
#[derive(Debug, Clone)]
pub struct Param {
    pub(crate) name: String,
    pub(crate) ty: ClassId,
    pub(crate) annotations: Vec<Annotation>,
}

impl Param {
    /// Declare a parameter
    pub fn new(name: &str, ty: ClassId) -> Self {
        Self {
            name: name.to_string(),
            ty,
            annotations: Vec::new(),
        }
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Constructor declaration
pub struct ConstructorDef {
    pub(crate) modifiers: Modifiers,
    pub(crate) params: Vec<Param>,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) body: ConstructorBody,
}

impl ConstructorDef {
    /// Declare a constructor with an empty body
    pub fn new(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            params: Vec::new(),
            annotations: Vec::new(),
            body: Arc::new(empty_constructor),
        }
    }

    /// Append a parameter
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Set the body
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&Runtime, &Value, &[Value]) -> PlatformResult<()> + Send + Sync + 'static,
    {
        self.body = Arc::new(body);
        self
    }
}

/// Method declaration
pub struct MethodDef {
    pub(crate) name: String,
    pub(crate) modifiers: Modifiers,
    pub(crate) params: Vec<Param>,
    pub(crate) return_type: ClassId,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) body: MethodBody,
}

impl MethodDef {
    /// Declare a method whose body returns null
    pub fn new(name: &str, return_type: ClassId, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            modifiers,
            params: Vec::new(),
            return_type,
            annotations: Vec::new(),
            body: Arc::new(null_method),
        }
    }

    /// Append a parameter
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Set the body
    pub fn body<F>(mut self, body: F) -> Self
    where
        F: Fn(&Runtime, Option<&Value>, &[Value]) -> PlatformResult<Value> + Send + Sync + 'static,
    {
        self.body = Arc::new(body);
        self
    }
}

/// Field declaration
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub(crate) name: String,
    pub(crate) ty: ClassId,
    pub(crate) modifiers: Modifiers,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) initial: Option<Value>,
}

impl FieldDef {
    /// Declare a field
    pub fn new(name: &str, ty: ClassId, modifiers: Modifiers) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers,
            annotations: Vec::new(),
            initial: None,
        }
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Initial value (defaults to the zero value of the field type)
    pub fn initial(mut self, value: impl Into<Value>) -> Self {
        self.initial = Some(value.into());
        self
    }
}

/// Class declaration
pub struct ClassBuilder {
    pub(crate) name: String,
    pub(crate) kind: ClassKind,
    pub(crate) superclass: Option<ClassId>,
    pub(crate) interfaces: Vec<ClassId>,
    pub(crate) modifiers: Modifiers,
    pub(crate) annotations: Vec<Annotation>,
    pub(crate) constructors: Vec<ConstructorDef>,
    pub(crate) methods: Vec<MethodDef>,
    pub(crate) fields: Vec<FieldDef>,
}

impl ClassBuilder {
    fn with_kind(name: &str, kind: ClassKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            superclass: None,
            interfaces: Vec::new(),
            modifiers: Modifiers::PUBLIC,
            annotations: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Declare a public class (extends `lang.Object` unless told otherwise)
    pub fn class(name: &str) -> Self {
        Self::with_kind(name, ClassKind::Class)
    }

    /// Declare a public interface
    pub fn interface(name: &str) -> Self {
        let mut builder = Self::with_kind(name, ClassKind::Interface);
        builder.modifiers = Modifiers::PUBLIC | Modifiers::ABSTRACT;
        builder
    }

    /// Declare a public annotation type
    pub fn annotation(name: &str) -> Self {
        let mut builder = Self::with_kind(name, ClassKind::Annotation);
        builder.modifiers = Modifiers::PUBLIC | Modifiers::ABSTRACT;
        builder
    }

    pub(crate) fn primitive(name: &str) -> Self {
        let mut builder = Self::with_kind(name, ClassKind::Primitive);
        builder.modifiers = Modifiers::PUBLIC | Modifiers::FINAL | Modifiers::ABSTRACT;
        builder
    }

    /// Set the superclass
    pub fn extends(mut self, superclass: ClassId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Add an implemented interface
    pub fn implements(mut self, interface: ClassId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Replace the class modifiers
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach an annotation
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Add a constructor
    pub fn constructor(mut self, constructor: ConstructorDef) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Add a method
    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a field
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}
