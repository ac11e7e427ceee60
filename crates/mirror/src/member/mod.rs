//! Member model
//!
//! Read-only handles over raw platform records. Every handle carries the
//! [`Mirror`] it came from and a snapshot of its raw record; nothing is
//! cached beyond that, so each query re-reads the platform.
//!
//! Capabilities are split into small traits so filters and the invocation
//! pipeline can work over any member kind:
//!
//! | trait            | class | constructor | method | field | parameter |
//! |------------------|:-----:|:-----------:|:------:|:-----:|:---------:|
//! | [`Named`]        |   x   |      x      |   x    |   x   |     x     |
//! | [`Typed`]        |       |      x      |   x    |   x   |     x     |
//! | [`Modified`]     |   x   |      x      |   x    |   x   |           |
//! | [`Annotated`]    |   x   |      x      |   x    |   x   |     x     |
//! | [`Declared`]     |       |      x      |   x    |   x   |     x     |
//! | [`Accessible`]   |       |      x      |   x    |   x   |           |
//! | [`Parameterized`]|       |      x      |   x    |       |           |

mod class;
mod constructor;
mod field;
mod method;
mod parameter;

pub use class::{IncludeSelf, IncludeSuperclasses, MClass};
pub use constructor::MConstructor;
pub use field::MField;
pub use method::MMethod;
pub use parameter::MParameter;

use std::borrow::Cow;
use std::iter;
use std::slice;

use mirror_sdk::{Annotation, ClassId, MemberRef, Modifiers, ParameterInfo, PlatformError, Value};

use crate::error::{MirrorError, MirrorResult};
use crate::Mirror;

/// Anything produced by a [`Mirror`]
pub trait Reflected<'a> {
    /// The mirror this handle was produced by
    fn mirror(&self) -> Mirror<'a>;
}

/// Declared name
pub trait Named {
    /// Declared name; for constructors and classes the qualified class name
    fn name(&self) -> Cow<'_, str>;
}

/// Declared type
pub trait Typed {
    /// Field or parameter type, method return type, or the class a
    /// constructor produces
    fn declared_type(&self) -> ClassId;
}

/// Modifier flags
pub trait Modified {
    /// Raw modifiers
    fn modifiers(&self) -> Modifiers;

    /// Public visibility
    fn is_public(&self) -> bool {
        self.modifiers().is_public()
    }

    /// Protected visibility
    fn is_protected(&self) -> bool {
        self.modifiers().is_protected()
    }

    /// Private visibility
    fn is_private(&self) -> bool {
        self.modifiers().is_private()
    }

    /// None of public, protected or private
    fn is_package_private(&self) -> bool {
        self.modifiers().is_package_private()
    }

    /// Static member
    fn is_static(&self) -> bool {
        self.modifiers().is_static()
    }

    /// Final member or class
    fn is_final(&self) -> bool {
        self.modifiers().is_final()
    }

    /// Abstract member or class
    fn is_abstract(&self) -> bool {
        self.modifiers().is_abstract()
    }
}

/// Annotation queries. All are pure reads.
pub trait Annotated<'a>: Reflected<'a> {
    /// Declared annotations, in declaration order
    fn raw_annotations(&self) -> &[Annotation];

    /// Fresh iterator over the annotations
    fn annotations(&self) -> slice::Iter<'_, Annotation> {
        self.raw_annotations().iter()
    }

    /// Annotations accepted by `predicate`
    fn annotations_matching<P>(&self, predicate: P) -> iter::Filter<slice::Iter<'_, Annotation>, P>
    where
        P: FnMut(&&Annotation) -> bool,
    {
        self.raw_annotations().iter().filter(predicate)
    }

    /// First annotation accepted by `predicate`
    fn annotation<P>(&self, mut predicate: P) -> Option<&Annotation>
    where
        P: FnMut(&Annotation) -> bool,
    {
        self.raw_annotations().iter().find(|&a| predicate(a))
    }

    /// Whether any annotation is present
    fn is_annotated(&self) -> bool {
        !self.raw_annotations().is_empty()
    }

    /// Whether an annotation of exactly `ty` is present
    fn is_annotated_with(&self, ty: ClassId) -> bool {
        self.raw_annotations().iter().any(|a| a.ty == ty)
    }

    /// Whether an annotation of any of `types` is present
    fn is_annotated_with_any(&self, types: &[ClassId]) -> bool {
        types.iter().any(|&ty| self.is_annotated_with(ty))
    }

    /// First annotation whose type is `ty` or a subtype of it
    fn annotation_of_type(&self, ty: ClassId) -> Option<&Annotation> {
        let ctx = self.mirror().context();
        self.raw_annotations()
            .iter()
            .find(|a| ctx.is_assignable(ty, a.ty))
    }

    /// Number of annotations
    fn annotation_count(&self) -> usize {
        self.raw_annotations().len()
    }
}

/// Things declared inside a class
pub trait Declared<'a>: Reflected<'a> {
    /// ID of the declaring class
    fn declaring_class_id(&self) -> ClassId;

    /// Handle to the declaring class
    fn declaring_class(&self) -> MirrorResult<MClass<'a>> {
        let id = self.declaring_class_id();
        self.mirror()
            .class(id)
            .ok_or(MirrorError::Platform(PlatformError::UnknownClass(id)))
    }
}

/// A constructor, method or field
pub trait Member<'a>: Named + Modified + Annotated<'a> + Declared<'a> {
    /// Raw member handle
    fn member_ref(&self) -> MemberRef;
}

/// Accessibility gate.
///
/// Constructors and static members take no instance; passing one is
/// [`MirrorError::InvalidUsage`]. Instance members fall back to their
/// bound instance when none is passed.
pub trait Accessible<'a>: Member<'a> {
    /// Pretty signature used in diagnostics
    fn signature(&self) -> String;

    /// Whether the member never takes an instance
    fn is_static_context(&self) -> bool {
        self.is_static()
    }

    /// Instance bound to this handle, if any
    fn bound_instance(&self) -> Option<&Value> {
        None
    }

    /// Whether the member can be used right now without an override
    fn is_accessible(&self, instance: Option<&Value>) -> MirrorResult<bool> {
        let receiver = gate_receiver(self, instance)?;
        Ok(self
            .mirror()
            .context()
            .can_access(self.member_ref(), receiver))
    }

    /// Try to override visibility if the member is not accessible.
    ///
    /// A refused override is not an error; check [`is_accessible`]
    /// afterwards or use [`require_accessible`].
    ///
    /// [`is_accessible`]: Accessible::is_accessible
    /// [`require_accessible`]: Accessible::require_accessible
    fn make_accessible(&self, instance: Option<&Value>) -> MirrorResult<&Self> {
        if !self.is_accessible(instance)? {
            let member = self.member_ref();
            if self.mirror().context().set_accessible(member) {
                tracing::debug!(?member, "accessibility override granted");
            } else {
                tracing::warn!(?member, "accessibility override denied");
            }
        }
        Ok(self)
    }

    /// Make the member accessible or fail with [`MirrorError::Inaccessible`]
    fn require_accessible(&self, instance: Option<&Value>) -> MirrorResult<&Self> {
        self.require_accessible_or(instance, || self.inaccessible_error())
    }

    /// Make the member accessible or fail with `error()`
    fn require_accessible_or<F>(&self, instance: Option<&Value>, error: F) -> MirrorResult<&Self>
    where
        F: FnOnce() -> MirrorError,
    {
        self.make_accessible(instance)?.check_accessible_or(instance, error)
    }

    /// Fail with `error()` if the member is not accessible right now. No
    /// override is attempted.
    fn check_accessible_or<F>(&self, instance: Option<&Value>, error: F) -> MirrorResult<&Self>
    where
        F: FnOnce() -> MirrorError,
    {
        if self.is_accessible(instance)? {
            Ok(self)
        } else {
            Err(error())
        }
    }

    /// Run `action` on the member if it is accessible right now
    fn if_accessible<F>(&self, instance: Option<&Value>, action: F) -> MirrorResult<&Self>
    where
        F: FnOnce(&Self),
    {
        if self.is_accessible(instance)? {
            action(self);
        }
        Ok(self)
    }

    /// Run `action` on the member if it is not accessible right now
    fn if_not_accessible<F>(&self, instance: Option<&Value>, action: F) -> MirrorResult<&Self>
    where
        F: FnOnce(&Self),
    {
        if !self.is_accessible(instance)? {
            action(self);
        }
        Ok(self)
    }

    /// The default error for an inaccessible member
    fn inaccessible_error(&self) -> MirrorError {
        MirrorError::Inaccessible {
            signature: self.signature(),
            class: self.mirror().class_name(self.declaring_class_id()),
        }
    }
}

/// Parameter queries for constructors and methods
pub trait Parameterized<'a>: Member<'a> {
    /// Raw parameter records, in order
    fn raw_parameters(&self) -> &[ParameterInfo];

    /// Fresh iterator over parameter handles
    fn parameters(&self) -> impl Iterator<Item = MParameter<'a>> {
        let mirror = self.mirror();
        let owner = self.member_ref();
        self.raw_parameters()
            .iter()
            .map(move |info| MParameter::from_raw(mirror, owner, info.clone()))
    }

    /// Parameters accepted by `predicate`
    fn parameters_matching<P>(&self, predicate: P) -> impl Iterator<Item = MParameter<'a>>
    where
        P: FnMut(&MParameter<'a>) -> bool,
    {
        self.parameters().filter(predicate)
    }

    /// First parameter accepted by `predicate`
    fn parameter<P>(&self, predicate: P) -> Option<MParameter<'a>>
    where
        P: FnMut(&MParameter<'a>) -> bool,
    {
        self.parameters_matching(predicate).next()
    }

    /// Parameters declared exactly `ty`
    fn parameters_of_type(&self, ty: ClassId) -> impl Iterator<Item = MParameter<'a>> {
        self.parameters().filter(move |p| p.declared_type() == ty)
    }

    /// First parameter declared exactly `ty`
    fn parameter_of_type(&self, ty: ClassId) -> Option<MParameter<'a>> {
        self.parameters_of_type(ty).next()
    }

    /// Parameters annotated with any of `types`
    fn parameters_with_annotations(&self, types: &[ClassId]) -> Vec<MParameter<'a>> {
        self.parameters()
            .filter(|p| p.is_annotated_with_any(types))
            .collect()
    }

    /// First parameter annotated with any of `types`
    fn parameter_with_annotations(&self, types: &[ClassId]) -> Option<MParameter<'a>> {
        self.parameters().find(|p| p.is_annotated_with_any(types))
    }

    /// Whether there is at least one parameter
    fn has_parameters(&self) -> bool {
        !self.raw_parameters().is_empty()
    }

    /// Number of parameters
    fn parameter_count(&self) -> usize {
        self.raw_parameters().len()
    }

    /// Declared parameter types, in order
    fn parameter_types(&self) -> Vec<ClassId> {
        self.raw_parameters().iter().map(|p| p.ty).collect()
    }

    /// Whether the argument matcher accepts `args`
    fn invokable_with(&self, args: &[Value]) -> bool {
        let mirror = self.mirror();
        mirror
            .argument_matcher()
            .matches(mirror.context(), &self.parameter_types(), args)
    }
}

/// Resolve the receiver an accessibility check runs against
pub(crate) fn gate_receiver<'a, 'v, H>(
    handle: &'v H,
    instance: Option<&'v Value>,
) -> MirrorResult<Option<&'v Value>>
where
    H: Accessible<'a> + ?Sized,
{
    let explicit = instance.filter(|value| !value.is_null());
    if handle.is_static_context() {
        return match explicit {
            Some(_) => Err(MirrorError::InvalidUsage(format!(
                "'{}' does not take an instance",
                handle.signature()
            ))),
            None => Ok(None),
        };
    }

    let receiver = explicit.or_else(|| handle.bound_instance());
    if let Some(value) = receiver {
        let ctx = handle.mirror().context();
        let class = handle.declaring_class_id();
        let fits = ctx
            .type_of(value)
            .is_some_and(|ty| ctx.is_assignable(class, ty));
        if !fits {
            return Err(MirrorError::InvalidUsage(format!(
                "{} is not an instance of {}",
                value,
                handle.mirror().class_name(class)
            )));
        }
    }
    Ok(receiver)
}
