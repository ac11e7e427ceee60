//! Field handles

use std::borrow::Cow;
use std::fmt;
use std::slice;

use mirror_sdk::{Annotation, ClassId, FieldId, FieldInfo, MemberRef, Modifiers, Value};

use super::{Accessible, Annotated, Declared, MClass, Member, Modified, Named, Reflected, Typed};
use crate::error::MirrorResult;
use crate::{invoke, Mirror};

/// Handle to a field, optionally bound to a receiver.
///
/// Reads and writes pass the same accessibility and receiver checks as
/// method calls. Writes are also checked by the argument matcher.
#[derive(Clone)]
pub struct MField<'a> {
    mirror: Mirror<'a>,
    info: FieldInfo,
    bound: Option<Value>,
}

impl fmt::Debug for MField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MField")
            .field("name", &self.info.name)
            .field("bound", &self.bound)
            .finish()
    }
}

impl<'a> MField<'a> {
    pub(crate) fn from_raw(mirror: Mirror<'a>, info: FieldInfo) -> Self {
        Self {
            mirror,
            info,
            bound: None,
        }
    }

    /// Raw field handle
    pub fn id(&self) -> FieldId {
        self.info.id
    }

    /// Raw field record
    pub fn raw(&self) -> &FieldInfo {
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

    /// Declared type
    pub fn field_type(&self) -> ClassId {
        self.info.ty
    }

    /// Handle to the declared type
    pub fn field_class(&self) -> Option<MClass<'a>> {
        self.mirror.class(self.info.ty)
    }

    /// Read from the bound receiver (none for static fields)
    pub fn value(&self) -> MirrorResult<Value> {
        self.get_value(None)
    }

    /// Read from `instance`, falling back to the bound receiver
    #[tracing::instrument(level = "debug", skip_all, fields(field = %self.info.name))]
    pub fn get_value(&self, instance: Option<&Value>) -> MirrorResult<Value> {
        let receiver = invoke::resolve_receiver(self, instance)?;
        self.mirror
            .context()
            .get_field(self.info.id, receiver)
            .map_err(|cause| invoke::platform_failure(self, cause))
    }

    /// Write to `instance`, falling back to the bound receiver
    #[tracing::instrument(level = "debug", skip_all, fields(field = %self.info.name))]
    pub fn set_value(&self, instance: Option<&Value>, value: impl Into<Value>) -> MirrorResult<()> {
        let value = value.into();
        let receiver = invoke::resolve_receiver(self, instance)?;
        invoke::check_arguments(self, &[self.info.ty], slice::from_ref(&value))?;
        self.mirror
            .context()
            .set_field(self.info.id, receiver, value)
            .map_err(|cause| invoke::platform_failure(self, cause))
    }

    /// Whether the field currently holds a non-null value
    pub fn has_value(&self, instance: Option<&Value>) -> MirrorResult<bool> {
        Ok(!self.get_value(instance)?.is_null())
    }
}

impl<'a> Reflected<'a> for MField<'a> {
    fn mirror(&self) -> Mirror<'a> {
        self.mirror
    }
}

impl Named for MField<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.info.name)
    }
}

impl Typed for MField<'_> {
    fn declared_type(&self) -> ClassId {
        self.info.ty
    }
}

impl Modified for MField<'_> {
    fn modifiers(&self) -> Modifiers {
        self.info.modifiers
    }
}

impl<'a> Annotated<'a> for MField<'a> {
    fn raw_annotations(&self) -> &[Annotation] {
        &self.info.annotations
    }
}

impl<'a> Declared<'a> for MField<'a> {
    fn declaring_class_id(&self) -> ClassId {
        self.info.id.class
    }
}

impl<'a> Member<'a> for MField<'a> {
    fn member_ref(&self) -> MemberRef {
        MemberRef::Field(self.info.id)
    }
}

impl<'a> Accessible<'a> for MField<'a> {
    fn signature(&self) -> String {
        self.info.name.clone()
    }

    fn bound_instance(&self) -> Option<&Value> {
        self.bound.as_ref()
    }
}
