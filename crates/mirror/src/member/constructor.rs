//! Constructor handles

use std::borrow::Cow;
use std::fmt;

use mirror_sdk::{
    Annotation, ClassId, ConstructorId, ConstructorInfo, MemberRef, Modifiers, ParameterInfo,
    Value,
};

use super::{Accessible, Annotated, Declared, Member, Modified, Named, Parameterized, Reflected, Typed};
use crate::error::MirrorResult;
use crate::{format, invoke, Mirror};

/// Handle to a constructor
#[derive(Clone)]
pub struct MConstructor<'a> {
    mirror: Mirror<'a>,
    info: ConstructorInfo,
}

impl fmt::Debug for MConstructor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MConstructor").field(&self.signature()).finish()
    }
}

impl<'a> MConstructor<'a> {
    pub(crate) fn from_raw(mirror: Mirror<'a>, info: ConstructorInfo) -> Self {
        Self { mirror, info }
    }

    /// Raw constructor handle
    pub fn id(&self) -> ConstructorId {
        self.info.id
    }

    /// Raw constructor record
    pub fn raw(&self) -> &ConstructorInfo {
        &self.info
    }

    /// Create an instance
    pub fn new_instance(&self, args: &[Value]) -> MirrorResult<Value> {
        self.invoke_with_instance(None, args)
    }

    /// Create an instance; a non-null `instance` is rejected
    pub fn invoke_with_instance(&self, instance: Option<&Value>, args: &[Value]) -> MirrorResult<Value> {
        let id = self.info.id;
        invoke::invoke(self, instance, args, |ctx, _| ctx.new_instance(id, args))
    }
}

impl<'a> Reflected<'a> for MConstructor<'a> {
    fn mirror(&self) -> Mirror<'a> {
        self.mirror
    }
}

impl Named for MConstructor<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Owned(self.mirror.class_name(self.info.id.class))
    }
}

impl Typed for MConstructor<'_> {
    fn declared_type(&self) -> ClassId {
        self.info.id.class
    }
}

impl Modified for MConstructor<'_> {
    fn modifiers(&self) -> Modifiers {
        self.info.modifiers
    }
}

impl<'a> Annotated<'a> for MConstructor<'a> {
    fn raw_annotations(&self) -> &[Annotation] {
        &self.info.annotations
    }
}

impl<'a> Declared<'a> for MConstructor<'a> {
    fn declaring_class_id(&self) -> ClassId {
        self.info.id.class
    }
}

impl<'a> Member<'a> for MConstructor<'a> {
    fn member_ref(&self) -> MemberRef {
        MemberRef::Constructor(self.info.id)
    }
}

impl<'a> Accessible<'a> for MConstructor<'a> {
    fn signature(&self) -> String {
        format::constructor_signature(self.mirror.context(), &self.info)
    }

    fn is_static_context(&self) -> bool {
        true
    }
}

impl<'a> Parameterized<'a> for MConstructor<'a> {
    fn raw_parameters(&self) -> &[ParameterInfo] {
        &self.info.parameters
    }
}
