//! Class facade

use std::borrow::Cow;
use std::fmt;

use mirror_sdk::{Annotation, ClassId, ClassInfo, ClassKind, Modifiers, Value};

use super::{Annotated, MConstructor, MField, MMethod, Modified, Named, Reflected};
use crate::filter::{Filter, TypeComparison};
use crate::Mirror;

/// Whether a hierarchy walk starts at the class itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeSelf {
    /// Start at the class
    Yes,
    /// Start at its superclass
    No,
}

/// Whether member queries also cover inherited members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeSuperclasses {
    /// Declared and inherited members, most derived class first
    Yes,
    /// Declared members only
    No,
}

/// Handle to a class.
///
/// Member sequences are lazy and re-read from the platform on every call;
/// lookups that find nothing return `None`, never an error.
#[derive(Clone)]
pub struct MClass<'a> {
    mirror: Mirror<'a>,
    info: ClassInfo,
}

impl fmt::Debug for MClass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MClass").field(&self.info.name).finish()
    }
}

impl PartialEq for MClass<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.info.id == other.info.id
    }
}

impl Eq for MClass<'_> {}

impl<'a> MClass<'a> {
    pub(crate) fn from_raw(mirror: Mirror<'a>, info: ClassInfo) -> Self {
        Self { mirror, info }
    }

    /// Class ID
    pub fn id(&self) -> ClassId {
        self.info.id
    }

    /// Raw class record
    pub fn raw(&self) -> &ClassInfo {
        &self.info
    }

    /// Simple name, e.g. `String`
    pub fn simple_name(&self) -> &str {
        &self.info.simple_name
    }

    /// Kind of type
    pub fn kind(&self) -> ClassKind {
        self.info.kind
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        self.info.kind == ClassKind::Interface
    }

    /// Whether this is an annotation type
    pub fn is_annotation(&self) -> bool {
        self.info.kind == ClassKind::Annotation
    }

    /// Whether this is a primitive type
    pub fn is_primitive(&self) -> bool {
        self.info.is_primitive()
    }

    /// Whether values of `other` can be stored where this type is expected
    pub fn is_assignable_from(&self, other: &MClass<'_>) -> bool {
        self.mirror
            .context()
            .is_assignable(self.info.id, other.info.id)
    }

    /// Whether `value` is an instance of this type (false for null)
    pub fn is_instance(&self, value: &Value) -> bool {
        let ctx = self.mirror.context();
        ctx.type_of(value)
            .is_some_and(|ty| ctx.is_assignable(self.info.id, ty))
    }

    // ========================================================================
    // Constructors
    // ========================================================================

    /// Declared constructors, in declaration order
    pub fn constructors(&self) -> impl Iterator<Item = MConstructor<'a>> + 'a {
        let mirror = self.mirror;
        mirror
            .context()
            .declared_constructors(self.info.id)
            .into_iter()
            .map(move |info| MConstructor::from_raw(mirror, info))
    }

    /// Constructors accepted by `predicate`
    pub fn constructors_matching<P>(&self, predicate: P) -> impl Iterator<Item = MConstructor<'a>> + 'a
    where
        P: FnMut(&MConstructor<'a>) -> bool + 'a,
    {
        self.constructors().filter(predicate)
    }

    /// First declared constructor
    pub fn constructor(&self) -> Option<MConstructor<'a>> {
        self.constructors().next()
    }

    /// First constructor accepted by `predicate`
    pub fn constructor_matching<P>(&self, predicate: P) -> Option<MConstructor<'a>>
    where
        P: FnMut(&MConstructor<'a>) -> bool,
    {
        self.constructors().find(predicate)
    }

    /// Constructor declared with exactly `types`, in order
    pub fn constructor_with_types(&self, types: &[ClassId]) -> Option<MConstructor<'a>> {
        let mut filter = Filter::for_constructors();
        filter
            .compare_types_by(TypeComparison::Equality)
            .with_parameters(types);
        self.constructor_matching(|c| filter.test(c))
    }

    /// Number of declared constructors
    pub fn constructor_count(&self) -> usize {
        self.mirror
            .context()
            .declared_constructors(self.info.id)
            .len()
    }

    // ========================================================================
    // Methods
    // ========================================================================

    /// Declared methods, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = MMethod<'a>> + 'a {
        let mirror = self.mirror;
        mirror
            .context()
            .declared_methods(self.info.id)
            .into_iter()
            .map(move |info| MMethod::from_raw(mirror, info))
    }

    /// Methods of this class, optionally with inherited ones after them
    pub fn methods_in(&self, include: IncludeSuperclasses) -> impl Iterator<Item = MMethod<'a>> + 'a {
        self.scope(include).into_iter().flat_map(|class| class.methods())
    }

    /// Methods accepted by `predicate`
    pub fn methods_matching<P>(&self, predicate: P) -> impl Iterator<Item = MMethod<'a>> + 'a
    where
        P: FnMut(&MMethod<'a>) -> bool + 'a,
    {
        self.methods().filter(predicate)
    }

    /// First method accepted by `predicate`
    pub fn method<P>(&self, predicate: P) -> Option<MMethod<'a>>
    where
        P: FnMut(&MMethod<'a>) -> bool,
    {
        self.methods().find(predicate)
    }

    /// First method accepted by `predicate`, optionally searching superclasses
    pub fn method_in<P>(&self, predicate: P, include: IncludeSuperclasses) -> Option<MMethod<'a>>
    where
        P: FnMut(&MMethod<'a>) -> bool,
    {
        self.methods_in(include).find(predicate)
    }

    /// First method with the given name
    pub fn method_named(&self, name: &str) -> Option<MMethod<'a>> {
        self.method(|m| m.name() == name)
    }

    /// Whether any method is declared
    pub fn has_methods(&self) -> bool {
        self.method_count() > 0
    }

    /// Number of declared methods
    pub fn method_count(&self) -> usize {
        self.mirror.context().declared_methods(self.info.id).len()
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Declared fields, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = MField<'a>> + 'a {
        let mirror = self.mirror;
        mirror
            .context()
            .declared_fields(self.info.id)
            .into_iter()
            .map(move |info| MField::from_raw(mirror, info))
    }

    /// Fields of this class, optionally with inherited ones after them
    pub fn fields_in(&self, include: IncludeSuperclasses) -> impl Iterator<Item = MField<'a>> + 'a {
        self.scope(include).into_iter().flat_map(|class| class.fields())
    }

    /// Fields accepted by `predicate`
    pub fn fields_matching<P>(&self, predicate: P) -> impl Iterator<Item = MField<'a>> + 'a
    where
        P: FnMut(&MField<'a>) -> bool + 'a,
    {
        self.fields().filter(predicate)
    }

    /// First field accepted by `predicate`
    pub fn field<P>(&self, predicate: P) -> Option<MField<'a>>
    where
        P: FnMut(&MField<'a>) -> bool,
    {
        self.fields().find(predicate)
    }

    /// First field accepted by `predicate`, optionally searching superclasses
    pub fn field_in<P>(&self, predicate: P, include: IncludeSuperclasses) -> Option<MField<'a>>
    where
        P: FnMut(&MField<'a>) -> bool,
    {
        self.fields_in(include).find(predicate)
    }

    /// First field with the given name
    pub fn field_named(&self, name: &str) -> Option<MField<'a>> {
        self.field(|f| f.name() == name)
    }

    /// Whether any field is declared
    pub fn has_fields(&self) -> bool {
        self.field_count() > 0
    }

    /// Number of declared fields
    pub fn field_count(&self) -> usize {
        self.mirror.context().declared_fields(self.info.id).len()
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Direct superclass
    pub fn superclass(&self) -> Option<MClass<'a>> {
        self.info.superclass.and_then(|id| self.mirror.class(id))
    }

    /// Whether there is a direct superclass
    pub fn has_superclass(&self) -> bool {
        self.info.superclass.is_some()
    }

    /// Superclass chain up to the root, most derived first
    pub fn superclasses(&self, include: IncludeSelf) -> Vec<MClass<'a>> {
        let mut chain = Vec::new();
        if include == IncludeSelf::Yes {
            chain.push(self.clone());
        }
        let mut current = self.superclass();
        while let Some(class) = current {
            current = class.superclass();
            chain.push(class);
        }
        chain
    }

    /// First class in the superclass chain accepted by `predicate`
    pub fn superclass_until<P>(&self, mut predicate: P, include: IncludeSelf) -> Option<MClass<'a>>
    where
        P: FnMut(&MClass<'a>) -> bool,
    {
        self.superclasses(include)
            .into_iter()
            .find(|class| predicate(class))
    }

    /// Whether this class appears in the superclass chain of `other`
    pub fn is_superclass_of(&self, other: &MClass<'_>) -> bool {
        other
            .superclasses(IncludeSelf::No)
            .iter()
            .any(|class| class.info.id == self.info.id)
    }

    /// Directly implemented interfaces
    pub fn interfaces(&self) -> Vec<MClass<'a>> {
        self.info
            .interfaces
            .iter()
            .filter_map(|&id| self.mirror.class(id))
            .collect()
    }

    fn scope(&self, include: IncludeSuperclasses) -> Vec<MClass<'a>> {
        match include {
            IncludeSuperclasses::Yes => self.superclasses(IncludeSelf::Yes),
            IncludeSuperclasses::No => vec![self.clone()],
        }
    }
}

impl<'a> Reflected<'a> for MClass<'a> {
    fn mirror(&self) -> Mirror<'a> {
        self.mirror
    }
}

impl Named for MClass<'_> {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.info.name)
    }
}

impl Modified for MClass<'_> {
    fn modifiers(&self) -> Modifiers {
        self.info.modifiers
    }
}

impl<'a> Annotated<'a> for MClass<'a> {
    fn raw_annotations(&self) -> &[Annotation] {
        &self.info.annotations
    }
}
