//! Member filters
//!
//! A [`Filter`] holds at most one criterion per kind: name, declared type,
//! annotations and (for constructors and methods) parameter signature.
//! Setting a kind replaces the previous criterion of that kind; `test` is
//! the AND of whatever is set, so an empty filter accepts everything.
//!
//! ```ignore
//! let mut filter = Filter::for_methods();
//! filter.with_name("greet").with_parameter(core_class_ids::STRING);
//! let greet = class.method(|m| filter.test(m));
//! ```
//!
//! Filters are plain values with no interior synchronization. Clone one
//! per thread rather than sharing a filter that is still being changed.

mod criterion;

pub use criterion::{
    AnnotationCriterion, NameCriterion, RewriteOperation, SignatureCriterion, TypeComparison,
    TypeCriterion,
};

use std::marker::PhantomData;

use mirror_sdk::ClassId;

use crate::member::{Annotated, MConstructor, MField, MMethod, MParameter, Named, Parameterized, Typed};

/// Filters over constructors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructors {}

/// Filters over methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Methods {}

/// Filters over fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fields {}

/// Filters over parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameters {}

/// Filter kinds whose candidates have a parameter list
pub trait SignatureKind {}

impl SignatureKind for Constructors {}
impl SignatureKind for Methods {}

/// A member a filter of kind `Kind` can test
pub trait Filterable<'a>: Named + Typed + Annotated<'a> {
    /// Filter kind accepting this member
    type Kind;

    /// Parameter types, for members that have them
    fn signature_types(&self) -> Option<Vec<ClassId>> {
        None
    }
}

impl<'a> Filterable<'a> for MConstructor<'a> {
    type Kind = Constructors;

    fn signature_types(&self) -> Option<Vec<ClassId>> {
        Some(self.parameter_types())
    }
}

impl<'a> Filterable<'a> for MMethod<'a> {
    type Kind = Methods;

    fn signature_types(&self) -> Option<Vec<ClassId>> {
        Some(self.parameter_types())
    }
}

impl<'a> Filterable<'a> for MField<'a> {
    type Kind = Fields;
}

impl<'a> Filterable<'a> for MParameter<'a> {
    type Kind = Parameters;
}

/// Composite predicate over one member kind
#[derive(Debug, PartialEq)]
pub struct Filter<K> {
    comparison: TypeComparison,
    name: Option<NameCriterion>,
    ty: Option<TypeCriterion>,
    annotations: Option<AnnotationCriterion>,
    parameters: Option<SignatureCriterion>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for Filter<K> {
    fn clone(&self) -> Self {
        Self {
            comparison: self.comparison,
            name: self.name.clone(),
            ty: self.ty.clone(),
            annotations: self.annotations.clone(),
            parameters: self.parameters.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> Default for Filter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter<Constructors> {
    /// Empty constructor filter
    pub fn for_constructors() -> Self {
        Self::new()
    }
}

impl Filter<Methods> {
    /// Empty method filter
    pub fn for_methods() -> Self {
        Self::new()
    }
}

impl Filter<Fields> {
    /// Empty field filter
    pub fn for_fields() -> Self {
        Self::new()
    }
}

impl Filter<Parameters> {
    /// Empty parameter filter
    pub fn for_parameters() -> Self {
        Self::new()
    }
}

impl<K> Filter<K> {
    /// Empty filter comparing types by assignability
    pub fn new() -> Self {
        Self::with_comparison(TypeComparison::default())
    }

    /// Empty filter with an explicit comparison mode
    pub fn with_comparison(comparison: TypeComparison) -> Self {
        Self {
            comparison,
            name: None,
            ty: None,
            annotations: None,
            parameters: None,
            kind: PhantomData,
        }
    }

    /// Comparison mode for type criteria
    pub fn comparison(&self) -> TypeComparison {
        self.comparison
    }

    /// Whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.ty.is_none()
            && self.annotations.is_none()
            && self.parameters.is_none()
    }

    /// Independent copy with the same criteria
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Switch the comparison mode, including for criteria already set
    pub fn compare_types_by(&mut self, comparison: TypeComparison) -> &mut Self {
        self.comparison = comparison;
        if let Some(ty) = &mut self.ty {
            ty.compare_by(comparison);
        }
        if let Some(annotations) = &mut self.annotations {
            annotations.compare_by(comparison);
        }
        if let Some(parameters) = &mut self.parameters {
            parameters.compare_by(comparison);
        }
        self
    }

    // ========================================================================
    // Name
    // ========================================================================

    /// Require the declared name
    pub fn with_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(NameCriterion::new(name));
        self
    }

    /// Drop the name criterion
    pub fn clear_name(&mut self) -> &mut Self {
        self.name = None;
        self
    }

    // ========================================================================
    // Declared type
    // ========================================================================

    /// Require the declared type (field type, return type, parameter type)
    pub fn of_type(&mut self, ty: ClassId) -> &mut Self {
        self.ty = Some(TypeCriterion::of(ty, self.comparison));
        self
    }

    /// Drop the type criterion
    pub fn clear_type(&mut self) -> &mut Self {
        self.ty = None;
        self
    }

    // ========================================================================
    // Annotations
    // ========================================================================

    /// Require one annotation type
    pub fn with_annotation(&mut self, ty: ClassId) -> &mut Self {
        self.with_annotations(&[ty])
    }

    /// Require every listed annotation type
    pub fn with_annotations(&mut self, types: &[ClassId]) -> &mut Self {
        self.with_annotations_using(types, RewriteOperation::Replace)
    }

    /// Combine `types` with the annotation types already required.
    ///
    /// A filter requiring no annotations at all starts over from `types`.
    pub fn with_annotations_using(
        &mut self,
        types: &[ClassId],
        operation: RewriteOperation,
    ) -> &mut Self {
        match &mut self.annotations {
            Some(AnnotationCriterion::Required {
                types: existing, ..
            }) => operation.apply(existing, types),
            slot => *slot = Some(AnnotationCriterion::required(types.to_vec(), self.comparison)),
        }
        self
    }

    /// Require that no annotation is present
    pub fn with_no_annotations(&mut self) -> &mut Self {
        self.annotations = Some(AnnotationCriterion::Absent);
        self
    }

    /// Drop the annotation criterion
    pub fn clear_annotations(&mut self) -> &mut Self {
        self.annotations = None;
        self
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Whether `candidate` satisfies every criterion that is set
    pub fn test<'a, C>(&self, candidate: &C) -> bool
    where
        C: Filterable<'a, Kind = K>,
    {
        let ctx = candidate.mirror().context();
        let matched = self
            .name
            .as_ref()
            .is_none_or(|criterion| criterion.test(&candidate.name()))
            && self
                .ty
                .as_ref()
                .is_none_or(|criterion| criterion.test(ctx, candidate.declared_type()))
            && self
                .annotations
                .as_ref()
                .is_none_or(|criterion| criterion.test(ctx, candidate.raw_annotations()))
            && self.parameters.as_ref().is_none_or(|criterion| {
                candidate
                    .signature_types()
                    .is_some_and(|types| criterion.test(ctx, &types))
            });
        tracing::trace!(candidate = %candidate.name(), matched, "filter evaluated");
        matched
    }
}

impl<K: SignatureKind> Filter<K> {
    /// Require exactly these parameter types, in order
    pub fn with_parameters(&mut self, types: &[ClassId]) -> &mut Self {
        self.with_parameters_using(types, RewriteOperation::Replace)
    }

    /// Combine `types` with the parameter types already required
    pub fn with_parameters_using(
        &mut self,
        types: &[ClassId],
        operation: RewriteOperation,
    ) -> &mut Self {
        match &mut self.parameters {
            Some(existing) => existing.rewrite(types, operation),
            slot => *slot = Some(SignatureCriterion::new(types.to_vec(), self.comparison)),
        }
        self
    }

    /// Require a single parameter of type `ty`
    pub fn with_parameter(&mut self, ty: ClassId) -> &mut Self {
        self.with_parameters(&[ty])
    }

    /// Require an empty parameter list
    pub fn with_no_parameters(&mut self) -> &mut Self {
        self.with_parameters(&[])
    }

    /// Drop the parameter criterion
    pub fn clear_parameters(&mut self) -> &mut Self {
        self.parameters = None;
        self
    }
}
