//! Single comparison rules
//!
//! A criterion checks one attribute of a candidate. Type comparisons go
//! through [`TypeComparison`] so every criterion kind shares the same
//! equality-or-assignability logic.

use mirror_sdk::{Annotation, ClassId, ReflectContext};
use serde::Deserialize;

/// How a filter-declared type is compared with a candidate type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeComparison {
    /// Types must be identical
    Equality,
    /// The candidate type must be assignable to the declared type
    #[default]
    Assignability,
}

impl TypeComparison {
    /// Compare `declared` (the type a filter asks for) with `candidate`
    pub fn compare(self, ctx: &dyn ReflectContext, declared: ClassId, candidate: ClassId) -> bool {
        match self {
            TypeComparison::Equality => declared == candidate,
            TypeComparison::Assignability => ctx.is_assignable(declared, candidate),
        }
    }
}

/// How a new type list is combined with the one a filter already holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RewriteOperation {
    /// Add the new types after the existing ones
    Append,
    /// Add the new types before the existing ones
    Prepend,
    /// Discard the existing types
    #[default]
    Replace,
}

impl RewriteOperation {
    /// Rewrite `list` in place with `other`
    pub fn apply<T: Clone>(self, list: &mut Vec<T>, other: &[T]) {
        match self {
            RewriteOperation::Append => list.extend_from_slice(other),
            RewriteOperation::Prepend => {
                list.splice(0..0, other.iter().cloned());
            }
            RewriteOperation::Replace => {
                list.clear();
                list.extend_from_slice(other);
            }
        }
    }
}

/// Name equals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCriterion {
    name: String,
}

impl NameCriterion {
    /// Match exactly `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name being matched
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Test a candidate name
    pub fn test(&self, candidate: &str) -> bool {
        self.name == candidate
    }
}

/// Declared type (field type, return type, parameter type) matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCriterion {
    ty: Option<ClassId>,
    comparison: TypeComparison,
}

impl TypeCriterion {
    /// Empty criterion; matches everything until a type is set
    pub fn new(comparison: TypeComparison) -> Self {
        Self {
            ty: None,
            comparison,
        }
    }

    /// Criterion requiring `ty`
    pub fn of(ty: ClassId, comparison: TypeComparison) -> Self {
        Self {
            ty: Some(ty),
            comparison,
        }
    }

    /// Required type, if any
    pub fn ty(&self) -> Option<ClassId> {
        self.ty
    }

    /// Whether no type is set
    pub fn is_empty(&self) -> bool {
        self.ty.is_none()
    }

    /// Change the comparison mode
    pub fn compare_by(&mut self, comparison: TypeComparison) {
        self.comparison = comparison;
    }

    /// Test a candidate's declared type
    pub fn test(&self, ctx: &dyn ReflectContext, candidate: ClassId) -> bool {
        match self.ty {
            Some(ty) => self.comparison.compare(ctx, ty, candidate),
            None => true,
        }
    }
}

/// Parameter types match position by position
///
/// Each candidate parameter type is the declared side of the comparison: a
/// filter asking for `(Integer)` matches a member declared `(Number)` under
/// assignability, since an `Integer` can be passed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureCriterion {
    types: Vec<ClassId>,
    comparison: TypeComparison,
}

impl SignatureCriterion {
    /// Criterion requiring exactly `types`, in order
    pub fn new(types: Vec<ClassId>, comparison: TypeComparison) -> Self {
        Self { types, comparison }
    }

    /// Required parameter types
    pub fn types(&self) -> &[ClassId] {
        &self.types
    }

    /// Change the comparison mode
    pub fn compare_by(&mut self, comparison: TypeComparison) {
        self.comparison = comparison;
    }

    /// Combine `types` with the required types
    pub fn rewrite(&mut self, types: &[ClassId], operation: RewriteOperation) {
        operation.apply(&mut self.types, types);
    }

    /// Test a candidate's parameter types
    pub fn test(&self, ctx: &dyn ReflectContext, candidate: &[ClassId]) -> bool {
        candidate.len() == self.types.len()
            && candidate
                .iter()
                .zip(&self.types)
                .all(|(&param, &ty)| self.comparison.compare(ctx, param, ty))
    }
}

/// Annotation requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationCriterion {
    /// The candidate must carry no annotations at all
    Absent,
    /// Each listed type must be matched by at least one candidate annotation
    Required {
        /// Required annotation types
        types: Vec<ClassId>,
        /// How annotation types are compared
        comparison: TypeComparison,
    },
}

impl AnnotationCriterion {
    /// Require every type in `types`
    pub fn required(types: Vec<ClassId>, comparison: TypeComparison) -> Self {
        AnnotationCriterion::Required { types, comparison }
    }

    /// Change the comparison mode
    pub fn compare_by(&mut self, mode: TypeComparison) {
        if let AnnotationCriterion::Required { comparison, .. } = self {
            *comparison = mode;
        }
    }

    /// Test a candidate's annotations
    pub fn test(&self, ctx: &dyn ReflectContext, candidate: &[Annotation]) -> bool {
        match self {
            AnnotationCriterion::Absent => candidate.is_empty(),
            AnnotationCriterion::Required { types, comparison } => types.iter().all(|&ty| {
                candidate
                    .iter()
                    .any(|annotation| comparison.compare(ctx, ty, annotation.ty))
            }),
        }
    }
}
