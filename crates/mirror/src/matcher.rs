//! Pre-flight argument compatibility checks
//!
//! The matcher only predicts whether the platform will accept an argument
//! list. The platform call stays authoritative.

use mirror_sdk::{ClassId, ReflectContext, Value};

use crate::config::{MirrorConfig, NullArguments};
use crate::filter::TypeComparison;

/// Decides whether arguments fit declared parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentMatcher {
    comparison: TypeComparison,
    nulls: NullArguments,
}

impl Default for ArgumentMatcher {
    fn default() -> Self {
        Self::from_config(&MirrorConfig::default())
    }
}

impl ArgumentMatcher {
    /// Matcher with an explicit policy
    pub fn new(comparison: TypeComparison, nulls: NullArguments) -> Self {
        Self { comparison, nulls }
    }

    /// Matcher with the configured policy
    pub fn from_config(config: &MirrorConfig) -> Self {
        Self::new(config.argument_matching, config.null_arguments)
    }

    /// Type comparison in use
    pub fn comparison(&self) -> TypeComparison {
        self.comparison
    }

    /// Null policy in use
    pub fn nulls(&self) -> NullArguments {
        self.nulls
    }

    /// Whether `args` fit `parameters`: same count, and every position fits
    pub fn matches(&self, ctx: &dyn ReflectContext, parameters: &[ClassId], args: &[Value]) -> bool {
        parameters.len() == args.len()
            && parameters
                .iter()
                .zip(args)
                .all(|(&param, arg)| self.fits(ctx, param, arg))
    }

    /// Whether a single value fits a declared type
    pub fn fits(&self, ctx: &dyn ReflectContext, declared: ClassId, value: &Value) -> bool {
        match ctx.type_of(value) {
            Some(actual) => self.comparison.compare(ctx, declared, actual),
            None => match self.nulls {
                NullArguments::Any => true,
                NullArguments::ReferenceOnly => ctx
                    .class_info(declared)
                    .is_some_and(|info| !info.is_primitive()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_runtime::{core_class_ids::*, ClassBuilder, ConstructorDef, Runtime};
    use mirror_sdk::Modifiers;

    fn object_of(rt: &Runtime, name: &str, parent: Option<ClassId>) -> (ClassId, Value) {
        let mut builder = ClassBuilder::class(name).constructor(ConstructorDef::new(Modifiers::PUBLIC));
        if let Some(parent) = parent {
            builder = builder.extends(parent);
        }
        let class = rt.define(builder).unwrap();
        let ctor = rt.declared_constructors(class)[0].id;
        (class, rt.new_instance(ctor, &[]).unwrap())
    }

    #[test]
    fn test_count_must_match() {
        let rt = Runtime::new();
        let matcher = ArgumentMatcher::default();
        assert!(matcher.matches(&rt, &[], &[]));
        assert!(!matcher.matches(&rt, &[INT], &[]));
        assert!(!matcher.matches(&rt, &[], &[Value::from(1)]));
    }

    #[test]
    fn test_equality_rejects_subtypes() {
        let rt = Runtime::new();
        let (base, _) = object_of(&rt, "a.Base", None);
        let (_, derived) = object_of(&rt, "a.Derived", Some(base));

        let strict = ArgumentMatcher::new(TypeComparison::Equality, NullArguments::ReferenceOnly);
        assert!(!strict.matches(&rt, &[base], &[derived.clone()]));

        let lenient = ArgumentMatcher::new(TypeComparison::Assignability, NullArguments::ReferenceOnly);
        assert!(lenient.matches(&rt, &[base], &[derived]));
    }

    #[test]
    fn test_null_policy() {
        let rt = Runtime::new();
        let closed = ArgumentMatcher::new(TypeComparison::Equality, NullArguments::ReferenceOnly);
        assert!(closed.matches(&rt, &[STRING], &[Value::Null]));
        assert!(!closed.matches(&rt, &[INT], &[Value::Null]));

        let open = ArgumentMatcher::new(TypeComparison::Equality, NullArguments::Any);
        assert!(open.matches(&rt, &[INT], &[Value::Null]));
    }

    #[test]
    fn test_positions_checked_in_order() {
        let rt = Runtime::new();
        let matcher = ArgumentMatcher::default();
        let args = [Value::from("a"), Value::from(1)];
        assert!(matcher.matches(&rt, &[STRING, INT], &args));
        assert!(!matcher.matches(&rt, &[INT, STRING], &args));
    }
}
