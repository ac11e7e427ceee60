//! Entry point binding a platform to the facade

use std::fmt;

use mirror_sdk::{ClassId, ConstructorId, FieldId, MethodId, ReflectContext, Value};

use crate::config::MirrorConfig;
use crate::filter::{Constructors, Fields, Filter, Methods, Parameters};
use crate::format;
use crate::matcher::ArgumentMatcher;
use crate::member::{MClass, MConstructor, MField, MMethod};

/// A platform plus facade settings.
///
/// `Mirror` is a cheap `Copy` value; every handle it produces carries one,
/// so handles stay usable for as long as the platform reference lives.
#[derive(Clone, Copy)]
pub struct Mirror<'a> {
    ctx: &'a dyn ReflectContext,
    config: MirrorConfig,
}

impl fmt::Debug for Mirror<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mirror")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> Mirror<'a> {
    /// Facade over `ctx` with the default settings
    pub fn new(ctx: &'a dyn ReflectContext) -> Self {
        Self::with_config(ctx, MirrorConfig::default())
    }

    /// Facade over `ctx` with explicit settings
    pub fn with_config(ctx: &'a dyn ReflectContext, config: MirrorConfig) -> Self {
        Self { ctx, config }
    }

    /// The underlying platform
    pub fn context(&self) -> &'a dyn ReflectContext {
        self.ctx
    }

    /// Active settings
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    // ========================================================================
    // Class Lookup
    // ========================================================================

    /// Class handle for an ID; None if the platform does not know it
    pub fn class(&self, id: ClassId) -> Option<MClass<'a>> {
        self.ctx
            .class_info(id)
            .map(|info| MClass::from_raw(*self, info))
    }

    /// Class handle by qualified name
    pub fn class_by_name(&self, name: &str) -> Option<MClass<'a>> {
        self.ctx.class_by_name(name).and_then(|id| self.class(id))
    }

    /// Class handle for the runtime type of a value; None for null
    pub fn class_of(&self, value: &Value) -> Option<MClass<'a>> {
        self.ctx.type_of(value).and_then(|id| self.class(id))
    }

    // ========================================================================
    // Member Lookup
    // ========================================================================

    /// Constructor handle for a raw constructor ID
    pub fn constructor(&self, id: ConstructorId) -> Option<MConstructor<'a>> {
        self.ctx
            .declared_constructors(id.class)
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| MConstructor::from_raw(*self, info))
    }

    /// Method handle for a raw method ID
    pub fn method(&self, id: MethodId) -> Option<MMethod<'a>> {
        self.ctx
            .declared_methods(id.class)
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| MMethod::from_raw(*self, info))
    }

    /// Field handle for a raw field ID
    pub fn field(&self, id: FieldId) -> Option<MField<'a>> {
        self.ctx
            .declared_fields(id.class)
            .into_iter()
            .find(|info| info.id == id)
            .map(|info| MField::from_raw(*self, info))
    }

    // ========================================================================
    // Filters and Matching
    // ========================================================================

    /// Empty constructor filter using the configured comparison mode
    pub fn constructor_filter(&self) -> Filter<Constructors> {
        Filter::with_comparison(self.config.type_comparison)
    }

    /// Empty method filter using the configured comparison mode
    pub fn method_filter(&self) -> Filter<Methods> {
        Filter::with_comparison(self.config.type_comparison)
    }

    /// Empty field filter using the configured comparison mode
    pub fn field_filter(&self) -> Filter<Fields> {
        Filter::with_comparison(self.config.type_comparison)
    }

    /// Empty parameter filter using the configured comparison mode
    pub fn parameter_filter(&self) -> Filter<Parameters> {
        Filter::with_comparison(self.config.type_comparison)
    }

    /// Argument matcher using the configured policy
    pub fn argument_matcher(&self) -> ArgumentMatcher {
        ArgumentMatcher::from_config(&self.config)
    }

    pub(crate) fn class_name(&self, id: ClassId) -> String {
        format::class_name(self.ctx, id)
    }
}
