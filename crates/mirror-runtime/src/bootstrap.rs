//! Core types every runtime starts with
//!
//! Installed by [`Runtime::new`](crate::Runtime::new) in a fixed order so
//! the IDs below are stable.

use mirror_sdk::{ClassId, Modifiers};

use crate::builder::ClassBuilder;
use crate::registry::ClassRegistry;
use crate::Runtime;

/// Well-known class IDs for core types
pub mod core_class_ids {
    use mirror_sdk::ClassId;

    /// `lang.Object`, root of every class hierarchy
    pub const OBJECT: ClassId = ClassId::new(0);
    /// `lang.Number`, abstract base of boxed numbers
    pub const NUMBER: ClassId = ClassId::new(1);
    /// `lang.Integer`
    pub const INTEGER: ClassId = ClassId::new(2);
    /// `lang.CharSequence` interface
    pub const CHAR_SEQUENCE: ClassId = ClassId::new(3);
    /// `lang.String`, runtime type of string values
    pub const STRING: ClassId = ClassId::new(4);
    /// `lang.annotation.Annotation`, implemented by every annotation type
    pub const ANNOTATION: ClassId = ClassId::new(5);
    /// `int`
    pub const INT: ClassId = ClassId::new(6);
    /// `long`
    pub const LONG: ClassId = ClassId::new(7);
    /// `double`
    pub const DOUBLE: ClassId = ClassId::new(8);
    /// `boolean`
    pub const BOOLEAN: ClassId = ClassId::new(9);
    /// `void`, the declared return type of methods without a value
    pub const VOID: ClassId = ClassId::new(10);
}

use core_class_ids::*;

fn core_types() -> Vec<ClassBuilder> {
    vec![
        ClassBuilder::class("lang.Object"),
        ClassBuilder::class("lang.Number")
            .extends(OBJECT)
            .modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT),
        ClassBuilder::class("lang.Integer")
            .extends(NUMBER)
            .modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        ClassBuilder::interface("lang.CharSequence"),
        ClassBuilder::class("lang.String")
            .implements(CHAR_SEQUENCE)
            .modifiers(Modifiers::PUBLIC | Modifiers::FINAL),
        ClassBuilder::interface("lang.annotation.Annotation"),
        ClassBuilder::primitive("int"),
        ClassBuilder::primitive("long"),
        ClassBuilder::primitive("double"),
        ClassBuilder::primitive("boolean"),
        ClassBuilder::primitive("void"),
    ]
}

/// Register the core types into an empty registry
pub(crate) fn install(runtime: &Runtime, registry: &mut ClassRegistry) {
    for builder in core_types() {
        let id = runtime.register(registry, builder);
        tracing::trace!(%id, "installed core type");
    }
    debug_assert_eq!(registry.next_class_id(), ClassId::new(VOID.index() as u32 + 1));
}
