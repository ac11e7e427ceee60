//! Mirror - a fluent reflection facade
//!
//! Wraps a [`ReflectContext`] platform in typed handles for classes,
//! constructors, methods, fields and parameters, composable member
//! [`Filter`]s, and a checked invocation pipeline that turns every failure
//! into a categorized [`MirrorError`].
//!
//! # Example
//!
//! ```ignore
//! use mirror::{Accessible, Filter, Mirror, Parameterized};
//! use mirror_runtime::{core_class_ids::STRING, Runtime};
//!
//! let runtime = Runtime::new();
//! let mirror = Mirror::new(&runtime);
//! let user = mirror.class_by_name("app.User").unwrap();
//!
//! let mut filter = Filter::for_constructors();
//! filter.with_parameters(&[STRING, STRING]);
//! let ctor = user.constructor_matching(|c| filter.test(c)).unwrap();
//! ctor.require_accessible(None)?;
//! let bob = ctor.new_instance(&["bob".into(), "bob@example.com".into()])?;
//! ```
//!
//! [`ReflectContext`]: mirror_sdk::ReflectContext

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod filter;
pub mod format;
pub mod matcher;
pub mod member;

mod invoke;
mod mirror;

pub use config::{MirrorConfig, NullArguments};
pub use error::{ConfigError, MirrorError, MirrorResult};
pub use filter::{
    Constructors, Fields, Filter, Filterable, Methods, Parameters, RewriteOperation, TypeComparison,
};
pub use matcher::ArgumentMatcher;
pub use member::{
    Accessible, Annotated, Declared, IncludeSelf, IncludeSuperclasses, MClass, MConstructor,
    MField, MMethod, MParameter, Member, Modified, Named, Parameterized, Reflected, Typed,
};
pub use mirror::Mirror;

pub use mirror_sdk::{Annotation, ClassId, Modifiers, ReflectContext, Value};
