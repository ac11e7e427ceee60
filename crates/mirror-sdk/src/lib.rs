//! Mirror SDK - the reflection platform capability
//!
//! This crate defines what the mirror facade needs from a reflection
//! platform: raw class and member records, dynamic values, and the
//! [`ReflectContext`] trait through which classes are introspected and
//! members invoked. It contains no facade logic.
//!
//! # Example
//!
//! ```ignore
//! use mirror_sdk::{ReflectContext, Value};
//!
//! fn describe(ctx: &dyn ReflectContext, value: &Value) -> Option<String> {
//!     let class = ctx.type_of(value)?;
//!     ctx.class_info(class).map(|info| info.name)
//! }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod types;
pub mod value;

pub use context::ReflectContext;
pub use error::{PlatformError, PlatformResult};
pub use types::{
    Annotation, ClassId, ClassInfo, ClassKind, ConstructorId, ConstructorInfo, FieldId, FieldInfo,
    MemberRef, MethodId, MethodInfo, Modifiers, ParameterInfo,
};
pub use value::{ObjectRef, Value};
