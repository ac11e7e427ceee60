//! Mirror Runtime - an in-memory reflection platform
//!
//! Implements [`mirror_sdk::ReflectContext`] over a class registry whose
//! members are Rust closures. Classes are declared with a [`ClassBuilder`]
//! and registered with [`Runtime::define`].
//!
//! Objects created through [`ReflectContext::new_instance`] live until
//! [`Runtime::release`] frees them.
//!
//! [`ReflectContext::new_instance`]: mirror_sdk::ReflectContext::new_instance
//!
//! ```ignore
//! use mirror_runtime::{core_class_ids::*, ClassBuilder, ConstructorDef, FieldDef, Param, Runtime};
//! use mirror_sdk::Modifiers;
//!
//! let runtime = Runtime::new();
//! let user = runtime.define(
//!     ClassBuilder::class("app.User")
//!         .field(FieldDef::new("name", STRING, Modifiers::PRIVATE))
//!         .constructor(
//!             ConstructorDef::new(Modifiers::PUBLIC)
//!                 .param(Param::new("name", STRING))
//!                 .body(|rt, this, args| rt.write_field(this, "name", args[0].clone())),
//!         ),
//! )?;
//! ```

#![warn(missing_docs)]

mod access;
mod bootstrap;
mod builder;
mod error;
mod heap;
mod registry;
mod runtime;

pub use bootstrap::core_class_ids;
pub use builder::{
    ClassBuilder, ConstructorBody, ConstructorDef, FieldDef, MethodBody, MethodDef, Param,
};
pub use error::DefineError;
pub use runtime::Runtime;
