//! ReflectContext trait, the platform reflection capability
//!
//! Defines the interface a reflection platform implements. The mirror
//! facade programs against this trait only, so any platform (or a test
//! double) can be substituted.

use crate::error::PlatformResult;
use crate::types::{
    ClassId, ClassInfo, ConstructorId, ConstructorInfo, FieldId, FieldInfo, MemberRef, MethodId,
    MethodInfo,
};
use crate::value::Value;

/// Abstract reflection platform.
///
/// Every query is a read of in-process metadata; nothing here blocks or
/// performs I/O. Implementations must be safe to share across threads.
pub trait ReflectContext: Send + Sync {
    // ========================================================================
    // Class Introspection
    // ========================================================================

    /// Get the class record for an ID
    fn class_info(&self, class: ClassId) -> Option<ClassInfo>;

    /// Find a class by qualified name
    fn class_by_name(&self, name: &str) -> Option<ClassId>;

    /// Declared constructors, in declaration order
    fn declared_constructors(&self, class: ClassId) -> Vec<ConstructorInfo>;

    /// Declared methods, in declaration order
    fn declared_methods(&self, class: ClassId) -> Vec<MethodInfo>;

    /// Declared fields, in declaration order
    fn declared_fields(&self, class: ClassId) -> Vec<FieldInfo>;

    // ========================================================================
    // Type Relations
    // ========================================================================

    /// Whether a value of `source` can be stored where `target` is expected.
    ///
    /// Reflexive: every type is assignable to itself.
    fn is_assignable(&self, target: ClassId, source: ClassId) -> bool;

    /// Runtime type of a value (None for null)
    fn type_of(&self, value: &Value) -> Option<ClassId>;

    // ========================================================================
    // Accessibility
    // ========================================================================

    /// Whether the member can be used right now without an override
    fn can_access(&self, member: MemberRef, receiver: Option<&Value>) -> bool;

    /// Suppress visibility checks for the member. Returns false when the
    /// platform refuses the override.
    fn set_accessible(&self, member: MemberRef) -> bool;

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Run a constructor and return the new instance
    fn new_instance(&self, constructor: ConstructorId, args: &[Value]) -> PlatformResult<Value>;

    /// Invoke a method (receiver is None for static methods)
    fn invoke(
        &self,
        method: MethodId,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> PlatformResult<Value>;

    /// Read a field (receiver is None for static fields)
    fn get_field(&self, field: FieldId, receiver: Option<&Value>) -> PlatformResult<Value>;

    /// Write a field (receiver is None for static fields)
    fn set_field(
        &self,
        field: FieldId,
        receiver: Option<&Value>,
        value: Value,
    ) -> PlatformResult<()>;
}
