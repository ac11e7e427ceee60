//! Raw introspection records
//!
//! These are the platform's own descriptions of classes and their members.
//! The facade wraps them; it never builds them itself.

use std::fmt;

use crate::value::Value;

// ============================================================================
// Handles
// ============================================================================

/// Identifier of a class (or any type: primitives and annotations are classes too)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u32);

impl ClassId {
    /// Create from a raw index
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw index
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class#{}", self.0)
    }
}

/// Constructor handle: declaring class plus declaration slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConstructorId {
    /// Declaring class
    pub class: ClassId,
    /// Position in the class's constructor list
    pub index: u32,
}

/// Method handle: declaring class plus declaration slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodId {
    /// Declaring class
    pub class: ClassId,
    /// Position in the class's method list
    pub index: u32,
}

/// Field handle: declaring class plus declaration slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    /// Declaring class
    pub class: ClassId,
    /// Position in the class's field list
    pub index: u32,
}

/// Any invocable or accessible member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberRef {
    /// A constructor
    Constructor(ConstructorId),
    /// A method
    Method(MethodId),
    /// A field
    Field(FieldId),
}

impl MemberRef {
    /// Class declaring the member
    pub fn declaring_class(&self) -> ClassId {
        match self {
            MemberRef::Constructor(id) => id.class,
            MemberRef::Method(id) => id.class,
            MemberRef::Field(id) => id.class,
        }
    }
}

// ============================================================================
// Modifiers
// ============================================================================

/// Member and class modifier flags (bitflags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u16);

impl Modifiers {
    /// No modifiers: package-private, instance, non-final
    pub const NONE: Self = Self(0x0000);
    /// Public visibility
    pub const PUBLIC: Self = Self(0x0001);
    /// Private visibility
    pub const PRIVATE: Self = Self(0x0002);
    /// Protected visibility
    pub const PROTECTED: Self = Self(0x0004);
    /// Static member
    pub const STATIC: Self = Self(0x0008);
    /// Final member or class
    pub const FINAL: Self = Self(0x0010);
    /// Abstract member or class
    pub const ABSTRACT: Self = Self(0x0400);

    /// Create from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if all flags of `other` are set
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of flags
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Public visibility
    pub const fn is_public(&self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// Private visibility
    pub const fn is_private(&self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// Protected visibility
    pub const fn is_protected(&self) -> bool {
        self.contains(Self::PROTECTED)
    }

    /// None of public, protected or private
    pub const fn is_package_private(&self) -> bool {
        !self.is_public() && !self.is_protected() && !self.is_private()
    }

    /// Static member
    pub const fn is_static(&self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Final member or class
    pub const fn is_final(&self) -> bool {
        self.contains(Self::FINAL)
    }

    /// Abstract member or class
    pub const fn is_abstract(&self) -> bool {
        self.contains(Self::ABSTRACT)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// ============================================================================
// Annotations
// ============================================================================

/// An annotation instance attached to a class, member or parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Annotation type
    pub ty: ClassId,
    /// Element values in declaration order
    pub values: Vec<(String, Value)>,
}

impl Annotation {
    /// Marker annotation (no elements)
    pub fn marker(ty: ClassId) -> Self {
        Self {
            ty,
            values: Vec::new(),
        }
    }

    /// Add an element value
    pub fn with_value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.values.push((name.to_string(), value.into()));
        self
    }

    /// Look up an element value by name
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

// ============================================================================
// Member records
// ============================================================================

/// Kind of type a class record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Ordinary class
    Class,
    /// Interface
    Interface,
    /// Annotation type
    Annotation,
    /// Primitive (int, long, double, boolean, void)
    Primitive,
}

/// Raw class record
#[derive(Debug, Clone, PartialEq)]
pub struct ClassInfo {
    /// Class ID
    pub id: ClassId,
    /// Qualified name, e.g. `lang.String`
    pub name: String,
    /// Simple name, e.g. `String`
    pub simple_name: String,
    /// Kind of type
    pub kind: ClassKind,
    /// Direct superclass (None for roots, interfaces and primitives)
    pub superclass: Option<ClassId>,
    /// Directly implemented interfaces
    pub interfaces: Vec<ClassId>,
    /// Class modifiers
    pub modifiers: Modifiers,
    /// Class annotations
    pub annotations: Vec<Annotation>,
}

impl ClassInfo {
    /// Whether values of this type can never be null
    pub fn is_primitive(&self) -> bool {
        self.kind == ClassKind::Primitive
    }
}

/// Raw parameter record
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterInfo {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub ty: ClassId,
    /// Position in the parameter list
    pub index: usize,
    /// Parameter annotations
    pub annotations: Vec<Annotation>,
}

/// Raw constructor record
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorInfo {
    /// Constructor handle
    pub id: ConstructorId,
    /// Modifiers
    pub modifiers: Modifiers,
    /// Parameters in order
    pub parameters: Vec<ParameterInfo>,
    /// Constructor annotations
    pub annotations: Vec<Annotation>,
}

/// Raw method record
#[derive(Debug, Clone, PartialEq)]
pub struct MethodInfo {
    /// Method handle
    pub id: MethodId,
    /// Method name
    pub name: String,
    /// Modifiers
    pub modifiers: Modifiers,
    /// Parameters in order
    pub parameters: Vec<ParameterInfo>,
    /// Declared return type (`void` for no value)
    pub return_type: ClassId,
    /// Method annotations
    pub annotations: Vec<Annotation>,
}

/// Raw field record
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    /// Field handle
    pub id: FieldId,
    /// Field name
    pub name: String,
    /// Modifiers
    pub modifiers: Modifiers,
    /// Declared type
    pub ty: ClassId,
    /// Field annotations
    pub annotations: Vec<Annotation>,
}
