//! Class registry for the runtime

use mirror_sdk::{ClassId, ClassInfo, ConstructorInfo, FieldInfo, MethodInfo, Value};
use rustc_hash::FxHashMap;

use crate::builder::{ConstructorBody, MethodBody};

/// Registered constructor: record plus executable body
#[derive(Clone)]
pub(crate) struct ConstructorEntry {
    pub(crate) info: ConstructorInfo,
    pub(crate) body: ConstructorBody,
}

/// Registered method: record plus executable body
#[derive(Clone)]
pub(crate) struct MethodEntry {
    pub(crate) info: MethodInfo,
    pub(crate) body: MethodBody,
}

/// Registered field: record plus the value new slots start with
#[derive(Debug, Clone)]
pub(crate) struct FieldEntry {
    pub(crate) info: FieldInfo,
    pub(crate) initial: Value,
}

/// A fully defined class
#[derive(Clone)]
pub(crate) struct ClassDef {
    pub(crate) info: ClassInfo,
    pub(crate) constructors: Vec<ConstructorEntry>,
    pub(crate) methods: Vec<MethodEntry>,
    pub(crate) fields: Vec<FieldEntry>,
}

/// Registry of defined classes, indexed by ID and by qualified name
#[derive(Default)]
pub(crate) struct ClassRegistry {
    /// Classes indexed by ID
    classes: Vec<ClassDef>,
    /// Qualified name to ID mapping
    name_to_id: FxHashMap<String, ClassId>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// ID the next registered class will receive
    pub(crate) fn next_class_id(&self) -> ClassId {
        ClassId::new(self.classes.len() as u32)
    }

    /// Register a class; its ID must be `next_class_id()`
    pub(crate) fn register_class(&mut self, class: ClassDef) -> ClassId {
        let id = class.info.id;
        debug_assert_eq!(id, self.next_class_id());
        self.name_to_id.insert(class.info.name.clone(), id);
        self.classes.push(class);
        id
    }

    /// Get class by ID
    pub(crate) fn get_class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(id.index())
    }

    /// Get class ID by qualified name
    pub(crate) fn get_class_id(&self, name: &str) -> Option<ClassId> {
        self.name_to_id.get(name).copied()
    }

    /// Check whether a name is taken
    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Number of registered classes
    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    /// Walk `id` and its superclasses, most derived first
    pub(crate) fn hierarchy(&self, id: ClassId) -> Vec<&ClassDef> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(class_id) = current {
            match self.get_class(class_id) {
                Some(class) => {
                    chain.push(class);
                    current = class.info.superclass;
                }
                None => break,
            }
        }
        chain
    }
}
