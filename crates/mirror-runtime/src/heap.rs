//! Object storage
//!
//! Instances are field maps keyed by `FieldId`, so inherited fields with
//! the same name as a subclass field never collide. Objects stay live until
//! they are freed explicitly; dropping a `Value` does not free anything.

use std::sync::atomic::{AtomicU64, Ordering};

use mirror_sdk::{ClassId, FieldId, ObjectRef, Value};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Instance {
    fields: FxHashMap<FieldId, Value>,
}

/// Heap of live objects
#[derive(Debug, Default)]
pub(crate) struct Heap {
    objects: RwLock<FxHashMap<u64, Instance>>,
    next_id: AtomicU64,
}

impl Heap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate an object with the given initial field slots
    pub(crate) fn allocate(
        &self,
        class: ClassId,
        fields: impl IntoIterator<Item = (FieldId, Value)>,
    ) -> ObjectRef {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let instance = Instance {
            fields: fields.into_iter().collect(),
        };
        self.objects.write().insert(id, instance);
        ObjectRef::new(id, class)
    }

    /// Read a slot (None if the object or slot does not exist)
    pub(crate) fn read(&self, object: ObjectRef, field: FieldId) -> Option<Value> {
        self.objects
            .read()
            .get(&object.id())
            .and_then(|instance| instance.fields.get(&field).cloned())
    }

    /// Write a slot; returns false if the object or slot does not exist
    pub(crate) fn write(&self, object: ObjectRef, field: FieldId, value: Value) -> bool {
        let mut objects = self.objects.write();
        match objects
            .get_mut(&object.id())
            .and_then(|instance| instance.fields.get_mut(&field))
        {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Drop an object; false if it was not live
    pub(crate) fn free(&self, object: ObjectRef) -> bool {
        self.objects.write().remove(&object.id()).is_some()
    }

    /// Number of live objects
    pub(crate) fn len(&self) -> usize {
        self.objects.read().len()
    }
}
