//! Accessibility overrides
//!
//! Visibility is enforced per member: public members of public classes are
//! always usable, everything else needs an override. Overrides are granted
//! per member and are permanent. Sealed classes refuse overrides for all
//! of their members.

use mirror_sdk::{ClassId, MemberRef};
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

/// Override and sealing state shared by all handles to a runtime
#[derive(Debug, Default)]
pub(crate) struct AccessTable {
    overrides: RwLock<FxHashSet<MemberRef>>,
    sealed: RwLock<FxHashSet<ClassId>>,
}

impl AccessTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether an override was granted for the member
    pub(crate) fn is_overridden(&self, member: MemberRef) -> bool {
        self.overrides.read().contains(&member)
    }

    /// Grant an override. Returns false if the declaring class is sealed.
    /// Granting twice is the same as granting once.
    pub(crate) fn grant(&self, member: MemberRef) -> bool {
        if self.is_sealed(member.declaring_class()) {
            return false;
        }
        self.overrides.write().insert(member);
        true
    }

    /// Refuse future overrides for members of `class`
    pub(crate) fn seal(&self, class: ClassId) {
        self.sealed.write().insert(class);
    }

    /// Whether `class` refuses overrides
    pub(crate) fn is_sealed(&self, class: ClassId) -> bool {
        self.sealed.read().contains(&class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_sdk::MethodId;

    fn method(class: u32) -> MemberRef {
        MemberRef::Method(MethodId {
            class: ClassId::new(class),
            index: 0,
        })
    }

    #[test]
    fn test_grant_is_idempotent() {
        let table = AccessTable::new();
        assert!(!table.is_overridden(method(1)));
        assert!(table.grant(method(1)));
        assert!(table.grant(method(1)));
        assert!(table.is_overridden(method(1)));
    }

    #[test]
    fn test_sealed_class_refuses_override() {
        let table = AccessTable::new();
        table.seal(ClassId::new(2));

        assert!(!table.grant(method(2)));
        assert!(!table.is_overridden(method(2)));
        assert!(table.grant(method(3)));
    }
}
