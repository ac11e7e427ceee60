//! The in-memory reflection platform

use mirror_sdk::{
    ClassId, ClassInfo, ClassKind, ConstructorId, ConstructorInfo, FieldId, FieldInfo, MemberRef,
    MethodId, MethodInfo, Modifiers, ParameterInfo, PlatformError, PlatformResult, ReflectContext,
    Value,
};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::access::AccessTable;
use crate::bootstrap::{self, core_class_ids};
use crate::builder::{ClassBuilder, Param};
use crate::error::DefineError;
use crate::heap::Heap;
use crate::registry::{ClassDef, ClassRegistry, ConstructorEntry, FieldEntry, MethodEntry};

/// In-memory reflection platform.
///
/// Holds the class registry, the object heap, static field storage and the
/// accessibility override table. All state sits behind locks, so a
/// `Runtime` can be shared across threads by reference.
pub struct Runtime {
    registry: RwLock<ClassRegistry>,
    heap: Heap,
    statics: RwLock<FxHashMap<FieldId, Value>>,
    access: AccessTable,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Create a runtime with the core types installed
    pub fn new() -> Self {
        let runtime = Self {
            registry: RwLock::new(ClassRegistry::new()),
            heap: Heap::new(),
            statics: RwLock::new(FxHashMap::default()),
            access: AccessTable::new(),
        };
        {
            let mut registry = runtime.registry.write();
            bootstrap::install(&runtime, &mut registry);
        }
        runtime
    }

    // ========================================================================
    // Class Definition
    // ========================================================================

    /// ID the next defined class will receive (for self-referencing members)
    pub fn next_class_id(&self) -> ClassId {
        self.registry.read().next_class_id()
    }

    /// Validate and register a class
    pub fn define(&self, builder: ClassBuilder) -> Result<ClassId, DefineError> {
        let mut registry = self.registry.write();
        Self::validate(&registry, &builder)?;
        let id = self.register(&mut registry, builder);
        tracing::debug!(%id, "defined class");
        Ok(id)
    }

    fn validate(registry: &ClassRegistry, builder: &ClassBuilder) -> Result<(), DefineError> {
        if builder.name.is_empty() {
            return Err(DefineError::EmptyName);
        }
        if registry.contains_name(&builder.name) {
            return Err(DefineError::DuplicateClass(builder.name.clone()));
        }

        let own_id = registry.next_class_id();
        let known = |ty: ClassId| ty == own_id || registry.get_class(ty).is_some();
        let check = |ty: ClassId, context: String| {
            if known(ty) {
                Ok(())
            } else {
                Err(DefineError::UnknownType { ty, context })
            }
        };

        if let Some(superclass) = builder.superclass {
            let parent = registry
                .get_class(superclass)
                .ok_or_else(|| DefineError::UnknownType {
                    ty: superclass,
                    context: format!("superclass of {}", builder.name),
                })?;
            let reason = if builder.kind != ClassKind::Class {
                Some("only classes have superclasses")
            } else if parent.info.kind != ClassKind::Class {
                Some("superclass is not a class")
            } else if parent.info.modifiers.is_final() {
                Some("superclass is final")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(DefineError::InvalidSuperclass {
                    class: builder.name.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        for &interface in &builder.interfaces {
            let target = registry
                .get_class(interface)
                .ok_or_else(|| DefineError::UnknownType {
                    ty: interface,
                    context: format!("interfaces of {}", builder.name),
                })?;
            if !matches!(target.info.kind, ClassKind::Interface | ClassKind::Annotation) {
                return Err(DefineError::NotAnInterface {
                    class: builder.name.clone(),
                    interface,
                });
            }
        }

        let annotations = builder
            .annotations
            .iter()
            .chain(builder.constructors.iter().flat_map(|c| &c.annotations))
            .chain(builder.methods.iter().flat_map(|m| &m.annotations))
            .chain(builder.fields.iter().flat_map(|f| &f.annotations));
        for annotation in annotations {
            check(annotation.ty, format!("an annotation in {}", builder.name))?;
        }

        for constructor in &builder.constructors {
            for param in &constructor.params {
                check(param.ty, format!("constructor parameter {}", param.name))?;
            }
        }
        for method in &builder.methods {
            check(method.return_type, format!("return type of {}", method.name))?;
            for param in &method.params {
                check(param.ty, format!("parameter {} of {}", param.name, method.name))?;
            }
        }
        for field in &builder.fields {
            check(field.ty, format!("field {}", field.name))?;
        }

        Ok(())
    }

    pub(crate) fn register(&self, registry: &mut ClassRegistry, builder: ClassBuilder) -> ClassId {
        let id = registry.next_class_id();

        let superclass = match builder.kind {
            ClassKind::Class if id != core_class_ids::OBJECT => {
                Some(builder.superclass.unwrap_or(core_class_ids::OBJECT))
            }
            _ => None,
        };
        let mut interfaces = builder.interfaces;
        if builder.kind == ClassKind::Annotation && !interfaces.contains(&core_class_ids::ANNOTATION)
        {
            interfaces.push(core_class_ids::ANNOTATION);
        }

        let simple_name = builder
            .name
            .rsplit('.')
            .next()
            .unwrap_or(&builder.name)
            .to_string();

        let constructors = builder
            .constructors
            .into_iter()
            .enumerate()
            .map(|(index, def)| ConstructorEntry {
                info: ConstructorInfo {
                    id: ConstructorId {
                        class: id,
                        index: index as u32,
                    },
                    modifiers: def.modifiers,
                    parameters: parameter_infos(def.params),
                    annotations: def.annotations,
                },
                body: def.body,
            })
            .collect();

        let methods = builder
            .methods
            .into_iter()
            .enumerate()
            .map(|(index, def)| MethodEntry {
                info: MethodInfo {
                    id: MethodId {
                        class: id,
                        index: index as u32,
                    },
                    name: def.name,
                    modifiers: def.modifiers,
                    parameters: parameter_infos(def.params),
                    return_type: def.return_type,
                    annotations: def.annotations,
                },
                body: def.body,
            })
            .collect();

        let fields: Vec<FieldEntry> = builder
            .fields
            .into_iter()
            .enumerate()
            .map(|(index, def)| FieldEntry {
                initial: def.initial.unwrap_or_else(|| zero_value(def.ty)),
                info: FieldInfo {
                    id: FieldId {
                        class: id,
                        index: index as u32,
                    },
                    name: def.name,
                    modifiers: def.modifiers,
                    ty: def.ty,
                    annotations: def.annotations,
                },
            })
            .collect();

        {
            let mut statics = self.statics.write();
            for field in fields.iter().filter(|f| f.info.modifiers.is_static()) {
                statics.insert(field.info.id, field.initial.clone());
            }
        }

        registry.register_class(ClassDef {
            info: ClassInfo {
                id,
                name: builder.name,
                simple_name,
                kind: builder.kind,
                superclass,
                interfaces,
                modifiers: builder.modifiers,
                annotations: builder.annotations,
            },
            constructors,
            methods,
            fields,
        })
    }

    // ========================================================================
    // Platform Administration
    // ========================================================================

    /// Refuse accessibility overrides for every member of `class`
    pub fn seal_class(&self, class: ClassId) {
        self.access.seal(class);
        tracing::debug!(%class, "sealed class against accessibility overrides");
    }

    /// Number of defined classes (core types included)
    pub fn class_count(&self) -> usize {
        self.registry.read().len()
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.heap.len()
    }

    /// Free the storage of an object.
    ///
    /// Handles are plain values, so the runtime cannot see when the last copy
    /// is dropped; callers release objects they no longer need. Reads and
    /// writes through a released handle fail with
    /// [`PlatformError::UnknownMember`]. Returns false for non-objects and
    /// for objects already released.
    pub fn release(&self, value: &Value) -> bool {
        let released = value
            .as_object()
            .is_some_and(|object| self.heap.free(object));
        if released {
            tracing::trace!(%value, "released object");
        }
        released
    }

    /// Whether `value` is an instance of `class` (false for null)
    pub fn instance_of(&self, value: &Value, class: ClassId) -> bool {
        self.type_of(value)
            .is_some_and(|ty| self.is_assignable(class, ty))
    }

    // ========================================================================
    // Direct Field Access (for member bodies; bypasses visibility)
    // ========================================================================

    fn resolve_instance_field(&self, object: &Value, name: &str) -> PlatformResult<FieldId> {
        let obj = object.as_object().ok_or_else(|| {
            PlatformError::IllegalArgument(format!("{} is not an object", object.type_name()))
        })?;
        let registry = self.registry.read();
        let found = registry
            .hierarchy(obj.class())
            .into_iter()
            .flat_map(|class| class.fields.iter())
            .find(|field| field.info.name == name && !field.info.modifiers.is_static())
            .map(|field| field.info.id);
        found.ok_or_else(|| PlatformError::UnknownMember(format!("field {}", name)))
    }

    /// Read an instance field by name, searching the object's class first
    pub fn read_field(&self, object: &Value, name: &str) -> PlatformResult<Value> {
        let field = self.resolve_instance_field(object, name)?;
        object
            .as_object()
            .and_then(|obj| self.heap.read(obj, field))
            .ok_or_else(|| PlatformError::UnknownMember(format!("field {}", name)))
    }

    /// Write an instance field by name, searching the object's class first
    pub fn write_field(&self, object: &Value, name: &str, value: Value) -> PlatformResult<()> {
        let field = self.resolve_instance_field(object, name)?;
        match object.as_object() {
            Some(obj) if self.heap.write(obj, field, value) => Ok(()),
            _ => Err(PlatformError::UnknownMember(format!("field {}", name))),
        }
    }

    // ========================================================================
    // Invocation Checks
    // ========================================================================

    fn is_primitive(&self, ty: ClassId) -> bool {
        self.registry
            .read()
            .get_class(ty)
            .is_some_and(|class| class.info.is_primitive())
    }

    fn member_modifiers(&self, member: MemberRef) -> Option<(Modifiers, Modifiers)> {
        let registry = self.registry.read();
        let class = registry.get_class(member.declaring_class())?;
        let modifiers = match member {
            MemberRef::Constructor(id) => class.constructors.get(id.index as usize)?.info.modifiers,
            MemberRef::Method(id) => class.methods.get(id.index as usize)?.info.modifiers,
            MemberRef::Field(id) => class.fields.get(id.index as usize)?.info.modifiers,
        };
        Some((class.info.modifiers, modifiers))
    }

    fn check_access(&self, member: MemberRef) -> PlatformResult<()> {
        if self.can_access(member, None) {
            Ok(())
        } else {
            Err(PlatformError::IllegalAccess(format!(
                "{:?} is not accessible",
                member
            )))
        }
    }

    fn check_arguments(&self, params: &[ParameterInfo], args: &[Value]) -> PlatformResult<()> {
        if params.len() != args.len() {
            return Err(PlatformError::IllegalArgument(format!(
                "wrong number of arguments: expected {}, got {}",
                params.len(),
                args.len()
            )));
        }
        for (param, arg) in params.iter().zip(args) {
            match self.type_of(arg) {
                None if self.is_primitive(param.ty) => {
                    return Err(PlatformError::IllegalArgument(format!(
                        "null passed to primitive parameter {}",
                        param.name
                    )));
                }
                Some(ty) if !self.is_assignable(param.ty, ty) => {
                    return Err(PlatformError::IllegalArgument(format!(
                        "argument type mismatch at index {}",
                        param.index
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn require_receiver<'v>(
        &self,
        class: ClassId,
        receiver: Option<&'v Value>,
        member: &str,
    ) -> PlatformResult<&'v Value> {
        let receiver = receiver.filter(|r| !r.is_null()).ok_or_else(|| {
            PlatformError::IllegalArgument(format!("null receiver for instance member {}", member))
        })?;
        if !self.instance_of(receiver, class) {
            return Err(PlatformError::IllegalArgument(format!(
                "receiver is not an instance of the class declaring {}",
                member
            )));
        }
        Ok(receiver)
    }

    fn field_entry(&self, field: FieldId) -> PlatformResult<FieldEntry> {
        self.registry
            .read()
            .get_class(field.class)
            .and_then(|class| class.fields.get(field.index as usize).cloned())
            .ok_or_else(|| PlatformError::UnknownMember(format!("{:?}", field)))
    }
}

fn parameter_infos(params: Vec<Param>) -> Vec<ParameterInfo> {
    params
        .into_iter()
        .enumerate()
        .map(|(index, param)| ParameterInfo {
            name: param.name,
            ty: param.ty,
            index,
            annotations: param.annotations,
        })
        .collect()
}

fn zero_value(ty: ClassId) -> Value {
    match ty {
        core_class_ids::INT => Value::Int(0),
        core_class_ids::LONG => Value::Long(0),
        core_class_ids::DOUBLE => Value::Double(0.0),
        core_class_ids::BOOLEAN => Value::Bool(false),
        _ => Value::Null,
    }
}

impl ReflectContext for Runtime {
    fn class_info(&self, class: ClassId) -> Option<ClassInfo> {
        self.registry
            .read()
            .get_class(class)
            .map(|class| class.info.clone())
    }

    fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.registry.read().get_class_id(name)
    }

    fn declared_constructors(&self, class: ClassId) -> Vec<ConstructorInfo> {
        self.registry
            .read()
            .get_class(class)
            .map(|class| class.constructors.iter().map(|c| c.info.clone()).collect())
            .unwrap_or_default()
    }

    fn declared_methods(&self, class: ClassId) -> Vec<MethodInfo> {
        self.registry
            .read()
            .get_class(class)
            .map(|class| class.methods.iter().map(|m| m.info.clone()).collect())
            .unwrap_or_default()
    }

    fn declared_fields(&self, class: ClassId) -> Vec<FieldInfo> {
        self.registry
            .read()
            .get_class(class)
            .map(|class| class.fields.iter().map(|f| f.info.clone()).collect())
            .unwrap_or_default()
    }

    fn is_assignable(&self, target: ClassId, source: ClassId) -> bool {
        if target == source {
            return true;
        }

        let registry = self.registry.read();
        let (Some(target_class), Some(source_class)) =
            (registry.get_class(target), registry.get_class(source))
        else {
            return false;
        };
        if target_class.info.is_primitive() || source_class.info.is_primitive() {
            return false;
        }
        if target == core_class_ids::OBJECT {
            return true;
        }

        let mut pending = vec![source];
        let mut seen = FxHashSet::default();
        while let Some(current) = pending.pop() {
            if current == target {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(class) = registry.get_class(current) {
                pending.extend(class.info.superclass);
                pending.extend(class.info.interfaces.iter().copied());
            }
        }
        false
    }

    fn type_of(&self, value: &Value) -> Option<ClassId> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(core_class_ids::BOOLEAN),
            Value::Int(_) => Some(core_class_ids::INT),
            Value::Long(_) => Some(core_class_ids::LONG),
            Value::Double(_) => Some(core_class_ids::DOUBLE),
            Value::Str(_) => Some(core_class_ids::STRING),
            Value::Object(obj) => Some(obj.class()),
        }
    }

    fn can_access(&self, member: MemberRef, receiver: Option<&Value>) -> bool {
        if let Some(receiver_type) = receiver.and_then(|r| self.type_of(r)) {
            if !self.is_assignable(member.declaring_class(), receiver_type) {
                return false;
            }
        }
        if self.access.is_overridden(member) {
            return true;
        }
        self.member_modifiers(member)
            .is_some_and(|(class, member)| class.is_public() && member.is_public())
    }

    fn set_accessible(&self, member: MemberRef) -> bool {
        if self.member_modifiers(member).is_none() {
            return false;
        }
        let granted = self.access.grant(member);
        if granted {
            tracing::debug!(?member, "accessibility override granted");
        } else {
            tracing::debug!(?member, "accessibility override refused by sealed class");
        }
        granted
    }

    fn new_instance(&self, constructor: ConstructorId, args: &[Value]) -> PlatformResult<Value> {
        let (entry, slots) = {
            let registry = self.registry.read();
            let class = registry
                .get_class(constructor.class)
                .ok_or(PlatformError::UnknownClass(constructor.class))?;
            if class.info.kind != ClassKind::Class || class.info.modifiers.is_abstract() {
                return Err(PlatformError::Instantiation(format!(
                    "{} is not instantiable",
                    class.info.name
                )));
            }
            let entry = class
                .constructors
                .get(constructor.index as usize)
                .cloned()
                .ok_or_else(|| PlatformError::UnknownMember(format!("{:?}", constructor)))?;
            let slots: Vec<(FieldId, Value)> = registry
                .hierarchy(constructor.class)
                .into_iter()
                .flat_map(|class| class.fields.iter())
                .filter(|field| !field.info.modifiers.is_static())
                .map(|field| (field.info.id, field.initial.clone()))
                .collect();
            (entry, slots)
        };

        self.check_access(MemberRef::Constructor(constructor))?;
        self.check_arguments(&entry.info.parameters, args)?;

        let object = Value::Object(self.heap.allocate(constructor.class, slots));
        (entry.body)(self, &object, args)?;
        Ok(object)
    }

    fn invoke(
        &self,
        method: MethodId,
        receiver: Option<&Value>,
        args: &[Value],
    ) -> PlatformResult<Value> {
        let entry = self
            .registry
            .read()
            .get_class(method.class)
            .and_then(|class| class.methods.get(method.index as usize).cloned())
            .ok_or_else(|| PlatformError::UnknownMember(format!("{:?}", method)))?;

        self.check_access(MemberRef::Method(method))?;
        let receiver = if entry.info.modifiers.is_static() {
            None
        } else {
            Some(self.require_receiver(method.class, receiver, &entry.info.name)?)
        };
        self.check_arguments(&entry.info.parameters, args)?;

        (entry.body)(self, receiver, args)
    }

    fn get_field(&self, field: FieldId, receiver: Option<&Value>) -> PlatformResult<Value> {
        let entry = self.field_entry(field)?;
        self.check_access(MemberRef::Field(field))?;

        if entry.info.modifiers.is_static() {
            return self
                .statics
                .read()
                .get(&field)
                .cloned()
                .ok_or_else(|| PlatformError::UnknownMember(entry.info.name.clone()));
        }

        let receiver = self.require_receiver(field.class, receiver, &entry.info.name)?;
        receiver
            .as_object()
            .and_then(|obj| self.heap.read(obj, field))
            .ok_or_else(|| PlatformError::UnknownMember(entry.info.name.clone()))
    }

    fn set_field(
        &self,
        field: FieldId,
        receiver: Option<&Value>,
        value: Value,
    ) -> PlatformResult<()> {
        let entry = self.field_entry(field)?;
        self.check_access(MemberRef::Field(field))?;

        let member = MemberRef::Field(field);
        if entry.info.modifiers.is_final()
            && (entry.info.modifiers.is_static() || !self.access.is_overridden(member))
        {
            return Err(PlatformError::IllegalAccess(format!(
                "cannot write final field {}",
                entry.info.name
            )));
        }
        match self.type_of(&value) {
            None if self.is_primitive(entry.info.ty) => {
                return Err(PlatformError::IllegalArgument(format!(
                    "null written to primitive field {}",
                    entry.info.name
                )));
            }
            Some(ty) if !self.is_assignable(entry.info.ty, ty) => {
                return Err(PlatformError::IllegalArgument(format!(
                    "value of wrong type written to field {}",
                    entry.info.name
                )));
            }
            _ => {}
        }

        if entry.info.modifiers.is_static() {
            self.statics.write().insert(field, value);
            return Ok(());
        }

        let receiver = self.require_receiver(field.class, receiver, &entry.info.name)?;
        match receiver.as_object() {
            Some(obj) if self.heap.write(obj, field, value) => Ok(()),
            _ => Err(PlatformError::UnknownMember(entry.info.name.clone())),
        }
    }
}
