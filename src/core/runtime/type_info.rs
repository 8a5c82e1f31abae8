use super::errors::InvokeError;
use super::object::ObjectRef;
use crate::core::types::ValueType;
use crate::core::values::TypedValue;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Type-erased body of a property accessor, indexer accessor or method.
/// Receives the target instance (`None` for static members) and the arguments.
pub type MemberBody =
    Arc<dyn Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync>;

/// Type-erased constructor body, run on a default-initialized instance
pub type ConstructorBody = Arc<dyn Fn(&ObjectRef, &[TypedValue]) -> Result<(), InvokeError> + Send + Sync>;

/// Instance or static field declaration
#[derive(Clone)]
pub struct FieldInfo {
    pub name: String,
    pub value_type: ValueType,
    pub slot: usize,
    default: TypedValue,
}

/// Property declaration; a missing setter makes the property read-only
#[derive(Clone)]
pub struct PropertyInfo {
    pub name: String,
    pub value_type: ValueType,
    pub is_static: bool,
    pub(crate) getter: Option<MemberBody>,
    pub(crate) setter: Option<MemberBody>,
}

impl PropertyInfo {
    pub fn can_read(&self) -> bool {
        self.getter.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }
}

/// Indexer declaration. The getter receives the index arguments; the setter
/// receives the index arguments followed by the value.
#[derive(Clone)]
pub struct IndexerInfo {
    pub index_types: Vec<ValueType>,
    pub value_type: ValueType,
    pub(crate) getter: MemberBody,
    pub(crate) setter: Option<MemberBody>,
}

#[derive(Clone)]
pub struct ConstructorInfo {
    pub params: Vec<ValueType>,
    pub(crate) body: ConstructorBody,
}

#[derive(Clone)]
pub struct MethodInfo {
    pub name: String,
    pub params: Vec<ValueType>,
    pub return_type: ValueType,
    pub is_static: bool,
    pub(crate) body: MemberBody,
}

/// A type published by an external module and discovered at runtime
pub struct RuntimeType {
    key: Uuid,
    name: String,
    namespace: String,
    base: Option<Arc<RuntimeType>>,
    fields: Vec<FieldInfo>,
    static_fields: Vec<FieldInfo>,
    static_slots: Mutex<Vec<TypedValue>>,
    properties: Vec<PropertyInfo>,
    indexers: Vec<IndexerInfo>,
    constructors: Vec<ConstructorInfo>,
    methods: Vec<MethodInfo>,
}

impl RuntimeType {
    /// Start declaring a new runtime type
    pub fn builder(namespace: &str, name: &str) -> RuntimeTypeBuilder {
        RuntimeTypeBuilder::new(namespace, name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespace-qualified name
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn base(&self) -> Option<&Arc<RuntimeType>> {
        self.base.as_ref()
    }

    /// Iterate this type followed by its base chain
    pub fn ancestry(&self) -> impl Iterator<Item = &RuntimeType> {
        std::iter::successors(Some(self), |t| {
            let t: &RuntimeType = *t;
            t.base.as_deref()
        })
    }

    /// True when this type is `other` or derives from it
    pub fn is_assignable_to(&self, other: &RuntimeType) -> bool {
        self.ancestry().any(|t| t.key == other.key)
    }

    /// Structural assignability: this type or a base has the given simple or
    /// qualified name
    pub fn is_assignable_to_name(&self, name: &str) -> bool {
        self.ancestry().any(|t| t.matches_name(name))
    }

    /// Structural name match, tolerant of namespace changes
    pub fn matches_name(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        let full = self.full_name();
        full == name || full.ends_with(&format!(".{}", name))
    }

    /// Instance fields, inherited fields first
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn static_field(&self, name: &str) -> Option<&FieldInfo> {
        self.static_fields.iter().find(|f| f.name == name)
    }

    /// Property lookup through the base chain
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.ancestry()
            .flat_map(|t| t.properties.iter())
            .find(|p| p.name == name)
    }

    /// Indexers declared on this type and its bases, most derived first
    pub fn indexers(&self) -> Vec<&IndexerInfo> {
        self.ancestry().flat_map(|t| t.indexers.iter()).collect()
    }

    /// Constructors are not inherited
    pub fn constructors(&self) -> &[ConstructorInfo] {
        &self.constructors
    }

    /// Overloads with the given name, most derived first
    pub fn methods_named(&self, name: &str) -> Vec<&MethodInfo> {
        self.ancestry()
            .flat_map(|t| t.methods.iter())
            .filter(|m| m.name == name)
            .collect()
    }

    /// Whether any member (of any kind) carries this name
    pub fn has_member_named(&self, name: &str) -> bool {
        self.field(name).is_some()
            || self.static_field(name).is_some()
            || self.property(name).is_some()
            || !self.methods_named(name).is_empty()
    }

    /// Allocate an instance with every field at its declared default.
    /// No constructor body runs.
    pub fn instantiate(self: &Arc<Self>) -> ObjectRef {
        let slots = self.fields.iter().map(|f| f.default.clone()).collect();
        ObjectRef::from_slots(Arc::clone(self), slots)
    }

    pub(crate) fn read_static(&self, slot: usize) -> Result<TypedValue, InvokeError> {
        let slots = self
            .static_slots
            .lock()
            .map_err(|_| InvokeError::StaticPoisoned(self.full_name()))?;
        slots.get(slot).cloned().ok_or_else(|| InvokeError::UnknownField {
            owner: self.full_name(),
            field: format!("static #{}", slot),
        })
    }

    pub(crate) fn write_static(&self, slot: usize, value: TypedValue) -> Result<(), InvokeError> {
        let mut slots = self
            .static_slots
            .lock()
            .map_err(|_| InvokeError::StaticPoisoned(self.full_name()))?;
        match slots.get_mut(slot) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => Err(InvokeError::UnknownField {
                owner: self.full_name(),
                field: format!("static #{}", slot),
            }),
        }
    }

    /// Read a static field by name (resolves the name on every call)
    pub fn read_static_field<T: Clone + 'static>(&self, name: &str) -> Result<T, InvokeError> {
        let info = self.static_field(name).ok_or_else(|| InvokeError::UnknownField {
            owner: self.full_name(),
            field: name.to_string(),
        })?;
        let value = self.read_static(info.slot)?;
        Ok(value.get::<T>()?.clone())
    }

    /// Write a static field by name (resolves the name on every call)
    pub fn write_static_field<T: Send + Sync + Clone + 'static>(&self, name: &str, value: T) -> Result<(), InvokeError> {
        let slot = self
            .static_field(name)
            .map(|info| info.slot)
            .ok_or_else(|| InvokeError::UnknownField {
                owner: self.full_name(),
                field: name.to_string(),
            })?;
        self.write_static(slot, TypedValue::new(value))
    }
}

impl std::fmt::Debug for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeType")
            .field("name", &self.full_name())
            .field("fields", &self.fields.len())
            .field("methods", &self.methods.len())
            .finish()
    }
}

/// Declares the members of a runtime type
pub struct RuntimeTypeBuilder {
    name: String,
    namespace: String,
    base: Option<Arc<RuntimeType>>,
    fields: Vec<FieldInfo>,
    static_fields: Vec<FieldInfo>,
    properties: Vec<PropertyInfo>,
    indexers: Vec<IndexerInfo>,
    constructors: Vec<ConstructorInfo>,
    methods: Vec<MethodInfo>,
}

impl RuntimeTypeBuilder {
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            base: None,
            fields: Vec::new(),
            static_fields: Vec::new(),
            properties: Vec::new(),
            indexers: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Derive from `base`; inherited fields keep their slots
    pub fn extends(mut self, base: &Arc<RuntimeType>) -> Self {
        let mut inherited = base.fields.clone();
        for field in self.fields.drain(..) {
            let slot = inherited.len();
            inherited.push(FieldInfo { slot, ..field });
        }
        self.fields = inherited;
        self.base = Some(Arc::clone(base));
        self
    }

    /// Instance field holding a native value
    pub fn field<T: Send + Sync + Clone + 'static>(mut self, name: &str, default: T) -> Self {
        let slot = self.fields.len();
        self.fields.push(FieldInfo {
            name: name.to_string(),
            value_type: ValueType::of::<T>(),
            slot,
            default: TypedValue::new(default),
        });
        self
    }

    /// Instance field referencing another external object; starts out null
    pub fn object_field(mut self, name: &str, type_name: &str) -> Self {
        let slot = self.fields.len();
        self.fields.push(FieldInfo {
            name: name.to_string(),
            value_type: ValueType::object(type_name),
            slot,
            default: TypedValue::unit(),
        });
        self
    }

    pub fn static_field<T: Send + Sync + Clone + 'static>(mut self, name: &str, initial: T) -> Self {
        let slot = self.static_fields.len();
        self.static_fields.push(FieldInfo {
            name: name.to_string(),
            value_type: ValueType::of::<T>(),
            slot,
            default: TypedValue::new(initial),
        });
        self
    }

    /// Read-only instance property
    pub fn property<G>(self, name: &str, value_type: ValueType, getter: G) -> Self
    where
        G: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.push_property(name, value_type, false, Some(Arc::new(getter)), None)
    }

    /// Read-write instance property
    pub fn property_with_setter<G, S>(self, name: &str, value_type: ValueType, getter: G, setter: S) -> Self
    where
        G: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
        S: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.push_property(name, value_type, false, Some(Arc::new(getter)), Some(Arc::new(setter)))
    }

    /// Read-only static property
    pub fn static_property<G>(self, name: &str, value_type: ValueType, getter: G) -> Self
    where
        G: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.push_property(name, value_type, true, Some(Arc::new(getter)), None)
    }

    fn push_property(
        mut self,
        name: &str,
        value_type: ValueType,
        is_static: bool,
        getter: Option<MemberBody>,
        setter: Option<MemberBody>,
    ) -> Self {
        self.properties.push(PropertyInfo {
            name: name.to_string(),
            value_type,
            is_static,
            getter,
            setter,
        });
        self
    }

    /// Read-only indexer
    pub fn indexer<G>(mut self, index_types: Vec<ValueType>, value_type: ValueType, getter: G) -> Self
    where
        G: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.indexers.push(IndexerInfo {
            index_types,
            value_type,
            getter: Arc::new(getter),
            setter: None,
        });
        self
    }

    /// Read-write indexer
    pub fn indexer_with_setter<G, S>(
        mut self,
        index_types: Vec<ValueType>,
        value_type: ValueType,
        getter: G,
        setter: S,
    ) -> Self
    where
        G: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
        S: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.indexers.push(IndexerInfo {
            index_types,
            value_type,
            getter: Arc::new(getter),
            setter: Some(Arc::new(setter)),
        });
        self
    }

    pub fn constructor<F>(mut self, params: Vec<ValueType>, body: F) -> Self
    where
        F: Fn(&ObjectRef, &[TypedValue]) -> Result<(), InvokeError> + Send + Sync + 'static,
    {
        self.constructors.push(ConstructorInfo {
            params,
            body: Arc::new(body),
        });
        self
    }

    /// Zero-argument constructor leaving every field at its default
    pub fn default_constructor(self) -> Self {
        self.constructor(Vec::new(), |_, _| Ok(()))
    }

    pub fn method<F>(self, name: &str, params: Vec<ValueType>, return_type: ValueType, body: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.push_method(name, params, return_type, false, Arc::new(body))
    }

    pub fn static_method<F>(self, name: &str, params: Vec<ValueType>, return_type: ValueType, body: F) -> Self
    where
        F: Fn(Option<&ObjectRef>, &[TypedValue]) -> Result<TypedValue, InvokeError> + Send + Sync + 'static,
    {
        self.push_method(name, params, return_type, true, Arc::new(body))
    }

    fn push_method(
        mut self,
        name: &str,
        params: Vec<ValueType>,
        return_type: ValueType,
        is_static: bool,
        body: MemberBody,
    ) -> Self {
        self.methods.push(MethodInfo {
            name: name.to_string(),
            params,
            return_type,
            is_static,
            body,
        });
        self
    }

    pub fn build(self) -> Arc<RuntimeType> {
        let static_slots = self.static_fields.iter().map(|f| f.default.clone()).collect();
        Arc::new(RuntimeType {
            key: Uuid::new_v4(),
            name: self.name,
            namespace: self.namespace,
            base: self.base,
            fields: self.fields,
            static_fields: self.static_fields,
            static_slots: Mutex::new(static_slots),
            properties: self.properties,
            indexers: self.indexers,
            constructors: self.constructors,
            methods: self.methods,
        })
    }
}
