use super::errors::InvokeError;
use super::type_info::RuntimeType;
use crate::core::types::InstanceId;
use crate::core::values::TypedValue;
use std::sync::{Arc, Mutex, MutexGuard};

struct ObjectCell {
    id: InstanceId,
    runtime_type: Arc<RuntimeType>,
    slots: Mutex<Vec<TypedValue>>,
}

/// Shared handle to one instance of an external runtime type.
///
/// Identity (`id`) and runtime type are readable without locking. Instance
/// fields live in slots laid out by the runtime type; each access locks the
/// slot storage for the duration of that access only.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<ObjectCell>,
}

impl ObjectRef {
    pub(crate) fn from_slots(runtime_type: Arc<RuntimeType>, slots: Vec<TypedValue>) -> Self {
        Self {
            inner: Arc::new(ObjectCell {
                id: InstanceId::new(),
                runtime_type,
                slots: Mutex::new(slots),
            }),
        }
    }

    /// Identity of this instance
    pub fn id(&self) -> InstanceId {
        self.inner.id
    }

    /// Runtime type of this instance
    pub fn runtime_type(&self) -> &Arc<RuntimeType> {
        &self.inner.runtime_type
    }

    /// True when both handles point at the same instance
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Lock the slot storage
    pub fn slots(&self) -> Result<MutexGuard<'_, Vec<TypedValue>>, InvokeError> {
        self.inner
            .slots
            .lock()
            .map_err(|_| InvokeError::Poisoned(self.inner.id))
    }

    /// Read a slot by index
    pub fn read_slot(&self, slot: usize) -> Result<TypedValue, InvokeError> {
        let slots = self.slots()?;
        slots.get(slot).cloned().ok_or_else(|| self.unknown_slot(slot))
    }

    /// Overwrite a slot by index
    pub fn write_slot(&self, slot: usize, value: TypedValue) -> Result<(), InvokeError> {
        let mut slots = self.slots()?;
        match slots.get_mut(slot) {
            Some(entry) => {
                *entry = value;
                Ok(())
            }
            None => Err(self.unknown_slot(slot)),
        }
    }

    /// Read a field by name.
    ///
    /// Resolves the name on every call; meant for code living inside an external
    /// module. Consumers go through bound accessors instead.
    pub fn read<T: Clone + 'static>(&self, field: &str) -> Result<T, InvokeError> {
        let slot = self.slot_of(field)?;
        let value = self.read_slot(slot)?;
        Ok(value.get::<T>()?.clone())
    }

    /// Write a field by name, checking the value against the declared field type
    pub fn write<T: Send + Sync + Clone + 'static>(&self, field: &str, value: T) -> Result<(), InvokeError> {
        let info = self
            .runtime_type()
            .field(field)
            .ok_or_else(|| self.unknown_field(field))?;
        let value = TypedValue::new(value);
        if !value.admits(&info.value_type) {
            return Err(InvokeError::ArgumentType {
                member: format!("{}.{}", self.runtime_type().name(), field),
                index: 0,
                expected: info.value_type.name().to_string(),
                found: value.type_name(),
            });
        }
        self.write_slot(info.slot, value)
    }

    /// Field-for-field duplicate producing a new, independent instance.
    ///
    /// Value fields are copied; object fields keep pointing at the same
    /// referenced instances.
    pub fn shallow_clone(&self) -> Result<ObjectRef, InvokeError> {
        let slots = self.slots()?.clone();
        Ok(ObjectRef::from_slots(Arc::clone(self.runtime_type()), slots))
    }

    fn slot_of(&self, field: &str) -> Result<usize, InvokeError> {
        self.runtime_type()
            .field(field)
            .map(|info| info.slot)
            .ok_or_else(|| self.unknown_field(field))
    }

    fn unknown_field(&self, field: &str) -> InvokeError {
        InvokeError::UnknownField {
            owner: self.runtime_type().full_name(),
            field: field.to_string(),
        }
    }

    fn unknown_slot(&self, slot: usize) -> InvokeError {
        self.unknown_field(&format!("#{}", slot))
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectRef {}

impl std::fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectRef({}#{})", self.runtime_type().name(), self.id())
    }
}
