use crate::core::runtime::ObjectRef;
use crate::core::types::ValueType;
use std::any::{Any, TypeId};
use thiserror::Error;

/// Errors raised when reading a `TypedValue` as the wrong type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Object-safe cloning for the payload of a `TypedValue`
trait ValueData: Any + Send + Sync {
    fn clone_data(&self) -> Box<dyn ValueData>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Send + Sync + Clone> ValueData for T {
    fn clone_data(&self) -> Box<dyn ValueData> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Type-erased but type-safe container for values crossing the binding boundary.
///
/// This is the value currency of the boxed calling convention: arguments, return
/// values and instance slots of external objects are all `TypedValue`s.
pub struct TypedValue {
    data: Box<dyn ValueData>,
    type_name: &'static str,
    type_id: TypeId,
}

impl TypedValue {
    /// Create a new typed value
    pub fn new<T: Send + Sync + Clone + 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            data: Box::new(value),
        }
    }

    /// The unit value returned by void members
    pub fn unit() -> Self {
        Self::new(())
    }

    /// Wrap an external object reference
    pub fn object(value: ObjectRef) -> Self {
        Self::new(value)
    }

    /// Get a reference to the contained value
    pub fn get<T: 'static>(&self) -> Result<&T, ValueError> {
        self.data.as_any().downcast_ref::<T>().ok_or(ValueError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: self.type_name,
        })
    }

    /// Consume the typed value and return the contained value
    pub fn into_inner<T: 'static>(self) -> Result<T, ValueError> {
        let found = self.type_name;
        self.data
            .into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ValueError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    /// Borrow the contained object reference, if this value holds one
    pub fn as_object(&self) -> Option<&ObjectRef> {
        self.data.as_any().downcast_ref::<ObjectRef>()
    }

    /// Get the type name of the contained value
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Get the type ID of the contained value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the contained value is of type T
    pub fn is_type<T: 'static>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Check whether this value may be stored into or passed as `declared`.
    ///
    /// Object types accept any instance whose runtime type is assignable to the
    /// declared type name.
    pub fn admits(&self, declared: &ValueType) -> bool {
        match declared {
            ValueType::Void => self.is_type::<()>(),
            ValueType::Native { type_id, .. } => *type_id == self.type_id,
            ValueType::Object(name) => self
                .as_object()
                .map(|object| object.runtime_type().is_assignable_to_name(name))
                .unwrap_or(false),
        }
    }
}

impl std::fmt::Debug for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypedValue<{}>", self.type_name)
    }
}

impl Clone for TypedValue {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone_data(),
            type_name: self.type_name,
            type_id: self.type_id,
        }
    }
}
