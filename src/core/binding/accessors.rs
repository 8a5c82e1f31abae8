use super::args::ArgList;
use crate::core::runtime::type_info::ConstructorBody;
use crate::core::runtime::{InvokeError, MemberBody, ObjectRef, RuntimeType};
use crate::core::values::{BindValue, Decoder, Encoder, TypedValue};
use std::marker::PhantomData;
use std::sync::Arc;

fn check_receiver(owner: &RuntimeType, member: &str, target: &ObjectRef) -> Result<(), InvokeError> {
    if target.runtime_type().is_assignable_to(owner) {
        Ok(())
    } else {
        Err(InvokeError::WrongReceiver {
            member: member.to_string(),
            expected: owner.full_name(),
            found: target.runtime_type().full_name(),
        })
    }
}

fn require_receiver<'a>(
    owner: &RuntimeType,
    member: &str,
    target: Option<&'a ObjectRef>,
) -> Result<&'a ObjectRef, InvokeError> {
    let target = target.ok_or_else(|| InvokeError::MissingReceiver {
        member: member.to_string(),
    })?;
    check_receiver(owner, member, target)?;
    Ok(target)
}

fn decode_with<T>(decode: Decoder<T>, member: &str, expected: &str, value: &TypedValue) -> Result<T, InvokeError> {
    decode(value).ok_or_else(|| InvokeError::ReturnType {
        member: member.to_string(),
        expected: expected.to_string(),
        found: value.type_name(),
    })
}

/// Bound instance field: a resolved slot plus bind-time converters
#[derive(Clone)]
pub struct FieldAccessor<T> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) member: Arc<str>,
    pub(crate) slot: usize,
    pub(crate) decode: Decoder<T>,
    pub(crate) encode: Encoder<T>,
}

impl<T: BindValue> FieldAccessor<T> {
    pub fn get(&self, target: &ObjectRef) -> Result<T, InvokeError> {
        check_receiver(&self.owner, &self.member, target)?;
        let value = target.read_slot(self.slot)?;
        decode_with(self.decode, &self.member, std::any::type_name::<T>(), &value)
    }

    pub fn set(&self, target: &ObjectRef, value: T) -> Result<(), InvokeError> {
        check_receiver(&self.owner, &self.member, target)?;
        target.write_slot(self.slot, (self.encode)(value))
    }

    pub fn name(&self) -> &str {
        &self.member
    }
}

/// Bound static field
#[derive(Clone)]
pub struct StaticFieldAccessor<T> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) member: Arc<str>,
    pub(crate) slot: usize,
    pub(crate) decode: Decoder<T>,
    pub(crate) encode: Encoder<T>,
}

impl<T: BindValue> StaticFieldAccessor<T> {
    pub fn get(&self) -> Result<T, InvokeError> {
        let value = self.owner.read_static(self.slot)?;
        decode_with(self.decode, &self.member, std::any::type_name::<T>(), &value)
    }

    pub fn set(&self, value: T) -> Result<(), InvokeError> {
        self.owner.write_static(self.slot, (self.encode)(value))
    }

    pub fn name(&self) -> &str {
        &self.member
    }
}

/// Bound property. Static properties ignore the target.
#[derive(Clone)]
pub struct PropertyAccessor<T> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) member: Arc<str>,
    pub(crate) is_static: bool,
    pub(crate) getter: Option<(MemberBody, Decoder<T>)>,
    pub(crate) setter: Option<(MemberBody, Encoder<T>)>,
}

impl<T: BindValue> PropertyAccessor<T> {
    pub fn get(&self, target: Option<&ObjectRef>) -> Result<T, InvokeError> {
        let (body, decode) = self.getter.as_ref().ok_or_else(|| InvokeError::failed(&self.member, "property has no getter"))?;
        let target = self.resolve_target(target)?;
        let value = body(target, &[])?;
        decode_with(*decode, &self.member, std::any::type_name::<T>(), &value)
    }

    pub fn set(&self, target: Option<&ObjectRef>, value: T) -> Result<(), InvokeError> {
        let (body, encode) = self.setter.as_ref().ok_or_else(|| InvokeError::ReadOnly {
            member: self.member.to_string(),
        })?;
        let target = self.resolve_target(target)?;
        body(target, &[encode(value)])?;
        Ok(())
    }

    pub fn can_write(&self) -> bool {
        self.setter.is_some()
    }

    pub fn name(&self) -> &str {
        &self.member
    }

    fn resolve_target<'a>(&self, target: Option<&'a ObjectRef>) -> Result<Option<&'a ObjectRef>, InvokeError> {
        if self.is_static {
            Ok(None)
        } else {
            require_receiver(&self.owner, &self.member, target).map(Some)
        }
    }
}

/// Bound indexer keyed by the argument tuple `I`
pub struct IndexerAccessor<I: ArgList, T> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) index_encoders: I::Encoders,
    pub(crate) getter: MemberBody,
    pub(crate) decode: Decoder<T>,
    pub(crate) setter: Option<(MemberBody, Encoder<T>)>,
    pub(crate) _marker: PhantomData<fn(I) -> T>,
}

impl<I: ArgList, T: BindValue> IndexerAccessor<I, T> {
    pub fn get(&self, target: &ObjectRef, index: I) -> Result<T, InvokeError> {
        check_receiver(&self.owner, "this[]", target)?;
        let args = index.encode(&self.index_encoders);
        let value = (self.getter)(Some(target), &args)?;
        decode_with(self.decode, "this[]", std::any::type_name::<T>(), &value)
    }

    pub fn set(&self, target: &ObjectRef, index: I, value: T) -> Result<(), InvokeError> {
        let (body, encode) = self.setter.as_ref().ok_or_else(|| InvokeError::ReadOnly {
            member: "this[]".to_string(),
        })?;
        check_receiver(&self.owner, "this[]", target)?;
        let mut args = index.encode(&self.index_encoders);
        args.push(encode(value));
        body(Some(target), &args)?;
        Ok(())
    }
}

impl<I: ArgList, T: BindValue> Clone for IndexerAccessor<I, T> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            index_encoders: self.index_encoders.clone(),
            getter: Arc::clone(&self.getter),
            decode: self.decode,
            setter: self.setter.clone(),
            _marker: PhantomData,
        }
    }
}

/// Bound method with a generic argument tuple and return type
pub struct MethodInvoker<A: ArgList, R> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) member: Arc<str>,
    pub(crate) is_static: bool,
    pub(crate) encoders: A::Encoders,
    pub(crate) decode: Decoder<R>,
    pub(crate) body: MemberBody,
    pub(crate) _marker: PhantomData<fn(A) -> R>,
}

impl<A: ArgList, R: BindValue> MethodInvoker<A, R> {
    /// Invoke on `target` (ignored for static methods)
    pub fn invoke(&self, target: Option<&ObjectRef>, args: A) -> Result<R, InvokeError> {
        let target = if self.is_static {
            None
        } else {
            Some(require_receiver(&self.owner, &self.member, target)?)
        };
        let values = args.encode(&self.encoders);
        let result = (self.body)(target, &values)?;
        decode_with(self.decode, &self.member, std::any::type_name::<R>(), &result)
    }

    /// Invoke an instance method
    pub fn call(&self, target: &ObjectRef, args: A) -> Result<R, InvokeError> {
        self.invoke(Some(target), args)
    }

    /// Invoke a static method
    pub fn call_static(&self, args: A) -> Result<R, InvokeError> {
        self.invoke(None, args)
    }

    pub fn name(&self) -> &str {
        &self.member
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

impl<A: ArgList, R: BindValue> Clone for MethodInvoker<A, R> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            member: Arc::clone(&self.member),
            is_static: self.is_static,
            encoders: self.encoders.clone(),
            decode: self.decode,
            body: Arc::clone(&self.body),
            _marker: PhantomData,
        }
    }
}

/// Bound constructor
pub struct ConstructorInvoker<A: ArgList> {
    pub(crate) owner: Arc<RuntimeType>,
    pub(crate) encoders: A::Encoders,
    pub(crate) body: ConstructorBody,
    pub(crate) _marker: PhantomData<fn(A)>,
}

impl<A: ArgList> ConstructorInvoker<A> {
    /// Allocate a new instance and run the constructor body on it
    pub fn construct(&self, args: A) -> Result<ObjectRef, InvokeError> {
        let instance = self.owner.instantiate();
        let values = args.encode(&self.encoders);
        (self.body)(&instance, &values)?;
        Ok(instance)
    }

    pub fn owner(&self) -> &Arc<RuntimeType> {
        &self.owner
    }
}

impl<A: ArgList> Clone for ConstructorInvoker<A> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            encoders: self.encoders.clone(),
            body: Arc::clone(&self.body),
            _marker: PhantomData,
        }
    }
}
