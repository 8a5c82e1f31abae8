use super::accessors::{
    ConstructorInvoker, FieldAccessor, IndexerAccessor, MethodInvoker, PropertyAccessor, StaticFieldAccessor,
};
use super::args::ArgList;
use super::boxed::{BoundCallable, BoxedCall, BoxedInvoker};
use super::descriptor::BindingDescriptor;
use super::errors::BindError;
use crate::core::runtime::{FieldInfo, IndexerInfo, MethodInfo, PropertyInfo, RuntimeType};
use crate::core::types::{describe_signature, MemberKind, ValueType};
use crate::core::values::{BindValue, Decoder, Encoder};
use log::debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// Produces bound callables for members of runtime-discovered types.
///
/// All member metadata is resolved here, once. The callables it returns only
/// carry slot indices, member bodies and the converters chosen for the
/// requested Rust types. Binding has no side effects; callers cache results.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindingFactory;

impl BindingFactory {
    pub fn new() -> Self {
        Self
    }

    /// Bind a member using the boxed calling convention
    pub fn bind(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let callable = match descriptor.kind {
            MemberKind::Constructor => self.bind_boxed_constructor(descriptor)?,
            MemberKind::Field => self.bind_boxed_field(descriptor)?,
            MemberKind::Property => self.bind_boxed_property(descriptor)?,
            MemberKind::Indexer => self.bind_boxed_indexer(descriptor)?,
            MemberKind::Method => self.bind_boxed_method(descriptor)?,
        };
        debug!(
            "Bound boxed {} {}::{}",
            descriptor.kind,
            descriptor.owner.full_name(),
            descriptor.member_label()
        );
        Ok(callable)
    }

    fn bind_boxed_constructor(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let owner = &descriptor.owner;
        let params = descriptor.params.clone().unwrap_or_default();
        let ctor = owner
            .constructors()
            .iter()
            .find(|c| c.params == params)
            .ok_or_else(|| not_found(owner, MemberKind::Constructor, ".ctor"))?;
        Ok(BoundCallable::Invoker(BoxedInvoker::new(
            owner,
            ".ctor",
            params,
            ValueType::object(owner.name()),
            true,
            BoxedCall::Construct(Arc::clone(&ctor.body)),
        )))
    }

    fn bind_boxed_field(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let owner = &descriptor.owner;
        let name = required_name(descriptor)?;
        let info = lookup_field(owner, name, descriptor.is_static)?;
        check_value_type(descriptor, &info.value_type)?;

        let (get, set) = if descriptor.is_static {
            (BoxedCall::StaticGet(info.slot), BoxedCall::StaticSet(info.slot))
        } else {
            (BoxedCall::FieldGet(info.slot), BoxedCall::FieldSet(info.slot))
        };
        Ok(BoundCallable::Accessor {
            getter: BoxedInvoker::new(owner, name, Vec::new(), info.value_type.clone(), descriptor.is_static, get),
            setter: Some(BoxedInvoker::new(
                owner,
                name,
                vec![info.value_type.clone()],
                ValueType::Void,
                descriptor.is_static,
                set,
            )),
        })
    }

    fn bind_boxed_property(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let owner = &descriptor.owner;
        let name = required_name(descriptor)?;
        let info = lookup_property(owner, name, descriptor.is_static)?;
        check_value_type(descriptor, &info.value_type)?;

        let getter = info
            .getter
            .as_ref()
            .ok_or_else(|| mismatch(owner, MemberKind::Property, name, "readable", "write-only".to_string()))?;
        Ok(BoundCallable::Accessor {
            getter: BoxedInvoker::new(
                owner,
                name,
                Vec::new(),
                info.value_type.clone(),
                info.is_static,
                BoxedCall::Body(Arc::clone(getter)),
            ),
            setter: info.setter.as_ref().map(|setter| {
                BoxedInvoker::new(
                    owner,
                    name,
                    vec![info.value_type.clone()],
                    ValueType::Void,
                    info.is_static,
                    BoxedCall::Body(Arc::clone(setter)),
                )
            }),
        })
    }

    fn bind_boxed_indexer(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let owner = &descriptor.owner;
        let requested = descriptor.params.clone().unwrap_or_default();
        let indexers = owner.indexers();
        if indexers.is_empty() {
            return Err(not_found(owner, MemberKind::Indexer, "this[]"));
        }
        let info = indexers
            .iter()
            .find(|i| i.index_types == requested)
            .ok_or_else(|| {
                mismatch(
                    owner,
                    MemberKind::Indexer,
                    "this[]",
                    &describe_signature(&requested),
                    shapes(indexers.iter().map(|i| i.index_types.as_slice())),
                )
            })?;
        check_value_type(descriptor, &info.value_type)?;

        let mut setter_params = info.index_types.clone();
        setter_params.push(info.value_type.clone());
        Ok(BoundCallable::Accessor {
            getter: BoxedInvoker::new(
                owner,
                "this[]",
                info.index_types.clone(),
                info.value_type.clone(),
                false,
                BoxedCall::Body(Arc::clone(&info.getter)),
            ),
            setter: info.setter.as_ref().map(|setter| {
                BoxedInvoker::new(
                    owner,
                    "this[]",
                    setter_params,
                    ValueType::Void,
                    false,
                    BoxedCall::Body(Arc::clone(setter)),
                )
            }),
        })
    }

    fn bind_boxed_method(&self, descriptor: &BindingDescriptor) -> Result<BoundCallable, BindError> {
        let owner = &descriptor.owner;
        let name = required_name(descriptor)?;
        let overloads = lookup_methods(owner, name, descriptor.is_static)?;

        let chosen = match &descriptor.params {
            Some(params) => overloads.iter().find(|m| {
                m.params == *params && descriptor.value_type.as_ref().map_or(true, |r| *r == m.return_type)
            }),
            None if overloads.len() == 1 => overloads
                .first()
                .filter(|m| descriptor.value_type.as_ref().map_or(true, |r| *r == m.return_type)),
            None => None,
        };
        let method = chosen.ok_or_else(|| {
            let requested = descriptor
                .params
                .as_deref()
                .map(describe_signature)
                .unwrap_or_else(|| "a unique overload".to_string());
            mismatch(
                owner,
                MemberKind::Method,
                name,
                &requested,
                shapes(overloads.iter().map(|m| m.params.as_slice())),
            )
        })?;

        Ok(BoundCallable::Invoker(BoxedInvoker::new(
            owner,
            name,
            method.params.clone(),
            method.return_type.clone(),
            method.is_static,
            BoxedCall::Body(Arc::clone(&method.body)),
        )))
    }

    /// Bind a constructor taking the argument tuple `A`
    pub fn bind_constructor<A: ArgList>(&self, owner: &Arc<RuntimeType>) -> Result<ConstructorInvoker<A>, BindError> {
        let ctors = owner.constructors();
        let (ctor, encoders) = ctors
            .iter()
            .filter(|c| A::matches_exactly(&c.params))
            .chain(ctors.iter())
            .find_map(|c| A::encoders(&c.params).map(|e| (c, e)))
            .ok_or_else(|| not_found(owner, MemberKind::Constructor, ".ctor"))?;

        debug!(
            "Bound constructor {}{}",
            owner.full_name(),
            describe_signature(&ctor.params)
        );
        Ok(ConstructorInvoker {
            owner: Arc::clone(owner),
            encoders,
            body: Arc::clone(&ctor.body),
            _marker: PhantomData,
        })
    }

    /// Bind an instance field as `T`
    pub fn bind_field<T: BindValue>(&self, owner: &Arc<RuntimeType>, name: &str) -> Result<FieldAccessor<T>, BindError> {
        let info = lookup_field(owner, name, false)?;
        let (decode, encode) = field_converters::<T>(owner, info)?;
        debug!("Bound field {}::{} as {}", owner.full_name(), name, std::any::type_name::<T>());
        Ok(FieldAccessor {
            owner: Arc::clone(owner),
            member: Arc::from(name),
            slot: info.slot,
            decode,
            encode,
        })
    }

    /// Bind a static field as `T`
    pub fn bind_static_field<T: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
    ) -> Result<StaticFieldAccessor<T>, BindError> {
        let info = lookup_field(owner, name, true)?;
        let (decode, encode) = field_converters::<T>(owner, info)?;
        debug!("Bound static field {}::{}", owner.full_name(), name);
        Ok(StaticFieldAccessor {
            owner: Arc::clone(owner),
            member: Arc::from(name),
            slot: info.slot,
            decode,
            encode,
        })
    }

    /// Bind an instance property as `T`
    pub fn bind_property<T: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
    ) -> Result<PropertyAccessor<T>, BindError> {
        self.bind_property_as(owner, name, false)
    }

    /// Bind a static property as `T`
    pub fn bind_static_property<T: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
    ) -> Result<PropertyAccessor<T>, BindError> {
        self.bind_property_as(owner, name, true)
    }

    fn bind_property_as<T: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
        is_static: bool,
    ) -> Result<PropertyAccessor<T>, BindError> {
        let info = lookup_property(owner, name, is_static)?;
        let requested = || std::any::type_name::<T>();

        let getter = match &info.getter {
            Some(body) => {
                let decode = T::decoder_for(&info.value_type).ok_or_else(|| {
                    mismatch(owner, MemberKind::Property, name, requested(), info.value_type.to_string())
                })?;
                Some((Arc::clone(body), decode))
            }
            None => None,
        };
        let setter = match &info.setter {
            Some(body) => {
                let encode = T::encoder_for(&info.value_type).ok_or_else(|| {
                    mismatch(owner, MemberKind::Property, name, requested(), info.value_type.to_string())
                })?;
                Some((Arc::clone(body), encode))
            }
            None => None,
        };

        debug!(
            "Bound {}property {}::{} ({})",
            if is_static { "static " } else { "" },
            owner.full_name(),
            name,
            if setter.is_some() { "read-write" } else { "read-only" }
        );
        Ok(PropertyAccessor {
            owner: Arc::clone(owner),
            member: Arc::from(name),
            is_static,
            getter,
            setter,
        })
    }

    /// Bind an indexer keyed by `I` yielding `T`
    pub fn bind_indexer<I: ArgList, T: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
    ) -> Result<IndexerAccessor<I, T>, BindError> {
        let indexers = owner.indexers();
        if indexers.is_empty() {
            return Err(not_found(owner, MemberKind::Indexer, "this[]"));
        }
        let resolve = |info: &IndexerInfo| {
            let index_encoders = I::encoders(&info.index_types)?;
            let decode = T::decoder_for(&info.value_type)?;
            let setter = match &info.setter {
                Some(body) => Some((Arc::clone(body), T::encoder_for(&info.value_type)?)),
                None => None,
            };
            Some((Arc::clone(&info.getter), index_encoders, decode, setter))
        };
        let (getter, index_encoders, decode, setter) = indexers
            .iter()
            .copied()
            .filter(|info| I::matches_exactly(&info.index_types))
            .chain(indexers.iter().copied())
            .find_map(resolve)
            .ok_or_else(|| {
                mismatch(
                    owner,
                    MemberKind::Indexer,
                    "this[]",
                    &describe_signature(&I::types()),
                    shapes(indexers.iter().map(|i| i.index_types.as_slice())),
                )
            })?;

        debug!("Bound indexer {}{}", owner.full_name(), describe_signature(&I::types()));
        Ok(IndexerAccessor {
            owner: Arc::clone(owner),
            index_encoders,
            getter,
            decode,
            setter,
            _marker: PhantomData,
        })
    }

    /// Bind an instance method taking `A` and returning `R`
    pub fn bind_method<A: ArgList, R: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
    ) -> Result<MethodInvoker<A, R>, BindError> {
        self.bind_method_as(owner, name, false)
    }

    /// Bind a static method taking `A` and returning `R`
    pub fn bind_static_method<A: ArgList, R: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
    ) -> Result<MethodInvoker<A, R>, BindError> {
        self.bind_method_as(owner, name, true)
    }

    fn bind_method_as<A: ArgList, R: BindValue>(
        &self,
        owner: &Arc<RuntimeType>,
        name: &str,
        is_static: bool,
    ) -> Result<MethodInvoker<A, R>, BindError> {
        let overloads = lookup_methods(owner, name, is_static)?;
        let resolve = |m: &MethodInfo| Some((A::encoders(&m.params)?, R::decoder_for(&m.return_type)?));

        let (method, (encoders, decode)) = overloads
            .iter()
            .copied()
            .filter(|m| A::matches_exactly(&m.params) && R::matches_exactly(&m.return_type))
            .chain(overloads.iter().copied())
            .find_map(|m| resolve(m).map(|converters| (m, converters)))
            .ok_or_else(|| {
                mismatch(
                    owner,
                    MemberKind::Method,
                    name,
                    &format!("{} -> {}", describe_signature(&A::types()), R::value_type()),
                    shapes(overloads.iter().map(|m| m.params.as_slice())),
                )
            })?;

        debug!(
            "Bound {}method {}::{}{}",
            if is_static { "static " } else { "" },
            owner.full_name(),
            name,
            describe_signature(&method.params)
        );
        Ok(MethodInvoker {
            owner: Arc::clone(owner),
            member: Arc::from(name),
            is_static,
            encoders,
            decode,
            body: Arc::clone(&method.body),
            _marker: PhantomData,
        })
    }
}

fn not_found(owner: &RuntimeType, kind: MemberKind, member: &str) -> BindError {
    BindError::MemberNotFound {
        owner: owner.full_name(),
        kind,
        member: member.to_string(),
    }
}

fn mismatch(owner: &RuntimeType, kind: MemberKind, member: &str, requested: &str, found: String) -> BindError {
    BindError::SignatureMismatch {
        owner: owner.full_name(),
        kind,
        member: member.to_string(),
        requested: requested.to_string(),
        found,
    }
}

fn shapes<'a>(params: impl Iterator<Item = &'a [ValueType]>) -> String {
    params.map(describe_signature).collect::<Vec<_>>().join(" | ")
}

fn required_name(descriptor: &BindingDescriptor) -> Result<&str, BindError> {
    descriptor
        .name
        .as_deref()
        .ok_or_else(|| not_found(&descriptor.owner, descriptor.kind, &descriptor.member_label()))
}

fn check_value_type(descriptor: &BindingDescriptor, declared: &ValueType) -> Result<(), BindError> {
    match &descriptor.value_type {
        Some(requested) if requested != declared => Err(mismatch(
            &descriptor.owner,
            descriptor.kind,
            &descriptor.member_label(),
            requested.name(),
            declared.to_string(),
        )),
        _ => Ok(()),
    }
}

fn lookup_field<'a>(owner: &'a RuntimeType, name: &str, is_static: bool) -> Result<&'a FieldInfo, BindError> {
    let (found, other) = if is_static {
        (owner.static_field(name), owner.field(name))
    } else {
        (owner.field(name), owner.static_field(name))
    };
    match (found, other) {
        (Some(info), _) => Ok(info),
        (None, Some(_)) => Err(mismatch(
            owner,
            MemberKind::Field,
            name,
            if is_static { "static" } else { "instance" },
            if is_static { "instance" } else { "static" }.to_string(),
        )),
        (None, None) => Err(not_found(owner, MemberKind::Field, name)),
    }
}

fn lookup_property<'a>(owner: &'a RuntimeType, name: &str, is_static: bool) -> Result<&'a PropertyInfo, BindError> {
    let info = owner
        .property(name)
        .ok_or_else(|| not_found(owner, MemberKind::Property, name))?;
    if info.is_static != is_static {
        return Err(mismatch(
            owner,
            MemberKind::Property,
            name,
            if is_static { "static" } else { "instance" },
            if info.is_static { "static" } else { "instance" }.to_string(),
        ));
    }
    Ok(info)
}

fn lookup_methods<'a>(owner: &'a RuntimeType, name: &str, is_static: bool) -> Result<Vec<&'a MethodInfo>, BindError> {
    let all = owner.methods_named(name);
    if all.is_empty() {
        return Err(not_found(owner, MemberKind::Method, name));
    }
    let overloads: Vec<&MethodInfo> = all.iter().copied().filter(|m| m.is_static == is_static).collect();
    if overloads.is_empty() {
        return Err(mismatch(
            owner,
            MemberKind::Method,
            name,
            if is_static { "static" } else { "instance" },
            if is_static { "instance" } else { "static" }.to_string(),
        ));
    }
    Ok(overloads)
}

fn field_converters<T: BindValue>(
    owner: &RuntimeType,
    info: &FieldInfo,
) -> Result<(Decoder<T>, Encoder<T>), BindError> {
    let decode = T::decoder_for(&info.value_type);
    let encode = T::encoder_for(&info.value_type);
    match (decode, encode) {
        (Some(decode), Some(encode)) => Ok((decode, encode)),
        _ => Err(mismatch(
            owner,
            MemberKind::Field,
            &info.name,
            std::any::type_name::<T>(),
            info.value_type.to_string(),
        )),
    }
}
