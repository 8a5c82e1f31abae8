use crate::core::runtime::type_info::ConstructorBody;
use crate::core::runtime::{InvokeError, MemberBody, ObjectRef, RuntimeType};
use crate::core::types::ValueType;
use crate::core::values::TypedValue;
use std::sync::Arc;

/// What a boxed invoker does once its arguments have been validated
#[derive(Clone)]
pub(crate) enum BoxedCall {
    Body(MemberBody),
    Construct(ConstructorBody),
    FieldGet(usize),
    FieldSet(usize),
    StaticGet(usize),
    StaticSet(usize),
}

/// General-purpose callable over `TypedValue`s.
///
/// The signature is captured at bind time; each call checks the argument count
/// and types against it without looking at the member metadata again.
#[derive(Clone)]
pub struct BoxedInvoker {
    owner: Arc<RuntimeType>,
    member: Arc<str>,
    params: Arc<[ValueType]>,
    return_type: ValueType,
    is_static: bool,
    call: BoxedCall,
}

impl BoxedInvoker {
    pub(crate) fn new(
        owner: &Arc<RuntimeType>,
        member: &str,
        params: Vec<ValueType>,
        return_type: ValueType,
        is_static: bool,
        call: BoxedCall,
    ) -> Self {
        Self {
            owner: Arc::clone(owner),
            member: Arc::from(member),
            params: params.into(),
            return_type,
            is_static,
            call,
        }
    }

    pub fn name(&self) -> &str {
        &self.member
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn return_type(&self) -> &ValueType {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Invoke with boxed arguments. `target` is ignored by static members and
    /// constructors.
    pub fn invoke(&self, target: Option<&ObjectRef>, args: &[TypedValue]) -> Result<TypedValue, InvokeError> {
        self.check_args(args)?;
        let result = match &self.call {
            BoxedCall::Construct(body) => {
                let instance = self.owner.instantiate();
                body(&instance, args)?;
                TypedValue::object(instance)
            }
            BoxedCall::StaticGet(slot) => self.owner.read_static(*slot)?,
            BoxedCall::StaticSet(slot) => {
                self.owner.write_static(*slot, args[0].clone())?;
                TypedValue::unit()
            }
            BoxedCall::Body(body) if self.is_static => body(None, args)?,
            BoxedCall::Body(body) => body(Some(self.receiver(target)?), args)?,
            BoxedCall::FieldGet(slot) => self.receiver(target)?.read_slot(*slot)?,
            BoxedCall::FieldSet(slot) => {
                self.receiver(target)?.write_slot(*slot, args[0].clone())?;
                TypedValue::unit()
            }
        };
        self.check_return(result)
    }

    fn receiver<'a>(&self, target: Option<&'a ObjectRef>) -> Result<&'a ObjectRef, InvokeError> {
        let target = target.ok_or_else(|| InvokeError::MissingReceiver {
            member: self.member.to_string(),
        })?;
        if !target.runtime_type().is_assignable_to(&self.owner) {
            return Err(InvokeError::WrongReceiver {
                member: self.member.to_string(),
                expected: self.owner.full_name(),
                found: target.runtime_type().full_name(),
            });
        }
        Ok(target)
    }

    fn check_args(&self, args: &[TypedValue]) -> Result<(), InvokeError> {
        if args.len() != self.params.len() {
            return Err(InvokeError::ArgumentCount {
                member: self.member.to_string(),
                expected: self.params.len(),
                found: args.len(),
            });
        }
        for (index, (arg, declared)) in args.iter().zip(self.params.iter()).enumerate() {
            if !admits_nullable(arg, declared) {
                return Err(InvokeError::ArgumentType {
                    member: self.member.to_string(),
                    index,
                    expected: declared.name().to_string(),
                    found: arg.type_name(),
                });
            }
        }
        Ok(())
    }

    fn check_return(&self, result: TypedValue) -> Result<TypedValue, InvokeError> {
        if admits_nullable(&result, &self.return_type) {
            Ok(result)
        } else {
            Err(InvokeError::ReturnType {
                member: self.member.to_string(),
                expected: self.return_type.name().to_string(),
                found: result.type_name(),
            })
        }
    }
}

// object-typed positions also accept null
fn admits_nullable(value: &TypedValue, declared: &ValueType) -> bool {
    value.admits(declared) || (declared.is_object() && value.is_type::<()>())
}

impl std::fmt::Debug for BoxedInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedInvoker")
            .field("owner", &self.owner.full_name())
            .field("member", &self.member)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// Result of a boxed binding
#[derive(Debug, Clone)]
pub enum BoundCallable {
    /// Constructors and methods
    Invoker(BoxedInvoker),
    /// Fields, properties and indexers; read-only members carry no setter
    Accessor {
        getter: BoxedInvoker,
        setter: Option<BoxedInvoker>,
    },
}

impl BoundCallable {
    pub fn invoker(&self) -> Option<&BoxedInvoker> {
        match self {
            BoundCallable::Invoker(invoker) => Some(invoker),
            BoundCallable::Accessor { .. } => None,
        }
    }

    pub fn into_invoker(self) -> Option<BoxedInvoker> {
        match self {
            BoundCallable::Invoker(invoker) => Some(invoker),
            BoundCallable::Accessor { .. } => None,
        }
    }

    pub fn getter(&self) -> Option<&BoxedInvoker> {
        match self {
            BoundCallable::Accessor { getter, .. } => Some(getter),
            BoundCallable::Invoker(_) => None,
        }
    }

    pub fn setter(&self) -> Option<&BoxedInvoker> {
        match self {
            BoundCallable::Accessor { setter, .. } => setter.as_ref(),
            BoundCallable::Invoker(_) => None,
        }
    }

    /// Invoke the callable (invokers) or read the member (accessors)
    pub fn call(&self, target: Option<&ObjectRef>, args: &[TypedValue]) -> Result<TypedValue, InvokeError> {
        match self {
            BoundCallable::Invoker(invoker) => invoker.invoke(target, args),
            BoundCallable::Accessor { getter, .. } => getter.invoke(target, args),
        }
    }

    /// Write the member. Index arguments, if any, come before the value.
    pub fn assign(&self, target: Option<&ObjectRef>, args: &[TypedValue]) -> Result<(), InvokeError> {
        match self {
            BoundCallable::Accessor { setter: Some(setter), .. } => setter.invoke(target, args).map(|_| ()),
            BoundCallable::Accessor { getter, setter: None } => Err(InvokeError::ReadOnly {
                member: getter.name().to_string(),
            }),
            BoundCallable::Invoker(invoker) => Err(InvokeError::failed(invoker.name(), "not an assignable member")),
        }
    }
}
