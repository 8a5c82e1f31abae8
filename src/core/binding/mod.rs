//! Bound callables for members of runtime-discovered types.
//!
//! `BindingFactory` resolves member metadata once and hands back either a
//! generic accessor/invoker over Rust types or a boxed invoker over
//! `TypedValue`s.

pub mod accessors;
pub mod args;
pub mod boxed;
pub mod descriptor;
pub mod errors;
pub mod factory;

pub use accessors::{
    ConstructorInvoker, FieldAccessor, IndexerAccessor, MethodInvoker, PropertyAccessor, StaticFieldAccessor,
};
pub use args::ArgList;
pub use boxed::{BoundCallable, BoxedInvoker};
pub use descriptor::BindingDescriptor;
pub use errors::BindError;
pub use factory::BindingFactory;
