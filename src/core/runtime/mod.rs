pub mod errors;
pub mod module;
pub mod object;
pub mod type_info;

pub use errors::InvokeError;
pub use module::{loaded_modules, LoadedModule, ModuleCatalog};
pub use object::ObjectRef;
pub use type_info::{
    ConstructorInfo, FieldInfo, IndexerInfo, MemberBody, MethodInfo, PropertyInfo, RuntimeType, RuntimeTypeBuilder,
};
