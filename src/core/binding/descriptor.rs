use crate::core::runtime::RuntimeType;
use crate::core::types::{MemberKind, ValueType};
use std::sync::Arc;

/// Identifies one member of a runtime-discovered type.
///
/// `params` and `value_type` are optional constraints. When `params` is absent
/// for a method, the member must have exactly one overload.
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    pub owner: Arc<RuntimeType>,
    pub kind: MemberKind,
    pub name: Option<String>,
    pub is_static: bool,
    pub params: Option<Vec<ValueType>>,
    pub value_type: Option<ValueType>,
}

impl BindingDescriptor {
    fn new(owner: &Arc<RuntimeType>, kind: MemberKind, name: Option<&str>, is_static: bool) -> Self {
        Self {
            owner: Arc::clone(owner),
            kind,
            name: name.map(str::to_string),
            is_static,
            params: None,
            value_type: None,
        }
    }

    pub fn constructor(owner: &Arc<RuntimeType>, params: Vec<ValueType>) -> Self {
        Self::new(owner, MemberKind::Constructor, None, false).with_params(params)
    }

    pub fn field(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Field, Some(name), false)
    }

    pub fn static_field(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Field, Some(name), true)
    }

    pub fn property(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Property, Some(name), false)
    }

    pub fn static_property(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Property, Some(name), true)
    }

    pub fn indexer(owner: &Arc<RuntimeType>, index_types: Vec<ValueType>) -> Self {
        Self::new(owner, MemberKind::Indexer, None, false).with_params(index_types)
    }

    pub fn method(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Method, Some(name), false)
    }

    pub fn static_method(owner: &Arc<RuntimeType>, name: &str) -> Self {
        Self::new(owner, MemberKind::Method, Some(name), true)
    }

    /// Require an exact parameter list
    pub fn with_params(mut self, params: Vec<ValueType>) -> Self {
        self.params = Some(params);
        self
    }

    /// Require an exact declared return / value type
    pub fn returning(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Member name used in diagnostics
    pub fn member_label(&self) -> String {
        match (&self.kind, &self.name) {
            (_, Some(name)) => name.clone(),
            (MemberKind::Constructor, None) => ".ctor".to_string(),
            (MemberKind::Indexer, None) => "this[]".to_string(),
            (_, None) => "<unnamed>".to_string(),
        }
    }
}
