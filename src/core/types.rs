use std::any::TypeId;
use uuid::Uuid;

/// Identity of one external instance, stable for the lifetime of the instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Create a fresh, unique instance ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the raw UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of member a binding targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Constructor,
    Field,
    Property,
    Indexer,
    Method,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Field => "field",
            MemberKind::Property => "property",
            MemberKind::Indexer => "indexer",
            MemberKind::Method => "method",
        };
        write!(f, "{}", name)
    }
}

/// Orientation of a neighbor relative to a lifting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Forward, Direction::Backward, Direction::Left, Direction::Right];

    /// Position of this direction in per-direction arrays
    pub fn index(self) -> usize {
        match self {
            Direction::Forward => 0,
            Direction::Backward => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Prefix of the external neighbor/weight field names
    pub fn field_prefix(self) -> &'static str {
        match self {
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// Declared type of a member, parameter or return value.
///
/// Native types are Rust types carried inside a `TypedValue`. Object types are
/// named external types; their values are carried as `ObjectRef`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Void,
    Native { type_id: TypeId, name: &'static str },
    Object(String),
}

impl ValueType {
    /// Declared type for a Rust type
    pub fn of<T: 'static>() -> Self {
        if TypeId::of::<T>() == TypeId::of::<()>() {
            return ValueType::Void;
        }
        ValueType::Native {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Declared type for an external object type
    pub fn object(type_name: &str) -> Self {
        ValueType::Object(type_name.to_string())
    }

    /// Human readable name of the type
    pub fn name(&self) -> &str {
        match self {
            ValueType::Void => "void",
            ValueType::Native { name, .. } => name,
            ValueType::Object(name) => name,
        }
    }

    /// Native type id, if this is a native type
    pub fn native_id(&self) -> Option<TypeId> {
        match self {
            ValueType::Native { type_id, .. } => Some(*type_id),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, ValueType::Void)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ValueType::Object(_))
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Format a parameter list for diagnostics
pub fn describe_signature(params: &[ValueType]) -> String {
    let names: Vec<&str> = params.iter().map(|p| p.name()).collect();
    format!("({})", names.join(", "))
}
