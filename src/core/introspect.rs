use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Reference to a type appearing in a method signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Fully qualified name, e.g. "android.content.Intent" or "int[]"
    pub canonical_name: String,

    /// Primitive types are spelled inline and never imported
    #[serde(default)]
    pub is_primitive: bool,

    /// Array types are spelled inline and never imported
    #[serde(default)]
    pub is_array: bool,
}

impl TypeRef {
    /// Name after the last dot; array suffixes survive ("java.lang.String[]"
    /// becomes "String[]").
    pub fn simple_name(&self) -> &str {
        match self.canonical_name.rfind('.') {
            Some(idx) => &self.canonical_name[idx + 1..],
            None => &self.canonical_name,
        }
    }
}

/// A declared static field of a type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, e.g. "TRANSACTION_getCallState"
    pub name: String,

    /// Declared type name, e.g. "int"
    pub field_type: String,

    /// Constant value
    pub value: i64,

    /// Whether the field is public. Transaction constants usually are not;
    /// reading them requires an accessibility override.
    #[serde(default)]
    pub accessible: bool,
}

impl FieldDescriptor {
    /// Read the constant value. Callers must opt into the accessibility
    /// override to read non-public fields, mirroring the platform's
    /// reflection rules.
    pub fn read(&self, override_access: bool) -> Option<i64> {
        if self.accessible || override_access {
            Some(self.value)
        } else {
            None
        }
    }
}

/// A declared method of an interface type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,

    /// Return type
    pub return_type: TypeRef,

    /// Parameter types, in declaration order
    #[serde(default)]
    pub param_types: Vec<TypeRef>,

    /// Canonical names of declared exception types
    #[serde(default)]
    pub exception_types: Vec<String>,
}

/// Introspection metadata for one loadable type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Canonical name of the type
    pub canonical_name: String,

    /// Declared static fields
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,

    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

impl TypeDescriptor {
    /// Name after the last dot, with nested-type markers stripped
    pub fn simple_name(&self) -> &str {
        let tail = match self.canonical_name.rfind('.') {
            Some(idx) => &self.canonical_name[idx + 1..],
            None => &self.canonical_name,
        };
        match tail.rfind('$') {
            Some(idx) => &tail[idx + 1..],
            None => tail,
        }
    }

    /// Enclosing package of the type, empty for the default package
    pub fn package_name(&self) -> &str {
        match self.canonical_name.rfind('.') {
            Some(idx) => &self.canonical_name[..idx],
            None => "",
        }
    }
}

/// Capability contract over the host platform's type introspection.
///
/// The engine never touches a reflection mechanism directly; it only loads
/// type metadata through this trait. Implementations may talk to a live
/// runtime or, as [`MetadataSnapshot`](super::MetadataSnapshot) does, to a
/// recorded dump of one.
#[async_trait::async_trait]
pub trait TypeIntrospector: Send + Sync {
    /// Load metadata for a fully qualified type name
    async fn load_type(&self, qualified_name: &str) -> Result<TypeDescriptor>;
}
