use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use super::introspect::{MethodDescriptor, TypeDescriptor, TypeRef};

/// A transaction code joined with the declared method it dispatches to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedMethod {
    /// Transaction code
    pub code: i64,

    /// Declared method name
    pub name: String,

    /// Return type
    pub return_type: TypeRef,

    /// Parameter types, in declaration order
    pub params: Vec<TypeRef>,
}

/// Matches candidate method names against an interface's declared methods.
pub struct SignatureCorrelator {
    methods: HashMap<String, MethodDescriptor>,
    remote_exception: String,
}

impl SignatureCorrelator {
    /// Index the interface's declared methods by name. When overloads
    /// share a name the first occurrence wins; transaction codes do not
    /// encode parameter types, so overload resolution is out of reach.
    pub fn new(interface: &TypeDescriptor, remote_exception: &str) -> Self {
        let mut methods = HashMap::new();

        for method in &interface.methods {
            methods
                .entry(method.name.clone())
                .or_insert_with(|| method.clone());
        }

        Self {
            methods,
            remote_exception: remote_exception.to_string(),
        }
    }

    /// Whether a declared method is remotely invocable. Local helpers can
    /// share the interface type; only methods declaring the remote-failure
    /// exception cross the IPC boundary.
    pub fn is_remote_invocable(&self, method: &MethodDescriptor) -> bool {
        method
            .exception_types
            .iter()
            .any(|e| e == &self.remote_exception)
    }

    /// Join a transaction entry with its declared method, if any.
    /// Candidates without a matching remotely invocable method yield
    /// `None`; the caller records the drop and moves on.
    pub fn correlate(&self, code: i64, candidate_name: &str) -> Option<ResolvedMethod> {
        let method = self.methods.get(candidate_name)?;

        if !self.is_remote_invocable(method) {
            return None;
        }

        Some(ResolvedMethod {
            code,
            name: method.name.clone(),
            return_type: method.return_type.clone(),
            params: method.param_types.clone(),
        })
    }
}
