use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, RidlError};

use super::introspect::{TypeDescriptor, TypeIntrospector};
use super::registry::{ServiceHandle, ServiceRegistry};

/// One service entry as recorded in a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotService {
    /// Registry name
    pub name: String,

    /// Interface descriptor reported by the service; empty when the
    /// service exposed no interface at capture time
    #[serde(default)]
    pub interface: String,
}

/// An introspection snapshot captured from a target device.
///
/// Rust has no reflection over the target's managed runtime, so both
/// collaborator contracts are served from recorded metadata: the service
/// registry listing plus the type descriptors the reconstruction needs
/// (interface types and their stub types). The engine is oblivious to
/// the difference between this and a live runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// Registered services at capture time
    pub services: Vec<SnapshotService>,

    /// Type metadata keyed by fully qualified name
    #[serde(default)]
    pub types: HashMap<String, TypeDescriptor>,
}

impl MetadataSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        let snapshot: MetadataSnapshot = serde_json::from_str(&content)?;

        debug!(
            "Loaded snapshot: {} services, {} types",
            snapshot.services.len(),
            snapshot.types.len()
        );

        Ok(snapshot)
    }

    /// Load from the first candidate path that exists
    pub fn load_or_probe<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let candidates = ["snapshot.json", "ridl-snapshot.json"];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Err(RidlError::Snapshot(format!(
                    "no snapshot file found (tried {})",
                    candidates.join(", ")
                )))
            }
        }
    }
}

#[async_trait::async_trait]
impl ServiceRegistry for MetadataSnapshot {
    async fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.services.iter().map(|s| s.name.clone()).collect())
    }

    async fn resolve(&self, name: &str) -> Result<ServiceHandle> {
        self.services
            .iter()
            .find(|s| s.name == name)
            .map(|s| ServiceHandle {
                name: s.name.clone(),
                interface_id: s.interface.clone(),
            })
            .ok_or_else(|| RidlError::ServiceNotFound(name.to_string()))
    }
}

#[async_trait::async_trait]
impl TypeIntrospector for MetadataSnapshot {
    async fn load_type(&self, qualified_name: &str) -> Result<TypeDescriptor> {
        self.types
            .get(qualified_name)
            .cloned()
            .ok_or_else(|| RidlError::ClassNotFound(qualified_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetadataSnapshot {
        let mut types = HashMap::new();
        types.insert(
            "android.os.IVibratorService".to_string(),
            TypeDescriptor {
                canonical_name: "android.os.IVibratorService".to_string(),
                fields: vec![],
                methods: vec![],
            },
        );

        MetadataSnapshot {
            services: vec![
                SnapshotService {
                    name: "vibrator".to_string(),
                    interface: "android.os.IVibratorService".to_string(),
                },
                SnapshotService {
                    name: "media.camera".to_string(),
                    interface: String::new(),
                },
            ],
            types,
        }
    }

    #[tokio::test]
    async fn test_resolve_known_service() {
        let snapshot = sample();
        let handle = snapshot.resolve("vibrator").await.unwrap();

        assert!(handle.has_interface());
        assert_eq!(handle.interface_id, "android.os.IVibratorService");
    }

    #[tokio::test]
    async fn test_resolve_unknown_service_fails() {
        let snapshot = sample();
        assert!(matches!(
            snapshot.resolve("nosuch").await,
            Err(RidlError::ServiceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_descriptor_round_trips() {
        let snapshot = sample();
        let handle = snapshot.resolve("media.camera").await.unwrap();
        assert!(!handle.has_interface());
    }

    #[tokio::test]
    async fn test_load_type_miss_is_class_not_found() {
        let snapshot = sample();
        assert!(matches!(
            snapshot.load_type("android.os.IMissing").await,
            Err(RidlError::ClassNotFound(_))
        ));
    }
}
