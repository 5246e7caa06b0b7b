use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, RidlError};

use super::correlator::{ResolvedMethod, SignatureCorrelator};
use super::introspect::TypeIntrospector;
use super::prober::NamespaceProber;
use super::registry::{ServiceHandle, ServiceRegistry};
use super::renderer::RenderFilter;
use super::resolver::method_name_for_transaction;
use super::snapshot::MetadataSnapshot;
use super::transactions::extract_transactions;

/// The distinguished service whose interface type carries the transaction
/// constants directly instead of a nested Stub type.
const ACTIVITY_SERVICE: &str = "activity";

/// Structured result of one reconstruction pass.
///
/// The engine returns data, never prints; rendering and output belong to
/// the presentation layer so the core stays testable.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Service name the reconstruction ran against
    pub service: String,

    /// Interface descriptor the service reported
    pub interface_id: String,

    /// Enclosing package of the interface type
    pub package: String,

    /// Simple name of the interface type
    pub interface_name: String,

    /// Resolved methods in ascending transaction code order
    pub methods: Vec<ResolvedMethod>,

    /// Candidate names that matched no remotely invocable declared
    /// method; dropped entries, kept for diagnostics
    pub dropped: Vec<String>,
}

/// Orchestrates the reconstruction pipeline: probe, extract, resolve,
/// correlate. One service per invocation, no state between runs.
pub struct Engine {
    config: Config,
    registry: Arc<dyn ServiceRegistry>,
    introspector: Arc<dyn TypeIntrospector>,
    prober: NamespaceProber,
}

impl Engine {
    pub fn new(
        config: Config,
        registry: Arc<dyn ServiceRegistry>,
        introspector: Arc<dyn TypeIntrospector>,
    ) -> Self {
        let prober = NamespaceProber::new(&config.probing);

        Self {
            config,
            registry,
            introspector,
            prober,
        }
    }

    /// Build an engine backed by an introspection snapshot file
    pub fn from_paths(config_path: Option<&Path>, snapshot_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        debug!("Loaded configuration: {:?}", config);

        let snapshot = Arc::new(MetadataSnapshot::load_or_probe(snapshot_path)?);

        Ok(Self::new(config, snapshot.clone(), snapshot))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enumerate all registered services with their interface descriptors
    pub async fn list_services(&self) -> Result<Vec<ServiceHandle>> {
        let names = self.registry.list_names().await?;
        let mut handles = Vec::with_capacity(names.len());

        for name in names {
            handles.push(self.registry.resolve(&name).await?);
        }

        Ok(handles)
    }

    /// Reconstruct the interface of one service.
    ///
    /// Entries the filter excludes are skipped outright; entries whose
    /// candidate name matches no remotely invocable declared method are
    /// recorded in `dropped` and the rest of the table still goes through.
    pub async fn reconstruct(
        &self,
        service_name: &str,
        filter: &RenderFilter,
    ) -> Result<Reconstruction> {
        let handle = self.registry.resolve(service_name).await?;

        if !handle.has_interface() {
            return Err(RidlError::NoInterface(service_name.to_string()));
        }

        info!("Reconstructing {} ({})", service_name, handle.interface_id);

        let interface = self
            .prober
            .probe(self.introspector.as_ref(), &handle.interface_id)
            .await?;

        // Transaction constants live on the nested Stub type, except for
        // the activity manager which keeps them on the interface itself.
        let stub = if service_name == ACTIVITY_SERVICE {
            interface.clone()
        } else {
            self.introspector
                .load_type(&format!("{}$Stub", interface.canonical_name))
                .await?
        };

        let table = extract_transactions(&stub)?;
        debug!("Extracted {} transaction codes", table.len());

        let correlator =
            SignatureCorrelator::new(&interface, &self.config.rendering.remote_exception);

        let mut methods = Vec::new();
        let mut dropped = Vec::new();

        for (code, constant_name) in &table {
            let candidate = method_name_for_transaction(&self.config, service_name, constant_name)?;

            if !filter.matches(*code, &candidate) {
                continue;
            }

            match correlator.correlate(*code, &candidate) {
                Some(resolved) => methods.push(resolved),
                None => {
                    warn!(
                        "Could not find method: {} (transaction code {})",
                        candidate, code
                    );
                    dropped.push(candidate);
                }
            }
        }

        Ok(Reconstruction {
            service: handle.name,
            interface_id: handle.interface_id,
            package: interface.package_name().to_string(),
            interface_name: interface.simple_name().to_string(),
            methods,
            dropped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::introspect::{FieldDescriptor, MethodDescriptor, TypeDescriptor, TypeRef};
    use crate::core::snapshot::SnapshotService;
    use std::collections::HashMap;

    const REMOTE_EXCEPTION: &str = "android.os.RemoteException";

    fn void() -> TypeRef {
        TypeRef {
            canonical_name: "void".to_string(),
            is_primitive: true,
            is_array: false,
        }
    }

    fn transaction_field(name: &str, value: i64) -> FieldDescriptor {
        FieldDescriptor {
            name: name.to_string(),
            field_type: "int".to_string(),
            value,
            accessible: false,
        }
    }

    fn remote_method(name: &str) -> MethodDescriptor {
        MethodDescriptor {
            name: name.to_string(),
            return_type: void(),
            param_types: vec![],
            exception_types: vec![REMOTE_EXCEPTION.to_string()],
        }
    }

    fn engine_with(snapshot: MetadataSnapshot) -> Engine {
        let snapshot = Arc::new(snapshot);
        Engine::new(Config::default(), snapshot.clone(), snapshot)
    }

    fn vibrator_snapshot() -> MetadataSnapshot {
        let mut types = HashMap::new();

        types.insert(
            "android.os.IVibratorService".to_string(),
            TypeDescriptor {
                canonical_name: "android.os.IVibratorService".to_string(),
                fields: vec![],
                methods: vec![remote_method("vibrate"), remote_method("cancelVibrate")],
            },
        );
        types.insert(
            "android.os.IVibratorService$Stub".to_string(),
            TypeDescriptor {
                canonical_name: "android.os.IVibratorService$Stub".to_string(),
                fields: vec![
                    transaction_field("TRANSACTION_vibrate", 1),
                    transaction_field("TRANSACTION_cancelVibrate", 2),
                    transaction_field("TRANSACTION_vibrateGone", 3),
                ],
                methods: vec![],
            },
        );

        MetadataSnapshot {
            services: vec![
                SnapshotService {
                    name: "vibrator".to_string(),
                    interface: "IVibratorService".to_string(),
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
    async fn test_reconstruct_resolves_through_stub() {
        let engine = engine_with(vibrator_snapshot());
        let recon = engine
            .reconstruct("vibrator", &RenderFilter::All)
            .await
            .unwrap();

        assert_eq!(recon.package, "android.os");
        assert_eq!(recon.interface_name, "IVibratorService");

        let names: Vec<&str> = recon.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["vibrate", "cancelVibrate"]);

        // Code 3 has no declared method; the rest still resolved.
        assert_eq!(recon.dropped, vec!["vibrateGone".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_descriptor_is_no_interface_without_type_load() {
        // The snapshot has no types at all, so any load attempt would
        // surface as ClassNotFound instead of NoInterface.
        let snapshot = MetadataSnapshot {
            services: vec![SnapshotService {
                name: "media.camera".to_string(),
                interface: String::new(),
            }],
            types: HashMap::new(),
        };

        let engine = engine_with(snapshot);
        let err = engine
            .reconstruct("media.camera", &RenderFilter::All)
            .await
            .unwrap_err();

        assert!(matches!(err, RidlError::NoInterface(_)));
    }

    #[tokio::test]
    async fn test_activity_constants_read_from_interface_itself() {
        let mut types = HashMap::new();
        types.insert(
            "android.app.IActivityManager".to_string(),
            TypeDescriptor {
                canonical_name: "android.app.IActivityManager".to_string(),
                fields: vec![
                    transaction_field("CLEAR_APP_DATA_TRANSACTION", 1),
                    transaction_field("SHUTDOWN_TRANSACTION", 2),
                ],
                methods: vec![
                    remote_method("clearApplicationUserData"),
                    remote_method("shutdown"),
                ],
            },
        );

        let snapshot = MetadataSnapshot {
            services: vec![SnapshotService {
                name: "activity".to_string(),
                interface: "android.app.IActivityManager".to_string(),
            }],
            types,
        };

        let engine = engine_with(snapshot);
        let recon = engine
            .reconstruct("activity", &RenderFilter::All)
            .await
            .unwrap();

        // No Stub type exists in the snapshot; the quirk table mapped
        // clearAppData to the declared name.
        let names: Vec<&str> = recon.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["clearApplicationUserData", "shutdown"]);
        assert!(recon.dropped.is_empty());
    }

    #[tokio::test]
    async fn test_filter_skips_non_matching_entries() {
        let engine = engine_with(vibrator_snapshot());
        let recon = engine
            .reconstruct("vibrator", &RenderFilter::Name("vibrate".to_string()))
            .await
            .unwrap();

        assert_eq!(recon.methods.len(), 1);
        assert_eq!(recon.methods[0].code, 1);
        // Filtered-out entries are skipped, not reported as dropped.
        assert!(recon.dropped.is_empty());
    }

    struct DownRegistry;

    #[async_trait::async_trait]
    impl ServiceRegistry for DownRegistry {
        async fn list_names(&self) -> crate::error::Result<Vec<String>> {
            Err(RidlError::Remote("binder transport went away".to_string()))
        }

        async fn resolve(&self, _name: &str) -> crate::error::Result<ServiceHandle> {
            Err(RidlError::Remote("binder transport went away".to_string()))
        }
    }

    #[tokio::test]
    async fn test_registry_failure_is_fatal_to_current_operation() {
        let snapshot = Arc::new(vibrator_snapshot());
        let engine = Engine::new(Config::default(), Arc::new(DownRegistry), snapshot);

        assert!(matches!(
            engine.list_services().await,
            Err(RidlError::Remote(_))
        ));
        assert!(matches!(
            engine.reconstruct("vibrator", &RenderFilter::All).await,
            Err(RidlError::Remote(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_service_fails() {
        let engine = engine_with(vibrator_snapshot());
        let err = engine
            .reconstruct("nosuch", &RenderFilter::All)
            .await
            .unwrap_err();
        assert!(matches!(err, RidlError::ServiceNotFound(_)));
    }
}
