use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Handle to a registered service endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHandle {
    /// Registry name of the service, e.g. "phone"
    pub name: String,

    /// Self-reported interface descriptor. Empty means the service
    /// exposes no interface and nothing can be reconstructed.
    pub interface_id: String,
}

impl ServiceHandle {
    pub fn has_interface(&self) -> bool {
        !self.interface_id.is_empty()
    }
}

/// Capability contract over the operating system's service registry.
///
/// Calls may cross an IPC boundary; transport failures surface as
/// [`RidlError::Remote`](crate::error::RidlError::Remote) and are fatal
/// to the current operation only.
#[async_trait::async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Names of all currently registered services
    async fn list_names(&self) -> Result<Vec<String>>;

    /// Resolve a service name to a live handle
    async fn resolve(&self, name: &str) -> Result<ServiceHandle>;
}
