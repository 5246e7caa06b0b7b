use tracing::debug;

use crate::config::ProbingConfig;
use crate::error::{Result, RidlError};

use super::introspect::{TypeDescriptor, TypeIntrospector};

/// Resolves a bare interface descriptor to a loadable type.
///
/// Some services report a simplified interface name instead of a canonical
/// one; the prober tries each configured namespace prefix in order until a
/// load succeeds.
pub struct NamespaceProber {
    prefixes: Vec<String>,
}

impl NamespaceProber {
    pub fn new(config: &ProbingConfig) -> Self {
        Self {
            prefixes: config.namespace_prefixes.clone(),
        }
    }

    pub async fn probe(
        &self,
        introspector: &dyn TypeIntrospector,
        interface_id: &str,
    ) -> Result<TypeDescriptor> {
        for prefix in &self.prefixes {
            let qualified = format!("{}{}", prefix, interface_id);

            match introspector.load_type(&qualified).await {
                Ok(descriptor) => {
                    debug!("Resolved interface {} as {}", interface_id, qualified);
                    return Ok(descriptor);
                }
                Err(RidlError::ClassNotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(RidlError::ClassNotFound(interface_id.to_string()))
    }
}
