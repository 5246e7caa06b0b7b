use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, RidlError};

/// A single naming quirk: the mechanical transformation of a transaction
/// constant does not always match the declared method name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quirk {
    /// Service the quirk applies to (exact match)
    pub service: String,

    /// Method name produced by the mechanical transformation
    pub mechanical_name: String,

    /// Actual declared method name
    pub method_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Namespace probing configuration
    pub probing: ProbingConfig,

    /// Method name resolution settings
    pub resolution: ResolutionConfig,

    /// Rendering settings
    pub rendering: RenderingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbingConfig {
    /// Namespace prefixes tried, in order, when an interface descriptor
    /// is not a loadable canonical name. The empty prefix must come first
    /// so canonical descriptors resolve without decoration.
    pub namespace_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Known mismatches between mechanical names and declared names.
    /// Entries are additive; never change an existing one.
    pub quirks: Vec<Quirk>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Exception type that marks a method as remotely invocable
    pub remote_exception: String,

    /// Namespace whose types never need an import
    pub implicit_namespace: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probing: ProbingConfig {
                namespace_prefixes: vec![
                    "".to_string(),
                    "android.os.".to_string(),
                    "android.os.storage.".to_string(),
                    "android.service.".to_string(),
                    "android.service.notification.".to_string(),
                    "android.service.textservice.".to_string(),
                    "android.accessibilityservice.".to_string(),
                ],
            },
            resolution: ResolutionConfig {
                quirks: vec![
                    Quirk {
                        service: "activity".to_string(),
                        mechanical_name: "clearAppData".to_string(),
                        method_name: "clearApplicationUserData".to_string(),
                    },
                    Quirk {
                        service: "activity".to_string(),
                        mechanical_name: "getDeviceConfiguration".to_string(),
                        method_name: "getDeviceConfigurationInfo".to_string(),
                    },
                    Quirk {
                        service: "activity".to_string(),
                        mechanical_name: "startBackupAgent".to_string(),
                        method_name: "bindBackupAgent".to_string(),
                    },
                ],
            },
            rendering: RenderingConfig {
                remote_exception: "android.os.RemoteException".to_string(),
                implicit_namespace: "java.lang".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| RidlError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Load configuration with fallback to default
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                if p.as_ref().exists() {
                    Self::load(p)
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                let candidates = ["Ridl.toml", "ridl.toml", ".ridl.toml"];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    /// Look up a quirk override for a (service, mechanical name) pair
    pub fn quirk_override(&self, service: &str, mechanical_name: &str) -> Option<&str> {
        self.resolution
            .quirks
            .iter()
            .find(|q| q.service == service && q.mechanical_name == mechanical_name)
            .map(|q| q.method_name.as_str())
    }
}
