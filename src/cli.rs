use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::core::{render, Engine, RenderFilter};
use crate::error::RidlError;

#[derive(Parser)]
#[command(name = "ridl")]
#[command(about = "Reconstructs AIDL-style interface definitions from live binder services")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the introspection snapshot
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,

    /// List all registered services and their interface descriptors
    #[arg(short, long)]
    pub list: bool,

    /// Append transaction code comments to rendered signatures
    #[arg(short = 'n', long)]
    pub show_codes: bool,

    /// Service to reconstruct
    pub service: Option<String>,

    /// Transaction code or method name to render on its own
    pub selector: Option<String>,
}

impl Cli {
    pub async fn execute(self, engine: Engine) -> Result<()> {
        if self.list {
            return list_services(&engine).await;
        }

        let service = match self.service {
            Some(service) => service,
            None => {
                print_version();
                return Ok(());
            }
        };

        let filter = RenderFilter::from_selector(self.selector.as_deref());

        let recon = match engine.reconstruct(&service, &filter).await {
            Ok(recon) => recon,
            // A service without an interface is a normal negative result.
            Err(RidlError::NoInterface(name)) => {
                warn!("No interface descriptor returned for service: '{}'", name);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let text = render(
            &recon,
            &filter,
            self.show_codes,
            &engine.config().rendering,
        );

        if !text.is_empty() {
            println!("{}", text);
        }

        Ok(())
    }
}

/// Stderr diagnostics default to WARN so negative results (no interface,
/// unresolvable methods) stay visible; RUST_LOG still overrides.
pub fn default_log_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy()
}

/// The one version line, shared by `--version` and the bare invocation
pub fn version_line() -> String {
    format!("ridl {}", env!("CARGO_PKG_VERSION"))
}

pub fn print_version() {
    println!("{}", version_line());
}

async fn list_services(engine: &Engine) -> Result<()> {
    let handles = engine.list_services().await?;

    for handle in handles {
        if handle.has_interface() {
            println!("{}: {}", handle.name, handle.interface_id);
        } else {
            println!("{}: No Interface", handle.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tracing::Level;

    #[test]
    fn test_default_filter_lets_warnings_through() {
        std::env::remove_var("RUST_LOG");

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(default_log_filter())
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            // Negative-result reports are emitted at WARN and must not be
            // filtered out of stderr by default.
            assert!(tracing::enabled!(Level::WARN));
            assert!(tracing::enabled!(Level::ERROR));
            assert!(!tracing::enabled!(Level::DEBUG));
        });
    }

    #[test]
    fn test_version_output_agrees_on_both_paths() {
        let rendered = Cli::command().render_version();
        assert_eq!(rendered.trim_end(), version_line());
    }
}
