//! TestHost plugin inspector.
//!
//! Loads the configured modules into a plugin loader, finalizes it, and
//! prints what each extension point ended up with.

mod catalog;

use tracing_subscriber::{EnvFilter, fmt};

use testhost_core::config::AppConfig;
use testhost_core::error::AppError;
use testhost_plugin::{FinalizedPlugins, PluginLoader};

use catalog::ModuleCatalog;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    match run(&config).await.and_then(|finalized| render_summary(&finalized)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Plugin loading failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("TESTHOST_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Offer every configured module to the loader, in order, then finalize.
async fn run(config: &AppConfig) -> Result<FinalizedPlugins, AppError> {
    let catalog = ModuleCatalog::builtin();
    let mut loader = PluginLoader::new();

    for name in &config.plugins.require {
        let Some(exports) = catalog.resolve(name) else {
            if config.plugins.fail_on_unknown {
                return Err(AppError::not_found(format!(
                    "Unknown plugin module '{}' (known: {})",
                    name,
                    catalog.names().join(", ")
                )));
            }
            tracing::warn!(module = %name, "Skipping unknown plugin module");
            continue;
        };

        loader.load(&exports)?;
        tracing::info!(module = %name, "Plugin module loaded");
    }

    Ok(loader.finalize().await?)
}

/// Pretty JSON summary of what each extension point received.
fn render_summary(finalized: &FinalizedPlugins) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&finalized.summary())?)
}
