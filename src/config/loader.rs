//! Settings resolution: config file discovery plus defaults.

use std::path::PathBuf;

use super::{Config, ConfigError, Settings};

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Load config from the appropriate source based on options.
///
/// An explicit `--config` file must load; a discovered one that fails is
/// ignored with a warning.
async fn load_file_config(options: &LoadOptions) -> Result<Config, ConfigError> {
    if let Some(ref config_path) = options.config_path {
        return Config::load_from_path(config_path).await;
    }
    Ok(Config::load().await)
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let config = load_file_config(&options).await?;

    let mut settings = Settings::default();

    // Determine base directory for resolving relative paths
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd()
    } else {
        config.base_dir().unwrap_or_else(cwd)
    };

    config.apply_to_settings(&mut settings, &base_dir)?;
    tracing::debug!("Resolved settings: {:?}", settings);

    Ok((settings, config))
}
