use panelsync::prelude::{AppEvent, Config, EventBus, FileSystem};
use anyhow::Result;
use std::sync::Arc;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "PANELSYNC_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "panelsync.toml";

/// First CLI argument, then `PANELSYNC_CONFIG`, then `panelsync.toml`
pub fn resolve_path(arg: Option<String>, env: Option<String>) -> String {
    arg.or(env)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Loads and validates the configuration; nothing touches the network before this succeeds
pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = FileSystem::get_absolute_path_string(config_path)?;

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = std::path::Path::new(config_path).exists();
    let config = Config::from_file_with_events(config_path, Some(events)).await;

    if !config_exists {
        events.emit(AppEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    let config = config.and_then(|config| config.validate().map(|_| config));
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            events.emit(AppEvent::ConfigError {
                error: e.to_string(),
            });
            return Err(e.into());
        }
    };

    events.emit(AppEvent::ConfigLoaded {
        panel_url: config.panel_base_url().to_string(),
        root: config.sync.root.clone(),
    });

    Ok(config)
}
