use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `PLAYDECK__`) over an
/// optional config file over struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("PLAYDECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), String> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(format!("playback.volume must be within 0..=1, got {volume}"));
        }
        let t = &self.timing;
        for (name, value) in [
            ("timing.progress_interval_ms", t.progress_interval_ms),
            ("timing.ready_poll_interval_ms", t.ready_poll_interval_ms),
            ("timing.ready_timeout_ms", t.ready_timeout_ms),
        ] {
            if value == 0 {
                return Err(format!("{name} must be >= 1"));
            }
        }
        if self.controls.volume_step_percent == 0 || self.controls.volume_step_percent > 100 {
            return Err("controls.volume_step_percent must be within 1..=100".to_string());
        }
        if self.views.enabled && self.views.base_url.as_deref().is_none_or(str::is_empty) {
            return Err("views.base_url is required when views.enabled is set".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `PLAYDECK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("PLAYDECK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/playdeck/config.toml`
/// or `~/.config/playdeck/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("playdeck").join("config.toml"))
}
