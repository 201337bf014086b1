use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::core::DEFAULT_SHORT_LINK_HOSTS;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub maps: MapSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ResolverSettings {
    #[serde(default = "default_short_link_hosts")]
    pub short_link_hosts: Vec<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            short_link_hosts: default_short_link_hosts(),
        }
    }
}

fn default_short_link_hosts() -> Vec<String> {
    DEFAULT_SHORT_LINK_HOSTS.iter().map(|h| h.to_string()).collect()
}

/// Map widget appearance
#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_voting_zoom")]
    pub voting_zoom: u8,
    #[serde(default = "default_mini_zoom")]
    pub mini_zoom: u8,
    #[serde(default = "default_voting_map_id")]
    pub voting_map_id: String,
    #[serde(default = "default_mini_map_id")]
    pub mini_map_id: String,
    #[serde(default = "default_marker_icon_url")]
    pub marker_icon_url: String,
    #[serde(default = "default_marker_size")]
    pub marker_size_px: u16,
    #[serde(default = "default_mini_marker_size")]
    pub mini_marker_size_px: u16,
    #[serde(default = "default_marker_title")]
    pub default_marker_title: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            voting_zoom: default_voting_zoom(),
            mini_zoom: default_mini_zoom(),
            voting_map_id: default_voting_map_id(),
            mini_map_id: default_mini_map_id(),
            marker_icon_url: default_marker_icon_url(),
            marker_size_px: default_marker_size(),
            mini_marker_size_px: default_mini_marker_size(),
            default_marker_title: default_marker_title(),
        }
    }
}

fn default_voting_zoom() -> u8 { 15 }
fn default_mini_zoom() -> u8 { 14 }
fn default_voting_map_id() -> String { "restaurant_poll_map".to_string() }
fn default_mini_map_id() -> String { "restaurant_poll_mini_map".to_string() }
fn default_marker_icon_url() -> String { "https://maps.google.com/mapfiles/ms/icons/restaurant.png".to_string() }
fn default_marker_size() -> u16 { 32 }
fn default_mini_marker_size() -> u16 { 24 }
fn default_marker_title() -> String { "Restaurant Location".to_string() }

/// Interaction timings
#[derive(Debug, Clone, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_alert_dismiss")]
    pub alert_dismiss_ms: u64,
    #[serde(default = "default_alert_fade")]
    pub alert_fade_ms: u64,
    #[serde(default = "default_label_delay")]
    pub label_delay_ms: u64,
}

impl UiSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn alert_fade(&self) -> Duration {
        Duration::from_millis(self.alert_fade_ms)
    }

    pub fn label_delay(&self) -> Duration {
        Duration::from_millis(self.label_delay_ms)
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            alert_dismiss_ms: default_alert_dismiss(),
            alert_fade_ms: default_alert_fade(),
            label_delay_ms: default_label_delay(),
        }
    }
}

fn default_refresh_interval() -> u64 { 30 }
fn default_alert_dismiss() -> u64 { 5000 }
fn default_alert_fade() -> u64 { 150 }
fn default_label_delay() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with POLL_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., POLL__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("POLL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("POLL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply conventional hosting variables (`PORT`, `LOG_LEVEL`, `LOG_FORMAT`)
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(port) = env::var("PORT") {
        match port.parse::<u16>() {
            Ok(port) => builder = builder.set_override("server.port", port as i64)?,
            Err(_) => tracing::warn!("Ignoring invalid PORT value: {}", port),
        }
    }
    if let Ok(level) = env::var("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Ok(format) = env::var("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_ui_timings() {
        let ui = UiSettings::default();
        assert_eq!(ui.refresh_interval(), Duration::from_secs(30));
        assert_eq!(ui.alert_dismiss(), Duration::from_millis(5000));
        assert_eq!(ui.alert_fade(), Duration::from_millis(150));
        assert_eq!(ui.label_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_default_short_link_hosts() {
        let resolver = ResolverSettings::default();
        assert_eq!(resolver.short_link_hosts, vec!["goo.gl/maps", "maps.app.goo.gl"]);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_partial_file() {
        let path = std::env::temp_dir().join(format!("poll-settings-{}.toml", uuid::Uuid::new_v4()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9090\n\n[maps]\nvoting_zoom = 12").unwrap();
        drop(file);

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.maps.voting_zoom, 12);
        assert_eq!(settings.maps.mini_zoom, 14);
        assert_eq!(settings.ui.refresh_interval_secs, 30);
    }
}
