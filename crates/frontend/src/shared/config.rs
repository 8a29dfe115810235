use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub data: DataConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DataConfig {
    /// Where the consumer dataset is fetched from
    pub url: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
    pub level: String,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[data]
url = "/data/chocolate-data.json"

[log]
level = "debug"
"#;

/// Query-string keys that override the embedded defaults.
#[derive(Debug, Deserialize, Default)]
struct ConfigOverrides {
    data: Option<String>,
    log: Option<String>,
}

/// Load configuration: embedded defaults, then `?data=` / `?log=` from the
/// page query string.
///
/// A query string that cannot be parsed leaves the defaults untouched.
pub fn load_config(query: &str) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig =
        toml::from_str(DEFAULT_CONFIG).context("embedded default config is invalid")?;

    let overrides: ConfigOverrides =
        serde_qs::from_str(query.trim_start_matches('?')).unwrap_or_default();
    if let Some(url) = overrides.data.filter(|u| !u.trim().is_empty()) {
        config.data.url = url;
    }
    if let Some(level) = overrides.log {
        config.log.level = level;
    }
    Ok(config)
}

impl AppConfig {
    /// Configured level, `Info` when the string is not a known level.
    pub fn log_level(&self) -> log::Level {
        self.log.level.parse().unwrap_or(log::Level::Info)
    }
}

/// Config of the running page; defaults when the window is unavailable.
pub fn load_page_config() -> anyhow::Result<AppConfig> {
    let search = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    load_config(&search)
}
