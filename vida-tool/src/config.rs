use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;
use vida_assistant::{DEFAULT_REPLY_TIMEOUT, DEFAULT_STORAGE_KEY};

use crate::error::VidaError;
use crate::store::{StoreType, default_store_path};

/// Context tag sent with every remote request unless configured otherwise.
pub const DEFAULT_CONTEXT: &str = "sitio_web_vida";

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize)]
pub struct RemoteConfig {
    /// Full URL of the reply endpoint; unset means local rules only.
    pub endpoint: Option<String>,
    #[serde(default = "default_context")]
    pub context: Option<String>,
    #[serde(default)]
    pub include_history: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            context: default_context(),
            include_history: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub r#type: StoreType,
    pub path: Option<PathBuf>,
    pub key: Option<String>,
}

fn default_context() -> Option<String> {
    Some(DEFAULT_CONTEXT.to_string())
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REPLY_TIMEOUT.as_secs()
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("vida").join("config.toml"))
}

pub fn parse_config(content: &str) -> Result<Config, VidaError> {
    Ok(toml::from_str(content)?)
}

pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };

    let Ok(content) = std::fs::read_to_string(&path) else {
        return Config::default();
    };

    parse_config(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
        Config::default()
    })
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub store_type: Option<StoreType>,
    pub store_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub local_only: bool,
}

impl Overrides {
    /// Fills unset values from `VIDA_REMOTE_ENDPOINT` and `VIDA_STORE`.
    pub fn with_env(mut self) -> Self {
        if self.endpoint.is_none() {
            self.endpoint = non_empty_env("VIDA_REMOTE_ENDPOINT");
        }
        if self.store_path.is_none() {
            self.store_path = non_empty_env("VIDA_STORE").map(PathBuf::from);
        }
        self
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Everything needed to open the assistant, after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub store_type: StoreType,
    pub store_path: PathBuf,
    pub storage_key: String,
    pub endpoint: Option<String>,
    pub context: Option<String>,
    pub include_history: bool,
    pub timeout: Duration,
}

impl Settings {
    /// Overrides win over the config file, which wins over defaults.
    pub fn resolve(config: Config, overrides: Overrides) -> Self {
        let endpoint = if overrides.local_only {
            None
        } else {
            overrides.endpoint.or(config.remote.endpoint)
        };

        Self {
            store_type: overrides.store_type.unwrap_or(config.store.r#type),
            store_path: overrides
                .store_path
                .or(config.store.path)
                .unwrap_or_else(default_store_path),
            storage_key: config
                .store
                .key
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            endpoint: endpoint.filter(|e| !e.is_empty()),
            context: config.remote.context.filter(|c| !c.is_empty()),
            include_history: config.remote.include_history,
            timeout: Duration::from_secs(config.remote.timeout_secs.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let settings = Settings::resolve(parse_config("").unwrap(), Overrides::default());

        assert_eq!(settings.store_type, StoreType::Fjall);
        assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(settings.endpoint, None);
        assert_eq!(settings.context.as_deref(), Some(DEFAULT_CONTEXT));
        assert_eq!(settings.timeout, DEFAULT_REPLY_TIMEOUT);
        assert!(!settings.include_history);
    }

    #[test]
    fn config_file_values() {
        let config = parse_config(
            r#"
            [remote]
            endpoint = "https://vidanl.mx/api/chat"
            context = "asistente"
            include_history = true
            timeout_secs = 3

            [store]
            type = "memory"
            path = "/tmp/vida"
            key = "otra.clave"
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(config, Overrides::default());

        assert_eq!(settings.endpoint.as_deref(), Some("https://vidanl.mx/api/chat"));
        assert_eq!(settings.context.as_deref(), Some("asistente"));
        assert!(settings.include_history);
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.store_type, StoreType::Memory);
        assert_eq!(settings.store_path, PathBuf::from("/tmp/vida"));
        assert_eq!(settings.storage_key, "otra.clave");
    }

    #[test]
    fn overrides_win() {
        let config = parse_config(
            r#"
            [remote]
            endpoint = "https://a.mx/api/chat"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            store_type: Some(StoreType::Memory),
            store_path: Some(PathBuf::from("/tmp/otra")),
            endpoint: Some("https://b.mx/api/chat".to_string()),
            local_only: false,
        };

        let settings = Settings::resolve(config, overrides);

        assert_eq!(settings.endpoint.as_deref(), Some("https://b.mx/api/chat"));
        assert_eq!(settings.store_type, StoreType::Memory);
        assert_eq!(settings.store_path, PathBuf::from("/tmp/otra"));
    }

    #[test]
    fn local_only_drops_endpoint() {
        let config = parse_config(
            r#"
            [remote]
            endpoint = "https://a.mx/api/chat"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            local_only: true,
            ..Overrides::default()
        };

        assert_eq!(Settings::resolve(config, overrides).endpoint, None);
    }

    #[test]
    fn empty_context_disables_tag() {
        let config = parse_config(
            r#"
            [remote]
            context = ""
            "#,
        )
        .unwrap();

        assert_eq!(Settings::resolve(config, Overrides::default()).context, None);
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(matches!(
            parse_config("[remote\nendpoint = 1"),
            Err(VidaError::Config(_))
        ));
    }
}
