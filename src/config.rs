use anyhow::Result;
use serde::Deserialize;

/// Environment variable naming the config file the plugin should read
pub const CONFIG_PATH_ENV: &str = "OBSC_CONFIG";

/// Config file looked up in the working directory when `OBSC_CONFIG` is unset
pub const DEFAULT_CONFIG_NAME: &str = "obs-controller";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub apps: AppsConfig,
    pub recording: RecordingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Start the control API once the frontend has finished loading
    pub enabled: bool,
    pub bind: String,
    pub port: u16,
    /// Reject requests without a valid app signature
    pub require_auth: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppsConfig {
    pub registry_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordingConfig {
    /// Put the previous filename format back when a custom-name recording stops
    pub restore_file_name: bool,
}

impl Config {
    /// Load defaults, then `path` (if given and present), then `OBSC_*` environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.enabled", true)?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8085)?
            .set_default("server.require_auth", true)?
            .set_default("apps.registry_path", "obs-controller-apps.ock")?
            .set_default("recording.restore_file_name", true)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("OBSC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Config for the plugin: `$OBSC_CONFIG` or `obs-controller.*` in the working directory.
    pub fn load_for_plugin() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_NAME.to_string());
        Self::load(Some(&path))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                enabled: true,
                bind: "127.0.0.1".to_string(),
                port: 8085,
                require_auth: true,
            },
            apps: AppsConfig {
                registry_path: "obs-controller-apps.ock".to_string(),
            },
            recording: RecordingConfig {
                restore_file_name: true,
            },
        }
    }
}
