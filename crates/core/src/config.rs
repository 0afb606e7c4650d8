use serde::Deserialize;

/// Action hub configuration. Loaded from environment variables with the
/// prefix `ACTION_HUB_` (e.g. `ACTION_HUB_BASE_URL`).
#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base64-encoded 256-bit key for state token encryption.
    #[serde(default)]
    pub cipher_master: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cipher_master: None,
        }
    }
}

impl HubConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("ACTION_HUB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
