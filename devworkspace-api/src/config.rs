use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Prefix every DevWorkspace route is mounted under.
    #[serde(default = "default_base_api_path")]
    pub base_api_path: String,

    /// Routing class injected into every DevWorkspace the gateway creates.
    #[serde(default = "default_routing_class")]
    pub routing_class: String,
}

fn default_bind_addr() -> String {
    std::env::var("DEVWORKSPACE_API_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

fn default_base_api_path() -> String {
    std::env::var("DEVWORKSPACE_API_BASE_PATH").unwrap_or_else(|_| "/api".to_string())
}

fn default_routing_class() -> String {
    std::env::var("DEVWORKSPACE_API_ROUTING_CLASS").unwrap_or_else(|_| "che".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            base_api_path: default_base_api_path(),
            routing_class: default_routing_class(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Check the configuration and normalize the base path.
    pub fn validate(mut self) -> anyhow::Result<Self> {
        if self.routing_class.trim().is_empty() {
            anyhow::bail!("routing class must not be empty");
        }

        let trimmed = self.base_api_path.trim_end_matches('/');
        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            anyhow::bail!(
                "base API path must start with '/': {:?}",
                self.base_api_path
            );
        }
        self.base_api_path = trimmed.to_string();

        Ok(self)
    }
}
