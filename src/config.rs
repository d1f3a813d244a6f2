// Gateway configuration, read from the environment exactly once in the
// composition root. Core code never touches ambient process state; it
// receives collaborators and settings by construction, so tests can
// substitute fakes freely.

/// Application configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Key for the reasoning collaborator. Absent means moderation runs
    /// rules-only, verification runs fallback-only, and reply generation
    /// is unavailable.
    pub openai_api_key: Option<String>,
    /// Model for moderation and verification calls.
    pub openai_model: String,
    /// Model for peer reply generation.
    pub reply_model: String,
    pub platform_base_url: String,
    /// Credentials for the flag-notification webhook back to the platform.
    pub platform_api_key: Option<String>,
    pub platform_api_username: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            openai_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            reply_model: "gpt-4".to_string(),
            platform_base_url: "http://discourse:80".to_string(),
            platform_api_key: None,
            platform_api_username: "system".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, defaulting anything
    /// unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            reply_model: std::env::var("OPENAI_REPLY_MODEL").unwrap_or(defaults.reply_model),
            platform_base_url: std::env::var("PLATFORM_BASE_URL")
                .unwrap_or(defaults.platform_base_url),
            platform_api_key: std::env::var("PLATFORM_API_KEY").ok(),
            platform_api_username: std::env::var("PLATFORM_API_USERNAME")
                .unwrap_or(defaults.platform_api_username),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_joins_host_and_port() {
        let config = GatewayConfig {
            host: "0.0.0.0".to_string(),
            port: 9090,
            ..GatewayConfig::default()
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
    }
}
