use serde::{Deserialize, Serialize};

pub const ANTHROPIC_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const SERPAPI_KEY_VAR: &str = "SERPAPI_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub serpapi_url: String,
    pub anthropic_url: String,
    pub anthropic_model: String,
    pub max_tokens: u32,
    pub currency: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serpapi_url: "https://serpapi.com".to_string(),
            anthropic_url: "https://api.anthropic.com/v1".to_string(),
            anthropic_model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 2048,
            currency: "GBP".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// What the process environment actually provided, read once.
/// The verification runner reports on each key before any network activity.
#[derive(Debug, Clone, Default)]
pub struct CredentialStatus {
    pub anthropic_key: Option<String>,
    pub serpapi_key: Option<String>,
}

impl CredentialStatus {
    pub fn from_env() -> Self {
        Self {
            anthropic_key: std::env::var(ANTHROPIC_KEY_VAR).ok(),
            serpapi_key: std::env::var(SERPAPI_KEY_VAR).ok(),
        }
    }

    /// Both keys present, or `None` naming nothing in particular; callers
    /// that need the missing name check the fields directly.
    pub fn validated(&self) -> Option<Credentials> {
        match (&self.anthropic_key, &self.serpapi_key) {
            (Some(anthropic), Some(serpapi)) => Some(Credentials {
                anthropic_key: anthropic.clone(),
                serpapi_key: serpapi.clone(),
            }),
            _ => None,
        }
    }
}

/// A validated pair of API keys. Only constructed via
/// [`CredentialStatus::validated`], so holders never carry empty keys.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub anthropic_key: String,
    pub serpapi_key: String,
}

impl Credentials {
    pub fn from_env() -> crate::utils::Result<Self> {
        let status = CredentialStatus::from_env();
        if status.anthropic_key.is_none() {
            return Err(crate::utils::AppError::MissingCredential(ANTHROPIC_KEY_VAR));
        }
        if status.serpapi_key.is_none() {
            return Err(crate::utils::AppError::MissingCredential(SERPAPI_KEY_VAR));
        }
        status
            .validated()
            .ok_or(crate::utils::AppError::MissingCredential(SERPAPI_KEY_VAR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_public_endpoints() {
        let config = Config::default();
        assert_eq!(config.serpapi_url, "https://serpapi.com");
        assert_eq!(config.anthropic_url, "https://api.anthropic.com/v1");
        assert_eq!(config.currency, "GBP");
    }

    #[test]
    fn validated_requires_both_keys() {
        let status = CredentialStatus {
            anthropic_key: Some("sk-ant-test".to_string()),
            serpapi_key: None,
        };
        assert!(status.validated().is_none());

        let status = CredentialStatus {
            anthropic_key: Some("sk-ant-test".to_string()),
            serpapi_key: Some("serp-test".to_string()),
        };
        let creds = status.validated().unwrap();
        assert_eq!(creds.anthropic_key, "sk-ant-test");
        assert_eq!(creds.serpapi_key, "serp-test");
    }
}
