//! Configuration for the model endpoint

use std::time::Duration;
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY: &str = "";
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/v1";
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 128;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "API_BASE";
pub const MODEL_NAME_ENV: &str = "MODEL_NAME";

/// Endpoint and request settings shared by the answerer and the judge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig
{   /// Bearer credential sent with every request
    pub api_key: String
  , /// Endpoint root, `/chat/completions` is appended
    pub base_url: String
  , /// Model identifier sent in the request body
    pub model_name: String
  , /// Request timeout in seconds
    pub timeout_secs: u64
  , /// `max_tokens` sent with every request
    pub max_output_tokens: u32
}

impl Default for HarnessConfig
{   fn default() -> Self
    {   HarnessConfig
        {   api_key: DEFAULT_API_KEY.to_string()
          , base_url: DEFAULT_API_BASE.to_string()
          , model_name: DEFAULT_MODEL_NAME.to_string()
          , timeout_secs: DEFAULT_TIMEOUT_SECS
          , max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS
        }
    }
}

impl HarnessConfig
{   /// Build from `OPENAI_API_KEY`, `API_BASE` and `MODEL_NAME`,
    /// using defaults for anything unset
    pub fn from_env() -> Self
    {   let defaults = HarnessConfig::default();
        let config = HarnessConfig
        {   api_key: std::env::var(API_KEY_ENV)
              .unwrap_or(defaults.api_key)
          , base_url: std::env::var(API_BASE_ENV)
              .unwrap_or(defaults.base_url)
          , model_name: std::env::var(MODEL_NAME_ENV)
              .unwrap_or(defaults.model_name)
          , ..defaults
        };
        debug!(
          "Config from env: base_url={} model={}",
          config.base_url, config.model_name
        );
        config
    }

    pub fn timeout(&self) -> Duration
    {   Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the chat completion endpoint
    pub fn completions_url(&self) -> String
    {   format!(
          "{}/chat/completions",
          self.base_url.trim_end_matches('/')
        )
    }

    pub fn validate(&self) -> Result<(), crate::error::Error>
    {   if self.base_url.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "base_url must not be empty".to_string()
            ));
        }
        if self.model_name.trim().is_empty()
        {   return Err(crate::error::Error::InvalidConfiguration(
              "model_name must not be empty".to_string()
            ));
        }
        if self.timeout_secs == 0
        {   return Err(crate::error::Error::InvalidConfiguration(
              "timeout_secs must be greater than zero".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn completions_url_strips_trailing_slash()
    {   let config = HarnessConfig
        {   base_url: "http://example.test/v1/".to_string()
          , ..HarnessConfig::default()
        };
        assert_eq!(
          config.completions_url(),
          "http://example.test/v1/chat/completions"
        );
    }

    #[test]
    fn from_env_overrides_then_defaults()
    {   std::env::set_var(API_KEY_ENV, "env-key");
        std::env::set_var(API_BASE_ENV, "http://env.test/v1");
        std::env::set_var(MODEL_NAME_ENV, "env-model");
        let config = HarnessConfig::from_env();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://env.test/v1");
        assert_eq!(config.model_name, "env-model");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(API_BASE_ENV);
        std::env::remove_var(MODEL_NAME_ENV);
        assert_eq!(HarnessConfig::from_env(), HarnessConfig::default());
    }

    #[test]
    fn validate_rejects_zero_timeout()
    {   let config = HarnessConfig
        {   timeout_secs: 0
          , ..HarnessConfig::default()
        };
        assert!(matches!(
          config.validate(),
          Err(crate::error::Error::InvalidConfiguration(_))
        ));
        assert!(HarnessConfig::default().validate().is_ok());
    }
}
