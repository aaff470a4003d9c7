pub mod scoring_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ArchitectError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use clap::Parser;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use scoring_config::ScoringConfig;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";

#[derive(Clone, Serialize, Deserialize, Parser)]
#[command(name = "hr-architect")]
#[command(about = "HR strategic restructuring agent: merit scoring plus watsonx-generated reports")]
pub struct ServiceConfig {
    #[arg(long, env = "ARCHITECT_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "ARCHITECT_PORT", default_value = "8001")]
    pub port: u16,

    #[arg(long, env = "WATSONX_API_KEY", hide_env_values = true)]
    pub watsonx_api_key: String,

    #[arg(long, env = "WATSONX_PROJECT_ID")]
    pub watsonx_project_id: String,

    /// Text generation endpoint, e.g. https://us-south.ml.cloud.ibm.com/ml/v1/text/generation?version=2023-05-29
    #[arg(long, env = "WATSONX_URL")]
    pub watsonx_url: String,

    #[arg(long, env = "MODEL_ID")]
    pub model_id: String,

    #[arg(long, env = "WATSONX_IAM_URL", default_value = DEFAULT_IAM_URL)]
    pub iam_url: String,

    #[arg(long, default_value = "1500")]
    pub max_new_tokens: u32,

    /// Optional TOML file overriding scoring weights, tables and thresholds
    #[arg(long, env = "ARCHITECT_SCORING_CONFIG")]
    pub scoring_config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

// The API key must never reach the logs.
impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("watsonx_api_key", &"***")
            .field("watsonx_project_id", &self.watsonx_project_id)
            .field("watsonx_url", &self.watsonx_url)
            .field("model_id", &self.model_id)
            .field("iam_url", &self.iam_url)
            .field("max_new_tokens", &self.max_new_tokens)
            .field("scoring_config", &self.scoring_config)
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .finish()
    }
}

impl ServiceConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Scoring settings from `--scoring-config`, or the built-in defaults.
    pub fn load_scoring_config(&self) -> Result<ScoringConfig> {
        let config = match &self.scoring_config {
            Some(path) => {
                tracing::info!("📁 Loading scoring config from: {}", path.display());
                ScoringConfig::from_file(path)?
            }
            None => ScoringConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl ConfigProvider for ServiceConfig {
    fn iam_endpoint(&self) -> &str {
        &self.iam_url
    }

    fn generation_endpoint(&self) -> &str {
        &self.watsonx_url
    }

    fn api_key(&self) -> &str {
        &self.watsonx_api_key
    }

    fn project_id(&self) -> &str {
        &self.watsonx_project_id
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn max_new_tokens(&self) -> u32 {
        self.max_new_tokens
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_url("watsonx_url", &self.watsonx_url)?;
        validate_url("iam_url", &self.iam_url)?;

        if self.watsonx_api_key.trim().is_empty() {
            return Err(ArchitectError::MissingConfigError {
                field: "WATSONX_API_KEY".to_string(),
            });
        }
        validate_non_empty_string("watsonx_project_id", &self.watsonx_project_id)?;
        validate_non_empty_string("model_id", &self.model_id)?;
        validate_range("max_new_tokens", self.max_new_tokens, 1, 8192)?;

        Ok(())
    }
}

/// 替換環境變數 (例如 ${API_KEY}); unknown variables are left as written.
pub(crate) fn substitute_env_vars(content: &str) -> String {
    static PATTERN: std::sync::OnceLock<Option<Regex>> = std::sync::OnceLock::new();
    let Some(re) = PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").ok()) else {
        return content.to_string();
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "hr-architect",
            "--watsonx-api-key",
            "secret-key",
            "--watsonx-project-id",
            "project-1",
            "--watsonx-url",
            "https://us-south.ml.cloud.ibm.com/ml/v1/text/generation?version=2023-05-29",
            "--model-id",
            "ibm/granite-13b-instruct-v2",
        ]
    }

    #[test]
    fn test_parse_cli_defaults() {
        let config = ServiceConfig::try_parse_from(base_args()).unwrap();

        assert_eq!(config.port, 8001);
        assert_eq!(config.iam_url, DEFAULT_IAM_URL);
        assert_eq!(config.max_new_tokens, 1500);
        assert_eq!(config.bind_address(), "0.0.0.0:8001");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ServiceConfig::try_parse_from(base_args()).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_invalid_generation_url() {
        let mut config = ServiceConfig::try_parse_from(base_args()).unwrap();
        config.watsonx_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let mut config = ServiceConfig::try_parse_from(base_args()).unwrap();
        config.watsonx_api_key = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ArchitectError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_load_scoring_config_defaults() {
        let config = ServiceConfig::try_parse_from(base_args()).unwrap();
        let scoring = config.load_scoring_config().unwrap();
        assert_eq!(scoring, ScoringConfig::default());
    }

    #[test]
    fn test_unreadable_scoring_config_is_config_error() {
        let mut args = base_args();
        args.extend(["--scoring-config", "/nonexistent/hr-architect/scoring.toml"]);
        let config = ServiceConfig::try_parse_from(args).unwrap();

        match config.load_scoring_config() {
            Err(ArchitectError::ConfigError { message }) => {
                assert!(message.contains("/nonexistent/hr-architect/scoring.toml"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_substitute_leaves_unknown_vars() {
        let out = substitute_env_vars("label = \"${HR_ARCHITECT_SURELY_UNSET}\"");
        assert_eq!(out, "label = \"${HR_ARCHITECT_SURELY_UNSET}\"");
    }
}
