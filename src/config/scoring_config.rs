use crate::utils::error::{ArchitectError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_positive_number, validate_range,
    Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_SCORING_VERSION: &str = "3.0.0";
pub const DEFAULT_HQ_CAPACITY: usize = 20;
pub const DEFAULT_TOP_TALENT_COUNT: usize = 3;
pub const DEFAULT_SALARY_THRESHOLD: f64 = 100_000.0;
pub const DEFAULT_RISK_LABEL: &str = "High Salary / Low Merit";

/// Weights, lookup tables and thresholds for the merit scoring engine.
///
/// Every section is optional in TOML; whatever is omitted keeps the
/// built-in value. A supplied table replaces the built-in table wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub version: String,
    pub weights: ScoringWeights,
    pub allocation: AllocationConfig,
    pub risk: RiskConfig,
    /// Score for talent or education values not found in the tables.
    pub default_level: u8,
    /// Keys are matched after case normalization ("high" -> "High").
    pub talent_levels: BTreeMap<String, u8>,
    /// Keys are matched exactly.
    pub education_levels: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub performance: f64,
    pub talent: f64,
    pub education: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    pub hq_capacity: usize,
    pub top_talent_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Flag only salaries strictly above this.
    pub salary_threshold: f64,
    pub label: String,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            performance: 0.5,
            talent: 0.3,
            education: 0.2,
        }
    }
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            hq_capacity: DEFAULT_HQ_CAPACITY,
            top_talent_count: DEFAULT_TOP_TALENT_COUNT,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            salary_threshold: DEFAULT_SALARY_THRESHOLD,
            label: DEFAULT_RISK_LABEL.to_string(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let talent_levels = [
            ("High", 5),
            ("Medium", 3),
            ("Low", 1),
            ("5", 5),
            ("4", 4),
            ("3", 3),
            ("2", 2),
            ("1", 1),
        ];
        let education_levels = [
            ("PhD", 5),
            ("Doctorate", 5),
            ("MD", 5),
            ("JD", 5),
            ("Master", 4),
            ("Masters", 4),
            ("MSc", 4),
            ("Bachelor", 3),
            ("Bachelors", 3),
            ("BSc", 3),
            ("BSN", 3),
            ("Associate", 2),
            ("High School", 1),
        ];

        Self {
            version: DEFAULT_SCORING_VERSION.to_string(),
            weights: ScoringWeights::default(),
            allocation: AllocationConfig::default(),
            risk: RiskConfig::default(),
            default_level: 1,
            talent_levels: talent_levels
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            education_levels: education_levels
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

/// First character upper-case, the rest lower-case.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl ScoringConfig {
    /// 從 TOML 檔案載入評分設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ArchitectError::ConfigError {
            message: format!(
                "Cannot read scoring config {}: {}",
                path.as_ref().display(),
                e
            ),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = super::substitute_env_vars(content);

        let mut config: ScoringConfig =
            toml::from_str(&processed_content).map_err(|e| {
                ArchitectError::ConfigValidationError {
                    field: "toml_parsing".to_string(),
                    message: format!("TOML parsing error: {}", e),
                }
            })?;

        config.talent_levels = config
            .talent_levels
            .into_iter()
            .map(|(k, v)| (capitalize(&k), v))
            .collect();

        Ok(config)
    }

    pub fn talent_score(&self, talent: &str) -> u8 {
        self.talent_levels
            .get(&capitalize(talent))
            .copied()
            .unwrap_or(self.default_level)
    }

    pub fn education_score(&self, studies: &str) -> u8 {
        self.education_levels
            .get(studies)
            .copied()
            .unwrap_or(self.default_level)
    }
}

impl Validate for ScoringConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("version", &self.version)?;

        validate_non_negative("weights.performance", self.weights.performance)?;
        validate_non_negative("weights.talent", self.weights.talent)?;
        validate_non_negative("weights.education", self.weights.education)?;

        validate_positive_number("allocation.hq_capacity", self.allocation.hq_capacity, 1)?;

        validate_non_negative("risk.salary_threshold", self.risk.salary_threshold)?;
        validate_non_empty_string("risk.label", &self.risk.label)?;

        validate_range("default_level", self.default_level, 1, 5)?;
        for (key, level) in &self.talent_levels {
            validate_range(&format!("talent_levels.{}", key), *level, 1, 5)?;
        }
        for (key, level) in &self.education_levels {
            validate_range(&format!("education_levels.{}", key), *level, 1, 5)?;
        }

        Ok(())
    }
}
