use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A scalar field as it arrives on the wire.
///
/// Upstream sources disagree on whether ratings, salaries and talent are
/// numbers or strings, so records are accepted in either form and coerced
/// later. `Other` catches anything else so that one odd record cannot reject
/// the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    /// Numeric view: numbers as-is, strings parsed after trimming.
    /// Non-finite results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    /// Textual view. Integral numbers render without a fractional part.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(Cow::Owned(format!("{}", *n as i64)))
            }
            FieldValue::Number(n) => Some(Cow::Owned(n.to_string())),
            FieldValue::Other(_) => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// One employee row as submitted by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default)]
    pub employee_id: Option<FieldValue>,
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub rating: Option<FieldValue>,
    #[serde(default)]
    pub talent: Option<FieldValue>,
    #[serde(default)]
    pub studies: Option<FieldValue>,
    #[serde(default)]
    pub salary: Option<FieldValue>,
    #[serde(default)]
    pub job: Option<FieldValue>,
}

impl EmployeeRecord {
    pub fn new(name: &str, rating: f64, talent: &str, studies: &str, salary: f64, job: &str) -> Self {
        Self {
            employee_id: None,
            name: Some(name.into()),
            rating: Some(rating.into()),
            talent: Some(talent.into()),
            studies: Some(studies.into()),
            salary: Some(salary.into()),
            job: Some(job.into()),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.employee_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub name: String,
    pub role: String,
    pub salary: f64,
    pub final_score: f64,
    pub raw_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_employees: usize,
    pub average_merit_score: f64,
    pub hq_count: usize,
    pub remote_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub headquarters_roster: Vec<String>,
    pub remote_roster: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub name: String,
    pub role: String,
    pub salary: f64,
    pub merit_score: f64,
    pub discrepancy: String,
}

/// Output of the scoring engine, serialized verbatim into prompts and responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: String,
    pub statistics: Statistics,
    pub top_talent_hq: Vec<TopPerformer>,
    pub allocation_summary: AllocationSummary,
    pub risk_flags: Vec<RiskFlag>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RestructuringRequest {
    pub employees: Vec<EmployeeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResponse {
    pub status: String,
    pub statistics: Statistics,
    pub strategic_report: String,
    pub raw_algorithm_output: Report,
    pub generated_at: DateTime<Utc>,
}
