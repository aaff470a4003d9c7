use crate::core::prompt::build_architect_prompt;
use crate::core::scoring::ScoringEngine;
use crate::domain::model::{EmployeeRecord, Report, StrategyResponse};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{ArchitectError, Result};
use std::sync::Arc;

pub const AUTH_FAILURE_TEXT: &str = "Error: Could not authenticate with IBM Cloud.";
pub const GENERATION_FAILURE_TEXT: &str = "Error: AI generation failed. Please check API Key.";

/// Runs score -> prompt -> generate for one request.
pub struct StrategyEngine {
    scoring: ScoringEngine,
    generator: Arc<dyn TextGenerator>,
}

impl StrategyEngine {
    pub fn new(scoring: ScoringEngine, generator: Arc<dyn TextGenerator>) -> Self {
        Self { scoring, generator }
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    /// Scoring only, no model call. An empty batch yields an empty report.
    pub fn score(&self, employees: &[EmployeeRecord]) -> Report {
        self.scoring.evaluate(employees)
    }

    pub async fn run(&self, employees: &[EmployeeRecord]) -> Result<StrategyResponse> {
        ensure_not_empty(employees)?;

        tracing::info!("📥 Scoring {} employee records", employees.len());
        let report = self.scoring.evaluate(employees);
        tracing::info!(
            "📊 {} scored, average merit {}, {} risk flags",
            report.statistics.total_employees,
            report.statistics.average_merit_score,
            report.risk_flags.len()
        );

        let prompt = build_architect_prompt(&report)?;
        tracing::debug!("Prompt length: {} chars", prompt.len());

        let strategic_report = match self.generator.generate(&prompt).await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => {
                tracing::warn!("Model returned an empty report");
                GENERATION_FAILURE_TEXT.to_string()
            }
            Err(e) => {
                tracing::error!(
                    "❌ Report generation failed: {} (Category: {:?})",
                    e,
                    e.category()
                );
                fallback_text(&e)
            }
        };

        Ok(StrategyResponse {
            status: "success".to_string(),
            statistics: report.statistics.clone(),
            strategic_report,
            raw_algorithm_output: report,
            generated_at: chrono::Utc::now(),
        })
    }
}

fn ensure_not_empty(employees: &[EmployeeRecord]) -> Result<()> {
    if employees.is_empty() {
        return Err(ArchitectError::ValidationError {
            message: "No employee data provided".to_string(),
        });
    }
    Ok(())
}

/// Generation failures are relayed to the caller as report text.
fn fallback_text(error: &ArchitectError) -> String {
    match error {
        ArchitectError::AuthenticationError { .. } => AUTH_FAILURE_TEXT.to_string(),
        ArchitectError::ProviderError { body, .. } => format!("Error from AI Provider: {}", body),
        _ => GENERATION_FAILURE_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
        reply: fn() -> Result<String>,
    }

    impl RecordingGenerator {
        fn new(reply: fn() -> Result<String>) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            (self.reply)()
        }
    }

    fn staff() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new("Alice Chen", 4.8, "High", "PhD", 120_000.0, "Partner"),
            EmployeeRecord::new("David Lo", 1.5, "Low", "Associate", 145_000.0, "Senior Associate"),
        ]
    }

    #[tokio::test]
    async fn test_run_relays_generated_text() {
        let generator = RecordingGenerator::new(|| Ok("Strategic Restructuring Report".to_string()));
        let engine = StrategyEngine::new(ScoringEngine::default(), generator.clone());

        let response = engine.run(&staff()).await.unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.strategic_report, "Strategic Restructuring Report");
        assert_eq!(response.statistics.total_employees, 2);
        assert_eq!(response.statistics, response.raw_algorithm_output.statistics);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("David Lo"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_rejected_before_generation() {
        let generator = RecordingGenerator::new(|| Ok("unused".to_string()));
        let engine = StrategyEngine::new(ScoringEngine::default(), generator.clone());

        let err = engine.run(&[]).await.unwrap_err();
        assert!(matches!(err, ArchitectError::ValidationError { .. }));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generation_failures_become_report_text() {
        let cases: [(fn() -> Result<String>, &str); 4] = [
            (
                || {
                    Err(ArchitectError::AuthenticationError {
                        message: "denied".to_string(),
                    })
                },
                AUTH_FAILURE_TEXT,
            ),
            (
                || {
                    Err(ArchitectError::ProviderError {
                        status: 429,
                        body: "rate limited".to_string(),
                    })
                },
                "Error from AI Provider: rate limited",
            ),
            (
                || {
                    Err(ArchitectError::ProcessingError {
                        message: "no results".to_string(),
                    })
                },
                GENERATION_FAILURE_TEXT,
            ),
            (|| Ok(String::new()), GENERATION_FAILURE_TEXT),
        ];

        for (reply, expected) in cases {
            let engine = StrategyEngine::new(ScoringEngine::default(), RecordingGenerator::new(reply));
            let response = engine.run(&staff()).await.unwrap();
            assert_eq!(response.strategic_report, expected);
        }
    }

    #[test]
    fn test_score_without_generation() {
        let generator = RecordingGenerator::new(|| Ok("unused".to_string()));
        let engine = StrategyEngine::new(ScoringEngine::default(), generator.clone());

        let report = engine.score(&staff());
        assert_eq!(report.risk_flags.len(), 1);

        let empty = engine.score(&[]);
        assert_eq!(empty.status, "success");
        assert_eq!(empty.statistics.total_employees, 0);
        assert_eq!(empty.statistics.average_merit_score, 0.0);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }
}
