//! Merit scoring, HQ allocation and salary risk detection.
//!
//! The engine is a pure function of its input batch and [`ScoringConfig`].
//! Malformed records are skipped, never reported as errors.

use crate::config::ScoringConfig;
use crate::domain::model::{
    AllocationSummary, EmployeeRecord, Report, RiskFlag, ScoredRecord, Statistics, TopPerformer,
};
use std::borrow::Cow;

/// Round to two decimal places from the exact binary value, ties to even.
///
/// Scaling by 100 first would push values just below a half (2.775 is
/// stored as 2.77499...) onto the half and round them up.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse::<f64>().unwrap_or(value)
}

/// The ranked list split at HQ capacity.
#[derive(Debug, Clone, Copy)]
pub struct AllocationResult<'a> {
    pub hq_team: &'a [ScoredRecord],
    pub remote_team: &'a [ScoredRecord],
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one record, or `None` when it cannot be scored.
    pub fn score_record(&self, record: &EmployeeRecord) -> Option<ScoredRecord> {
        let name = record
            .name
            .as_ref()
            .and_then(|v| v.as_text())
            .filter(|n| !n.trim().is_empty())?;

        let employee_id = match &record.employee_id {
            Some(id) => {
                let id = id.as_text().filter(|id| !id.trim().is_empty())?;
                Some(id.into_owned())
            }
            None => None,
        };

        let rating = record.rating.as_ref()?.as_number()?;
        let salary = record.salary.as_ref()?.as_number()?;

        let talent_score = record
            .talent
            .as_ref()
            .and_then(|v| v.as_text())
            .map(|t| self.config.talent_score(&t))
            .unwrap_or(self.config.default_level);
        let education_score = record
            .studies
            .as_ref()
            .and_then(|v| v.as_text())
            .map(|s| self.config.education_score(&s))
            .unwrap_or(self.config.default_level);

        let weights = &self.config.weights;
        let final_score = rating * weights.performance
            + f64::from(talent_score) * weights.talent
            + f64::from(education_score) * weights.education;

        let role = record
            .job
            .as_ref()
            .and_then(|v| v.as_text())
            .unwrap_or(Cow::Borrowed(""));

        Some(ScoredRecord {
            employee_id,
            name: name.into_owned(),
            role: role.into_owned(),
            salary,
            final_score: round2(final_score),
            raw_rating: rating,
        })
    }

    /// Score every valid record and rank by merit, highest first.
    /// Equal scores keep their input order.
    pub fn rank(&self, employees: &[EmployeeRecord]) -> Vec<ScoredRecord> {
        let mut processed: Vec<ScoredRecord> = employees
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let scored = self.score_record(record);
                if scored.is_none() {
                    tracing::debug!("Skipping employee #{} due to malformed fields", index);
                }
                scored
            })
            .collect();

        // sort_by is stable
        processed.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
        processed
    }

    pub fn allocate<'a>(&self, ranked: &'a [ScoredRecord]) -> AllocationResult<'a> {
        let cut = ranked.len().min(self.config.allocation.hq_capacity);
        let (hq_team, remote_team) = ranked.split_at(cut);
        AllocationResult {
            hq_team,
            remote_team,
        }
    }

    /// Mean merit score, 0.0 for an empty batch.
    pub fn average_score(ranked: &[ScoredRecord]) -> f64 {
        if ranked.is_empty() {
            return 0.0;
        }
        ranked.iter().map(|p| p.final_score).sum::<f64>() / ranked.len() as f64
    }

    /// Below-average merit paired with a salary strictly above the threshold.
    pub fn detect_risks(&self, ranked: &[ScoredRecord], average: f64) -> Vec<RiskFlag> {
        let risk = &self.config.risk;
        ranked
            .iter()
            .filter(|p| p.final_score < average && p.salary > risk.salary_threshold)
            .map(|p| RiskFlag {
                name: p.name.clone(),
                role: p.role.clone(),
                salary: p.salary,
                merit_score: p.final_score,
                discrepancy: risk.label.clone(),
            })
            .collect()
    }

    pub fn evaluate(&self, employees: &[EmployeeRecord]) -> Report {
        let ranked = self.rank(employees);
        let allocation = self.allocate(&ranked);
        let average = Self::average_score(&ranked);
        let risk_flags = self.detect_risks(&ranked, average);

        tracing::debug!(
            "Scored {}/{} employees: {} HQ, {} remote, {} risk flags",
            ranked.len(),
            employees.len(),
            allocation.hq_team.len(),
            allocation.remote_team.len(),
            risk_flags.len()
        );

        let names = |team: &[ScoredRecord]| -> Vec<String> {
            team.iter().map(|p| p.name.clone()).collect()
        };

        Report {
            status: "success".to_string(),
            statistics: Statistics {
                total_employees: ranked.len(),
                average_merit_score: round2(average),
                hq_count: allocation.hq_team.len(),
                remote_count: allocation.remote_team.len(),
            },
            top_talent_hq: allocation
                .hq_team
                .iter()
                .take(self.config.allocation.top_talent_count)
                .map(|p| TopPerformer {
                    name: p.name.clone(),
                    score: p.final_score,
                })
                .collect(),
            allocation_summary: AllocationSummary {
                headquarters_roster: names(allocation.hq_team),
                remote_roster: names(allocation.remote_team),
            },
            risk_flags,
        }
    }
}
