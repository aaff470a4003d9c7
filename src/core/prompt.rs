use crate::domain::model::Report;
use crate::utils::error::Result;

const ARCHITECT_PERSONA: &str = "You are the Chief Organizational Architect for a prestigious legal firm.
Generate a Strategic Restructuring Report based on the input JSON.
Follow the format of the examples below EXACTLY.";

const FEW_SHOT_EXAMPLE: &str = r#"Input:
{
  "status": "success",
  "statistics": { "total_employees": 5, "average_merit_score": 3.2, "hq_count": 3, "remote_count": 2 },
  "top_talent_hq": [ { "name": "Alice Chen", "score": 4.8 }, { "name": "Marcus Thorne", "score": 4.2 }, { "name": "Sarah Jenkins", "score": 3.9 } ],
  "allocation_summary": { "headquarters_roster": [ "Alice Chen", "Marcus Thorne", "Sarah Jenkins" ], "remote_roster": [ "David Lo", "Elena Rigby" ] },
  "risk_flags": [ { "name": "David Lo", "role": "Senior Associate", "salary": 145000.0, "merit_score": 1.8, "discrepancy": "High Salary / Low Merit" } ]
}

Output:
Strategic Restructuring Report

1. Executive Summary
Overview: We have successfully processed 5 employees for the new department. The group average merit score is 3.2.
Allocation: Based on merit rankings, 3 employees have been assigned to Headquarters, while 2 employees will work Remote/Secondary.

2. Leadership & Top Talent
The following high-performers will anchor the HQ team:
Alice Chen (Score: 4.8)
Marcus Thorne (Score: 4.2)
Sarah Jenkins (Score: 3.9)
Insight: These individuals demonstrate the highest alignment of performance, talent, and education.

3. Financial & Performance Risk Audit (High Priority)
We have identified 1 critical inefficiency requiring immediate attention:
David Lo (Senior Associate)
The Discrepancy: Mr. Lo draws a senior-level salary ($145k) but holds a merit score of 1.8, which is significantly below the department average of 3.2.
Strategic Recommendation: Initiate a formal Performance Improvement Plan (PIP) immediately. If metrics do not improve within 60 days, assess for redundancy to recover budget.

4. Final Roster Visualization
Headquarters Team:
Alice Chen
Marcus Thorne
Sarah Jenkins"#;

/// One-shot prompt asking the model to narrate `report` in the example's format.
pub fn build_architect_prompt(report: &Report) -> Result<String> {
    let current_json = serde_json::to_string(report)?;

    Ok(format!(
        "{ARCHITECT_PERSONA}\n\n{FEW_SHOT_EXAMPLE}\n\n---\n\nInput:\n{current_json}\n\nOutput:\n"
    ))
}
