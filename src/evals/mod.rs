//! Evaluation report over golden cases
//!
//! Compares each case's expected post-quiz outcome against what the memory
//! store actually recorded. The judge is deterministic: pass maps to 100,
//! fail to 0, with a short commentary.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::memory::{load_user, MemoryStore};

/// Expected pre-assessment outcome of a golden case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreAssessment {
    pub score_percent: u32,
}

/// Expected post-quiz outcome of a golden case
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostQuizExpectation {
    /// Minimum acceptable post-quiz score
    pub expected_score_min: u32,

    /// Minimum acceptable improvement over the pre-assessment score
    pub expected_delta_min: i64,
}

/// One golden evaluation case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenCase {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub pre_assessment: PreAssessment,
    #[serde(default)]
    pub post_quiz: PostQuizExpectation,
}

/// Simple pre/post score comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementCheck {
    pub pre_score: u32,
    pub post_score: u32,
    pub delta: i64,
    pub passed: bool,
}

/// Check that the post score improved on the pre score by at least
/// `min_delta`.
pub fn improvement_check(pre_score: u32, post_score: u32, min_delta: i64) -> ImprovementCheck {
    let delta = post_score as i64 - pre_score as i64;
    ImprovementCheck {
        pre_score,
        post_score,
        delta,
        passed: delta >= min_delta,
    }
}

/// Observed outcome extracted from the store for one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseActual {
    pub score_percent: u32,
    pub pre_score: u32,
}

/// Judgement over one case: pass/fail mapped to a 0/100 score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseJudgement {
    pub score: u32,
    pub comment: String,
    pub passed: bool,
}

/// Judge an observed outcome against a case's expectations.
pub fn judge_case(expected: &PostQuizExpectation, actual: &CaseActual) -> CaseJudgement {
    let delta = actual.score_percent as i64 - actual.pre_score as i64;
    let passed =
        actual.score_percent >= expected.expected_score_min && delta >= expected.expected_delta_min;
    let comment = if passed {
        "Passed".to_string()
    } else {
        format!(
            "Failed: post {} pre {} delta {} (needs >= {})",
            actual.score_percent, actual.pre_score, delta, expected.expected_delta_min
        )
    };
    CaseJudgement {
        score: if passed { 100 } else { 0 },
        comment,
        passed,
    }
}

/// Full result for one evaluated case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseResult {
    pub case_id: String,
    pub user_id: String,
    pub actual: CaseActual,
    pub judgement: CaseJudgement,
}

/// Load golden cases from a JSON file
pub fn load_cases(path: &Path) -> Result<Vec<GoldenCase>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read golden cases from {}", path.display()))?;
    let cases: Vec<GoldenCase> =
        serde_json::from_str(&json).context("Failed to parse golden cases")?;
    Ok(cases)
}

/// Evaluate every case against the store.
///
/// The observed post score is the last graded quiz in the user's memory; a
/// user with no graded quiz evaluates as 0 rather than erroring.
pub fn run_evaluation(store: &dyn MemoryStore, cases: &[GoldenCase]) -> Result<Vec<CaseResult>> {
    let mut results = Vec::with_capacity(cases.len());

    for case in cases {
        let memory = load_user(store, &case.user_id)?;
        let post_score = memory
            .last_quiz
            .as_ref()
            .and_then(|record| record.answers.as_ref())
            .map(|answers| answers.score_percent)
            .unwrap_or(0);

        let actual = CaseActual {
            score_percent: post_score,
            pre_score: case.pre_assessment.score_percent,
        };
        let judgement = judge_case(&case.post_quiz, &actual);

        results.push(CaseResult {
            case_id: case.id.clone(),
            user_id: case.user_id.clone(),
            actual,
            judgement,
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{save_user, InMemoryStore};
    use crate::types::UserMemory;

    #[test]
    fn test_improvement_check() {
        let check = improvement_check(33, 100, 10);
        assert_eq!(check.delta, 67);
        assert!(check.passed);

        let check = improvement_check(80, 60, 0);
        assert_eq!(check.delta, -20);
        assert!(!check.passed);
    }

    #[test]
    fn test_judge_case_pass_and_fail() {
        let expected = PostQuizExpectation {
            expected_score_min: 60,
            expected_delta_min: 10,
        };

        let pass = judge_case(
            &expected,
            &CaseActual {
                score_percent: 100,
                pre_score: 33,
            },
        );
        assert!(pass.passed);
        assert_eq!(pass.score, 100);
        assert_eq!(pass.comment, "Passed");

        let fail = judge_case(
            &expected,
            &CaseActual {
                score_percent: 60,
                pre_score: 55,
            },
        );
        assert!(!fail.passed);
        assert_eq!(fail.score, 0);
        assert!(fail.comment.contains("delta 5"));
    }

    #[test]
    fn test_run_evaluation_without_graded_quiz_scores_zero() {
        let store = InMemoryStore::new();
        save_user(&store, "student_001", &UserMemory::default()).unwrap();

        let cases = vec![GoldenCase {
            id: "case-1".to_string(),
            user_id: "student_001".to_string(),
            pre_assessment: PreAssessment { score_percent: 33 },
            post_quiz: PostQuizExpectation {
                expected_score_min: 60,
                expected_delta_min: 10,
            },
        }];

        let results = run_evaluation(&store, &cases).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].actual.score_percent, 0);
        assert!(!results[0].judgement.passed);
    }

    #[test]
    fn test_load_cases_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden_cases.json");
        std::fs::write(
            &path,
            r#"[{"id": "case-1", "user_id": "student_001",
                 "pre_assessment": {"score_percent": 33},
                 "post_quiz": {"expected_score_min": 60, "expected_delta_min": 10}}]"#,
        )
        .unwrap();

        let cases = load_cases(&path).unwrap();
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].post_quiz.expected_score_min, 60);
    }
}
