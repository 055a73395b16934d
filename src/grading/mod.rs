//! Answer grading against an expected expression
//!
//! The expected side is either an equation handed to the solver or a literal
//! number. The user side is a trimmed numeric string, optionally prefixed
//! with a case-insensitive `x=`. Neither side ever raises: failures come
//! back as `None` fields with an explanatory string.

use serde::{Deserialize, Serialize};

use crate::solver::solve_linear;

/// Default absolute tolerance for judging an answer correct
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Outcome of grading one answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Expected numeric answer, `None` if the expected expression could not
    /// be resolved to a number
    pub expected: Option<f64>,

    /// Parsed user answer, `None` if unparseable
    pub user: Option<f64>,

    /// True only when both values are present and within tolerance
    pub correct: bool,

    /// Human-readable explanation of the outcome
    pub explanation: String,
}

/// Grade a user answer against an expected expression with the default
/// tolerance.
pub fn grade_default(expected_expr: &str, user_answer: &str) -> GradeResult {
    grade(expected_expr, user_answer, DEFAULT_TOLERANCE)
}

/// Grade a user answer against an expected expression.
///
/// `expected_expr` containing `=` is resolved through the equation solver;
/// anything else is parsed as a literal number.
pub fn grade(expected_expr: &str, user_answer: &str, tolerance: f64) -> GradeResult {
    let expected = resolve_expected(expected_expr);
    let user = parse_user_answer(user_answer);

    let (correct, explanation) = match (expected, user) {
        (None, _) => (
            false,
            "Unable to compute expected answer from the expected expression.".to_string(),
        ),
        (Some(_), None) => (false, "Unable to parse user's numeric answer.".to_string()),
        (Some(e), Some(u)) if (u - e).abs() <= tolerance => {
            (true, format!("Correct — expected {}, got {}.", e, u))
        }
        (Some(e), Some(u)) => (false, format!("Incorrect — expected {}, got {}.", e, u)),
    };

    GradeResult {
        expected,
        user,
        correct,
        explanation,
    }
}

/// Resolve the expected expression to a number: solve it if it looks like an
/// equation, otherwise parse it as a literal.
pub fn resolve_expected(expected_expr: &str) -> Option<f64> {
    if expected_expr.contains('=') {
        solve_linear(expected_expr)
    } else {
        expected_expr.trim().parse::<f64>().ok()
    }
}

/// Parse a raw user answer into a number.
///
/// Strips all whitespace and a leading case-insensitive `x=`.
pub fn parse_user_answer(user_answer: &str) -> Option<f64> {
    let compact: String = user_answer.chars().filter(|c| !c.is_whitespace()).collect();
    let body = match compact.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("x=") => &compact[2..],
        _ => compact.as_str(),
    };
    body.parse::<f64>().ok()
}

/// Percentage score, rounded to the nearest integer.
///
/// Zero questions is defined as a score of 0 rather than a division by zero.
pub fn score_percent(correct_count: usize, total_questions: usize) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    (100.0 * correct_count as f64 / total_questions as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_correct() {
        let result = grade_default("2*x+3=11", "4");
        assert!(result.correct);
        assert_eq!(result.expected, Some(4.0));
        assert_eq!(result.user, Some(4.0));
        assert!(result.explanation.contains("Correct"));
    }

    #[test]
    fn test_grade_strips_x_prefix() {
        let result = grade_default("2*x+3=11", "x=4");
        assert!(result.correct);

        let result = grade_default("2*x+3=11", "X = 4");
        assert!(result.correct);
    }

    #[test]
    fn test_grade_unparseable_user_answer() {
        let result = grade_default("2*x+3=11", "banana");
        assert!(!result.correct);
        assert_eq!(result.expected, Some(4.0));
        assert_eq!(result.user, None);
        assert!(result.explanation.contains("Unable to parse"));
    }

    #[test]
    fn test_grade_incorrect() {
        let result = grade_default("2*x+3=11", "4.5");
        assert!(!result.correct);
        assert_eq!(result.user, Some(4.5));
        assert!(result.explanation.contains("Incorrect"));
    }

    #[test]
    fn test_grade_unresolvable_expected() {
        let result = grade_default("0*x + 1 = 2", "4");
        assert!(!result.correct);
        assert_eq!(result.expected, None);
        assert!(result
            .explanation
            .contains("Unable to compute expected answer"));
    }

    #[test]
    fn test_grade_literal_expected() {
        let result = grade_default("4", "4.0");
        assert!(result.correct);
        assert_eq!(result.expected, Some(4.0));
    }

    #[test]
    fn test_grade_within_tolerance() {
        let result = grade("4", "4.0000000001", 1e-6);
        assert!(result.correct);

        let result = grade("4", "4.1", 1e-6);
        assert!(!result.correct);
    }

    #[test]
    fn test_parse_user_answer_variants() {
        assert_eq!(parse_user_answer("  -3 "), Some(-3.0));
        assert_eq!(parse_user_answer("x=-3"), Some(-3.0));
        assert_eq!(parse_user_answer("x ="), None);
        assert_eq!(parse_user_answer(""), None);
    }

    #[test]
    fn test_score_percent_rounds() {
        assert_eq!(score_percent(1, 3), 33);
        assert_eq!(score_percent(2, 3), 67);
        assert_eq!(score_percent(3, 3), 100);
    }

    #[test]
    fn test_score_percent_zero_questions() {
        assert_eq!(score_percent(0, 0), 0);
    }
}
