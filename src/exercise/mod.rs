//! Exercise generation: worked examples and quiz variants
//!
//! Examples have the fixed shape `a*x + b = c` with an integer solution
//! guaranteed by deriving `c` from a sampled target solution. The random
//! source is owned by the generator and can be seeded so tests are
//! deterministic.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::solver::solve_linear;
use crate::types::{QuizQuestion, WorkedExample};

/// Sampling pools for generated equations
const COEFFICIENTS: [i64; 5] = [1, 2, 3, 4, 5];
const CONSTANTS: [i64; 7] = [-6, -4, -2, 0, 2, 3, 4];
const TARGET_SOLUTIONS: [i64; 8] = [-3, -2, -1, 1, 2, 3, 4, 5];

/// Maximum number of quiz questions derived from one example
const MAX_VARIANTS: usize = 3;

/// Random exercise generator with an explicit, optionally seeded source
pub struct ExerciseGenerator {
    rng: StdRng,
}

impl ExerciseGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for tests and reproducible demos
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build a worked example, sampling any coefficient not supplied.
    ///
    /// When `c` is omitted it is derived as `c = a*x_sol + b` from a sampled
    /// integer target solution, so random examples always solve exactly.
    pub fn worked_example(
        &mut self,
        a: Option<i64>,
        b: Option<i64>,
        c: Option<i64>,
    ) -> WorkedExample {
        let a = a.unwrap_or_else(|| *COEFFICIENTS.choose(&mut self.rng).unwrap_or(&1));
        let b = b.unwrap_or_else(|| *CONSTANTS.choose(&mut self.rng).unwrap_or(&0));
        let c = c.unwrap_or_else(|| {
            let x_sol = *TARGET_SOLUTIONS.choose(&mut self.rng).unwrap_or(&1);
            a * x_sol + b
        });

        build_example(a, b, c)
    }
}

impl Default for ExerciseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `a*x + b = c` as a display string
pub fn format_equation(a: i64, b: i64, c: i64) -> String {
    if b < 0 {
        format!("{}*x - {} = {}", a, -b, c)
    } else if b == 0 {
        format!("{}*x = {}", a, c)
    } else {
        format!("{}*x + {} = {}", a, b, c)
    }
}

/// Build the example with its derivation steps
fn build_example(a: i64, b: i64, c: i64) -> WorkedExample {
    let equation_str = format_equation(a, b, c);
    let solution = solve_linear(&equation_str);

    let mut steps = Vec::new();
    steps.push(format!("Start: {}", equation_str));
    if b != 0 {
        steps.push(format!("Subtract {} from both sides: {}*x = {}", b, a, c - b));
    } else {
        steps.push(format!("No subtraction needed: {}*x = {}", a, c));
    }
    if a != 1 {
        steps.push(format!(
            "Divide both sides by {}: x = {}",
            a,
            (c - b) as f64 / a as f64
        ));
    } else {
        steps.push(format!("x = {}", c - b));
    }

    WorkedExample {
        equation_str,
        solution,
        steps,
    }
}

/// Derive up to 3 quiz questions from a worked example.
///
/// Best-effort heuristic: the first question repeats the original equation
/// verbatim; the second bumps the right-hand constant by 2; the third bumps
/// the leading coefficient by 1 when an `N*x` pattern is found in the left
/// side, and otherwise decrements the right-hand constant by 1. When the
/// source equation cannot be split and parsed, only the original question is
/// returned.
pub fn derive_variants(example: &WorkedExample) -> Vec<QuizQuestion> {
    let equation = example.equation_str.as_str();
    let mut questions = vec![QuizQuestion::solve_for_x(equation)];

    if let Some((left, right)) = split_equation(equation) {
        questions.push(QuizQuestion::solve_for_x(&format!(
            "{} = {}",
            left,
            right + 2
        )));

        match bump_coefficient(&left) {
            Some(new_left) => {
                questions.push(QuizQuestion::solve_for_x(&format!(
                    "{} = {}",
                    new_left, right
                )));
            }
            None => {
                questions.push(QuizQuestion::solve_for_x(&format!(
                    "{} = {}",
                    left,
                    right - 1
                )));
            }
        }
    }

    questions.truncate(MAX_VARIANTS);
    questions
}

/// Split an equation into its trimmed left side and integer right side
fn split_equation(equation: &str) -> Option<(String, i64)> {
    let (left, right) = equation.split_once('=')?;
    let right_val = right.trim().parse::<f64>().ok()?;
    if right_val.fract() != 0.0 {
        return None;
    }
    Some((left.trim().to_string(), right_val as i64))
}

/// Find the first `N*x` pattern in the left side and rewrite it with the
/// coefficient increased by 1. Returns `None` when no pattern is found.
fn bump_coefficient(left: &str) -> Option<String> {
    let compact: String = left.chars().filter(|ch| !ch.is_whitespace()).collect();
    let coef = find_coefficient(&compact)?;
    let old = format!("{}*x", coef);
    let new = format!("{}*x", coef + 1);
    // Replace in the original (spaced) left side; the generator always emits
    // the coefficient and `*x` contiguously.
    if left.contains(&old) {
        Some(left.replacen(&old, &new, 1))
    } else {
        None
    }
}

/// Scan a despaced expression for the first signed integer directly followed
/// by `*x` and return that coefficient.
fn find_coefficient(compact: &str) -> Option<i64> {
    let bytes = compact.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() || (bytes[i] == b'-' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())) {
            let start = i;
            if bytes[i] == b'-' {
                i += 1;
            }
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if compact[i..].starts_with("*x") {
                return compact[start..i].parse::<i64>().ok();
            }
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut gen_a = ExerciseGenerator::seeded(42);
        let mut gen_b = ExerciseGenerator::seeded(42);
        for _ in 0..10 {
            assert_eq!(
                gen_a.worked_example(None, None, None),
                gen_b.worked_example(None, None, None)
            );
        }
    }

    #[test]
    fn test_random_examples_have_integer_solutions() {
        let mut generator = ExerciseGenerator::seeded(7);
        for _ in 0..50 {
            let example = generator.worked_example(None, None, None);
            let solution = example.solution.expect("generated example must solve");
            assert_eq!(solution.fract(), 0.0, "{}", example.equation_str);
            assert_eq!(solve_linear(&example.equation_str), Some(solution));
        }
    }

    #[test]
    fn test_explicit_coefficients() {
        let mut generator = ExerciseGenerator::seeded(1);
        let example = generator.worked_example(Some(2), Some(3), Some(11));
        assert_eq!(example.equation_str, "2*x + 3 = 11");
        assert_eq!(example.solution, Some(4.0));
        assert_eq!(example.steps[0], "Start: 2*x + 3 = 11");
        assert!(example.steps[1].contains("Subtract 3"));
        assert!(example.steps[2].contains("Divide both sides by 2"));
    }

    #[test]
    fn test_steps_for_zero_constant_and_unit_coefficient() {
        let mut generator = ExerciseGenerator::seeded(1);

        let example = generator.worked_example(Some(3), Some(0), Some(9));
        assert!(example.steps[1].contains("No subtraction needed"));

        let example = generator.worked_example(Some(1), Some(2), Some(5));
        assert_eq!(example.steps[2], "x = 3");
    }

    #[test]
    fn test_format_equation_negative_constant() {
        assert_eq!(format_equation(2, -4, 2), "2*x - 4 = 2");
        assert_eq!(solve_linear(&format_equation(2, -4, 2)), Some(3.0));
    }

    fn example_from(equation: &str) -> WorkedExample {
        WorkedExample {
            equation_str: equation.to_string(),
            solution: solve_linear(equation),
            steps: Vec::new(),
        }
    }

    #[test]
    fn test_derive_variants_full_set() {
        let variants = derive_variants(&example_from("2*x + 3 = 11"));
        assert_eq!(variants.len(), 3);

        // First variant repeats the original verbatim
        assert_eq!(variants[0].expected_expr, "2*x + 3 = 11");

        // Second bumps the right-hand side by 2
        assert_eq!(variants[1].expected_expr, "2*x + 3 = 13");
        assert_eq!(solve_linear(&variants[1].expected_expr), Some(5.0));

        // Third bumps the coefficient
        assert_eq!(variants[2].expected_expr, "3*x + 3 = 11");

        // Every variant is independently solvable
        for variant in &variants {
            assert!(solve_linear(&variant.expected_expr).is_some());
        }
    }

    #[test]
    fn test_derive_variants_without_coefficient_pattern() {
        // "x + 3 = 11" has no `N*x` pattern; third variant decrements the RHS
        let variants = derive_variants(&example_from("x + 3 = 11"));
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[2].expected_expr, "x + 3 = 10");
    }

    #[test]
    fn test_derive_variants_degrades_to_original() {
        let variants = derive_variants(&example_from("not an equation"));
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].expected_expr, "not an equation");
    }

    #[test]
    fn test_variant_prompts() {
        let variants = derive_variants(&example_from("2*x + 3 = 11"));
        assert_eq!(variants[0].prompt, "Solve for x: 2*x + 3 = 11");
    }
}
