//! Linear equation parser and solver
//!
//! Handles one-variable equations of the shape `a*x + b = c` as they appear
//! throughout the tutoring pipeline:
//! - tolerates missing spaces and uppercase `X`
//! - accepts the shorthand `5x` (digit directly before `x` means multiply)
//! - accepts parenthesised signed constants like `2*x + (-4) = 2`
//!
//! Parse failures and degenerate equations (zero `x` coefficient) both come
//! back as `None`; callers treat the two cases identically.

/// Semantic form of `a*x + b = c` after moving every `x` term to the left
/// and keeping the right-hand constant on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearEquation {
    /// Coefficient of `x`
    pub a: f64,
    /// Left-hand constant
    pub b: f64,
    /// Right-hand constant
    pub c: f64,
}

impl LinearEquation {
    /// Solve for `x` as `(c - b) / a`
    ///
    /// Returns `None` when `a == 0` (no unique solution).
    pub fn solve(&self) -> Option<f64> {
        if self.a == 0.0 {
            return None;
        }
        Some((self.c - self.b) / self.a)
    }
}

/// Parse an equation string into its semantic triple
///
/// Requires exactly one `=`; each side must be a linear expression in `x`.
pub fn parse_linear(text: &str) -> Option<LinearEquation> {
    let normalized = normalize(text);

    if normalized.chars().filter(|&ch| ch == '=').count() != 1 {
        return None;
    }
    let (left, right) = normalized.split_once('=')?;

    let (left_coef, left_const) = parse_side(left)?;
    let (right_coef, right_const) = parse_side(right)?;

    // Move any right-hand x terms across: (la - ra)*x + lc = rc
    Some(LinearEquation {
        a: left_coef - right_coef,
        b: left_const,
        c: right_const,
    })
}

/// Solve a textual linear equation for `x`
///
/// Returns `None` for anything unparseable or degenerate.
pub fn solve_linear(text: &str) -> Option<f64> {
    parse_linear(text).and_then(|eq| eq.solve())
}

/// Strip whitespace and parentheses, lowercase `X`, and make implicit
/// multiplication explicit (`5x` -> `5*x`).
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_digit = false;
    for ch in text.chars() {
        let ch = if ch == 'X' { 'x' } else { ch };
        if ch.is_whitespace() || ch == '(' || ch == ')' {
            continue;
        }
        if ch == 'x' && prev_digit {
            out.push('*');
        }
        out.push(ch);
        prev_digit = ch.is_ascii_digit();
    }
    out
}

/// Parse one side of the equation into `(x coefficient, constant)`.
fn parse_side(side: &str) -> Option<(f64, f64)> {
    if side.is_empty() {
        return None;
    }

    let mut x_coef = 0.0;
    let mut constant = 0.0;
    let mut term = String::new();
    let mut sign = 1.0;

    for ch in side.chars() {
        match ch {
            '+' | '-' if term.is_empty() => {
                // Leading or stacked sign, e.g. the "+-4" left behind
                // by a stripped "(-4)"
                if ch == '-' {
                    sign = -sign;
                }
            }
            '+' | '-' => {
                apply_term(&term, sign, &mut x_coef, &mut constant)?;
                term.clear();
                sign = if ch == '-' { -1.0 } else { 1.0 };
            }
            _ => term.push(ch),
        }
    }

    if term.is_empty() {
        // Trailing operator such as "2*x +"
        return None;
    }
    apply_term(&term, sign, &mut x_coef, &mut constant)?;

    Some((x_coef, constant))
}

/// Fold a single signed term into the running coefficient/constant pair.
fn apply_term(term: &str, sign: f64, x_coef: &mut f64, constant: &mut f64) -> Option<()> {
    if let Some(coef_text) = term.strip_suffix("*x") {
        let coef = if coef_text.is_empty() {
            1.0
        } else {
            coef_text.parse::<f64>().ok()?
        };
        *x_coef += sign * coef;
    } else if let Some(rest) = term.strip_suffix('x') {
        // Bare "x"; normalize() already rewrote digit-adjacent forms
        if !rest.is_empty() {
            return None;
        }
        *x_coef += sign;
    } else if term.contains('x') {
        return None;
    } else {
        *constant += sign * term.parse::<f64>().ok()?;
    }
    Some(())
}
