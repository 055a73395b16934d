//! Topic mastery tracking
//!
//! Mastery is a 0-100 scalar per topic. It carries no history beyond the
//! single prior value supplied by the caller.

/// Fold a new quiz score into the prior mastery value.
///
/// No prior value means the new score is adopted as-is; otherwise the result
/// is the truncating integer average of the two. A stored prior of 0 counts
/// as a real prior.
pub fn update_mastery(prior: Option<u32>, new_score: u32) -> u32 {
    match prior {
        None => new_score,
        Some(prior) => (prior + new_score) / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_prior_adopts_score() {
        assert_eq!(update_mastery(None, 70), 70);
        assert_eq!(update_mastery(None, 0), 0);
    }

    #[test]
    fn test_averages_with_prior() {
        assert_eq!(update_mastery(Some(30), 70), 50);
        assert_eq!(update_mastery(Some(0), 70), 35);
    }

    #[test]
    fn test_average_truncates() {
        assert_eq!(update_mastery(Some(33), 100), 66);
        assert_eq!(update_mastery(Some(1), 2), 1);
    }

    #[test]
    fn test_idempotent_for_same_inputs() {
        assert_eq!(update_mastery(Some(40), 60), update_mastery(Some(40), 60));
    }
}
