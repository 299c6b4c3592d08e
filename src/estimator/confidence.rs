//! Confidence scoring
//!
//! Three-bucket step function over the number of risk flags.

pub const CONFIDENCE_NO_RISK: f64 = 0.85;
pub const CONFIDENCE_FEW_RISKS: f64 = 0.75;
pub const CONFIDENCE_MANY_RISKS: f64 = 0.60;

/// 0 risks -> 0.85, 1-2 -> 0.75, 3+ -> 0.60 (rounded to 2 dp)
pub fn confidence_score(risk_count: usize) -> f64 {
    let score = match risk_count {
        0 => CONFIDENCE_NO_RISK,
        1 | 2 => CONFIDENCE_FEW_RISKS,
        _ => CONFIDENCE_MANY_RISKS,
    };
    super::round2(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets() {
        assert_eq!(confidence_score(0), 0.85);
        assert_eq!(confidence_score(1), 0.75);
        assert_eq!(confidence_score(2), 0.75);
        assert_eq!(confidence_score(3), 0.60);
        assert_eq!(confidence_score(5), 0.60);
    }
}
