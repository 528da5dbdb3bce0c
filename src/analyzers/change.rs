use crate::error::{AnalysisError, Result};

/// Percent change from `earliest` to `latest`.
///
/// A zero base is an error rather than an infinite or NaN result.
pub fn percent_change(earliest: f64, latest: f64) -> Result<f64> {
    if earliest == 0.0 {
        return Err(AnalysisError::Division);
    }

    Ok((latest - earliest) / earliest * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(4000.0, 9000.0).unwrap(), 125.0);
        assert_eq!(percent_change(100.0, 75.0).unwrap(), -25.0);
        assert_eq!(percent_change(5.0, 5.0).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_base() {
        assert!(matches!(percent_change(0.0, 100.0), Err(AnalysisError::Division)));
        assert!(matches!(percent_change(-0.0, 1.0), Err(AnalysisError::Division)));
    }
}
