//! Traffic-light classification of period-over-period change.

use crate::domain::Diagnosis;

/// Changes below this magnitude (percent) are green.
pub const GREEN_BELOW_PCT: f64 = 10.0;

/// Changes at or above this magnitude (percent) are red.
pub const RED_FROM_PCT: f64 = 20.0;

/// Classify the change from `prior` to `current`.
///
/// Missing values and a zero prior give `Yellow`; no percentage is computed
/// against a zero baseline.
pub fn classify(prior: Option<f64>, current: Option<f64>) -> Diagnosis {
    let (Some(prior), Some(current)) = (prior, current) else {
        return Diagnosis::Yellow;
    };
    if prior == 0.0 {
        return Diagnosis::Yellow;
    }

    let pct = ((current - prior) / prior).abs() * 100.0;
    if pct < GREEN_BELOW_PCT {
        Diagnosis::Green
    } else if pct < RED_FROM_PCT {
        Diagnosis::Yellow
    } else if pct >= RED_FROM_PCT {
        Diagnosis::Red
    } else {
        // NaN inputs
        Diagnosis::Yellow
    }
}

/// Signed change relative to the prior magnitude, in percent.
pub fn relative_change_pct(prior: Option<f64>, current: Option<f64>) -> Option<f64> {
    let (prior, current) = (prior?, current?);
    if prior == 0.0 {
        return None;
    }
    Some((current - prior) / prior.abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_zero_prior_is_yellow() {
        assert_eq!(classify(None, Some(1.0)), Diagnosis::Yellow);
        assert_eq!(classify(Some(1.0), None), Diagnosis::Yellow);
        assert_eq!(classify(None, None), Diagnosis::Yellow);
        assert_eq!(classify(Some(0.0), Some(50.0)), Diagnosis::Yellow);
    }

    #[test]
    fn thresholds() {
        assert_eq!(classify(Some(100.0), Some(105.0)), Diagnosis::Green);
        assert_eq!(classify(Some(100.0), Some(109.9)), Diagnosis::Green);
        assert_eq!(classify(Some(100.0), Some(110.0)), Diagnosis::Yellow);
        assert_eq!(classify(Some(100.0), Some(119.9)), Diagnosis::Yellow);
        assert_eq!(classify(Some(100.0), Some(120.0)), Diagnosis::Red);
        assert_eq!(classify(Some(100.0), Some(50.0)), Diagnosis::Red);
    }

    #[test]
    fn magnitude_is_symmetric_in_sign() {
        assert_eq!(classify(Some(100.0), Some(85.0)), Diagnosis::Yellow);
        assert_eq!(classify(Some(-100.0), Some(-95.0)), Diagnosis::Green);
        assert_eq!(classify(Some(-100.0), Some(-150.0)), Diagnosis::Red);
    }

    #[test]
    fn nan_does_not_escape_the_three_levels() {
        assert_eq!(classify(Some(f64::NAN), Some(1.0)), Diagnosis::Yellow);
    }

    #[test]
    fn relative_change_is_signed() {
        assert_eq!(relative_change_pct(Some(100.0), Some(50.0)), Some(-50.0));
        assert_eq!(relative_change_pct(Some(-100.0), Some(-50.0)), Some(50.0));
        assert_eq!(relative_change_pct(Some(0.0), Some(50.0)), None);
        assert_eq!(relative_change_pct(None, Some(50.0)), None);
    }
}
