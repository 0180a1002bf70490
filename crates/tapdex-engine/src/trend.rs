//! Trend classification.

use tapdex_core::TrendStatus;

use crate::EPS;

/// Relative delta below which [`classify_with_tolerance`] reports
/// stable.
const STABLE_BAND: f64 = 0.003;

/// Classify by exact comparison. Equality means stable — no epsilon.
pub fn classify(prev: f64, next: f64) -> TrendStatus {
    if next > prev {
        TrendStatus::Rising
    } else if next < prev {
        TrendStatus::Falling
    } else {
        TrendStatus::Stable
    }
}

/// Classify with a ±0.3% relative tolerance band, for callers that
/// need noise-tolerant tick-over-tick trends. Not used by the primary
/// repricing pass, which classifies against the listing price.
pub fn classify_with_tolerance(prev: f64, next: f64) -> TrendStatus {
    let delta = (next - prev) / prev.max(EPS);
    if delta > STABLE_BAND {
        TrendStatus::Rising
    } else if delta < -STABLE_BAND {
        TrendStatus::Falling
    } else {
        TrendStatus::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_comparison() {
        assert_eq!(classify(10.0, 10.5), TrendStatus::Rising);
        assert_eq!(classify(10.0, 9.5), TrendStatus::Falling);
        assert_eq!(classify(10.0, 10.0), TrendStatus::Stable);
    }

    #[test]
    fn exact_ties_require_equality_not_proximity() {
        assert_eq!(classify(10.0, 10.0001), TrendStatus::Rising);
        assert_eq!(classify(10.0, 9.9999), TrendStatus::Falling);
    }

    #[test]
    fn tolerant_band_absorbs_small_deltas() {
        assert_eq!(classify_with_tolerance(100.0, 100.2), TrendStatus::Stable);
        assert_eq!(classify_with_tolerance(100.0, 99.8), TrendStatus::Stable);
    }

    #[test]
    fn tolerant_band_reports_real_moves() {
        assert_eq!(classify_with_tolerance(100.0, 100.5), TrendStatus::Rising);
        assert_eq!(classify_with_tolerance(100.0, 99.5), TrendStatus::Falling);
    }
}
