//! Trapezoidal band scoring.
//!
//! Every ratio in the pattern and linguistic detectors is mapped through the
//! same response shape: the score rises linearly to 1.0 across an optimal
//! band, then either holds (plateau) or decays linearly back to 0.0. There
//! are no hard cutoffs except at the extremes, so small changes in input
//! never produce score cliffs.

/// A trapezoidal response curve over a measured value.
///
/// Between `rise_start` and `optimal_lo` the score climbs linearly from 0.0
/// to 1.0; it stays at 1.0 through `optimal_hi`; beyond that it falls
/// linearly to 0.0 at `decay_end`. A plateau curve sets `decay_end` to
/// infinity so the score never drops once the band is reached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub rise_start: f64,
    pub optimal_lo: f64,
    pub optimal_hi: f64,
    pub decay_end: f64,
}

impl Band {
    /// Curve that rises to 1.0 at `optimal_lo` and never decays.
    #[must_use]
    pub const fn plateau(rise_start: f64, optimal_lo: f64) -> Self {
        Self {
            rise_start,
            optimal_lo,
            optimal_hi: f64::INFINITY,
            decay_end: f64::INFINITY,
        }
    }

    /// Curve with both a rising and a decaying edge.
    #[must_use]
    pub const fn window(rise_start: f64, optimal_lo: f64, optimal_hi: f64, decay_end: f64) -> Self {
        Self {
            rise_start,
            optimal_lo,
            optimal_hi,
            decay_end,
        }
    }

    /// Map a measured value through the curve, clamped to [0.0, 1.0].
    #[must_use]
    pub fn score(&self, value: f64) -> f64 {
        if !value.is_finite() || value <= self.rise_start {
            return 0.0;
        }
        if value < self.optimal_lo {
            return (value - self.rise_start) / (self.optimal_lo - self.rise_start);
        }
        if value <= self.optimal_hi {
            return 1.0;
        }
        if value < self.decay_end {
            return 1.0 - (value - self.optimal_hi) / (self.decay_end - self.optimal_hi);
        }
        0.0
    }
}

/// Clamp a score to [0.0, 1.0].
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rising_edge_is_linear_and_monotone() {
        let band = Band::plateau(0.0, 0.7);
        assert_eq!(band.score(0.0), 0.0);
        assert!((band.score(0.35) - 0.5).abs() < 1e-9);
        assert_eq!(band.score(0.7), 1.0);

        let mut last = 0.0;
        for i in 0..=100 {
            let score = band.score(f64::from(i) / 100.0);
            assert!(score >= last, "rising edge must be non-decreasing");
            last = score;
        }
    }

    #[test]
    fn plateau_never_decays() {
        let band = Band::plateau(0.0, 0.5);
        assert_eq!(band.score(0.5), 1.0);
        assert_eq!(band.score(10.0), 1.0);
        assert_eq!(band.score(1e9), 1.0);
    }

    #[test]
    fn window_decays_past_optimal() {
        // Instruction verb density: optimal 3-10 per 100 words, gone by 15.
        let band = Band::window(0.0, 3.0, 10.0, 15.0);
        assert_eq!(band.score(5.0), 1.0);
        assert!((band.score(12.5) - 0.5).abs() < 1e-9);
        assert_eq!(band.score(15.0), 0.0);
        assert_eq!(band.score(100.0), 0.0);
    }

    #[test]
    fn out_of_range_values_score_zero() {
        let band = Band::window(50.0, 100.0, 500.0, 1000.0);
        assert_eq!(band.score(0.0), 0.0);
        assert_eq!(band.score(50.0), 0.0);
        assert_eq!(band.score(f64::NAN), 0.0);
        assert_eq!(band.score(2000.0), 0.0);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let band = Band::window(0.0, 1.0, 2.0, 3.0);
        for i in 0..400 {
            let score = band.score(f64::from(i) / 100.0);
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
