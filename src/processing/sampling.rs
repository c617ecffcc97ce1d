/// Upper limit on the number of points in one sample grid.
pub const MAX_SAMPLE_POINTS: usize = 100_000;

/// Closed numeric interval used for axis ranges and sample grids.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_inverted(&self) -> bool {
        self.upper < self.lower
    }
}

/// Multiply every element by `scale`.
pub fn scale_vector(v: &[f64], scale: f64) -> Vec<f64> {
    v.iter().map(|x| x * scale).collect()
}

/// Sample points `lower, lower + step, ...` up to and including `upper`.
///
/// Each point is computed as `lower + i * step` rather than by accumulation,
/// so an evenly divisible range always ends exactly on `upper`. A
/// non-positive step, an inverted range or a non-finite bound yields no points,
/// as does a grid that would exceed [`MAX_SAMPLE_POINTS`].
pub fn vector_from_range(range: AxisRange, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !range.lower.is_finite() || !range.upper.is_finite() {
        return Vec::new();
    }
    if range.is_inverted() {
        return Vec::new();
    }

    // Small slack absorbs rounding in the division for exact multiples.
    let intervals = (range.size() / step + 1e-9).floor();
    let count = if intervals.is_finite() && intervals < MAX_SAMPLE_POINTS as f64 {
        (intervals as usize).checked_add(1)
    } else {
        None
    };
    let Some(count) = count else {
        tracing::warn!(
            "Sample grid {}..{} with step {} exceeds {} points, skipped",
            range.lower,
            range.upper,
            step,
            MAX_SAMPLE_POINTS
        );
        return Vec::new();
    };
    (0..count)
        .map(|i| range.lower + i as f64 * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_grid_includes_both_ends() {
        let grid = vector_from_range(AxisRange::new(-100.0, 140.0), 5.0);
        assert_eq!(grid.len(), 49);
        assert_eq!(grid[0], -100.0);
        assert_eq!(*grid.last().unwrap(), 140.0);
    }

    #[test]
    fn fractional_step_reaches_endpoint() {
        let grid = vector_from_range(AxisRange::new(0.0, 1.0), 0.1);
        assert_eq!(grid.len(), 11);
        assert!((grid[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uneven_step_stops_below_upper() {
        let grid = vector_from_range(AxisRange::new(0.0, 10.0), 3.0);
        assert_eq!(grid, vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn degenerate_inputs_give_empty_grid() {
        assert!(vector_from_range(AxisRange::new(0.0, 10.0), 0.0).is_empty());
        assert!(vector_from_range(AxisRange::new(0.0, 10.0), -1.0).is_empty());
        assert!(vector_from_range(AxisRange::new(10.0, 0.0), 1.0).is_empty());
        assert!(vector_from_range(AxisRange::new(0.0, f64::INFINITY), 1.0).is_empty());
        assert!(vector_from_range(AxisRange::new(0.0, 10.0), f64::NAN).is_empty());
    }

    #[test]
    fn oversized_grid_is_skipped() {
        assert!(vector_from_range(AxisRange::new(0.0, 1e300), 5.0).is_empty());
        assert!(vector_from_range(AxisRange::new(-100.0, 140.0), 1e-9).is_empty());
        assert!(vector_from_range(AxisRange::new(-f64::MAX, f64::MAX), 1.0).is_empty());
    }

    #[test]
    fn grid_at_the_point_limit_is_built() {
        let upper = (MAX_SAMPLE_POINTS - 1) as f64;
        let grid = vector_from_range(AxisRange::new(0.0, upper), 1.0);
        assert_eq!(grid.len(), MAX_SAMPLE_POINTS);
        assert!(vector_from_range(AxisRange::new(0.0, upper + 1.0), 1.0).is_empty());
    }

    #[test]
    fn inverted_range_detection() {
        assert!(AxisRange::new(10.0, -10.0).is_inverted());
        assert!(!AxisRange::new(1.0, 2.0).is_inverted());
        assert!(!AxisRange::new(3.0, 3.0).is_inverted());
    }

    #[test]
    fn single_point_range() {
        assert_eq!(vector_from_range(AxisRange::new(3.0, 3.0), 1.0), vec![3.0]);
    }

    #[test]
    fn scale_by_one_million() {
        assert_eq!(scale_vector(&[1.0, 2.0, 3.0], 1e6), vec![1e6, 2e6, 3e6]);
        assert!(scale_vector(&[], 2.0).is_empty());
    }
}
