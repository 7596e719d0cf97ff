//! Numeric kernels shared by the summarizer and the plots.
//!
//! All functions work on plain `f64` slices of present values; callers drop
//! missing entries first (see [`crate::utils::present_values`]).

use std::f64::consts::PI;

/// Hard cap on the number of histogram bins.
const MAX_BINS: usize = 1000;

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Copy of the values in ascending order.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of already sorted values with linear interpolation between the
/// two closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

// =============================================================================
// Kernel density estimation
// =============================================================================

/// Gaussian kernel bandwidth by Scott's rule: `std * n^(-1/5)`.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = sample_std(values)?;
    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// `count` evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Gaussian kernel density of `values` evaluated at each grid point.
pub fn gaussian_kde(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<f64> {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    grid.iter()
        .map(|x| {
            let sum: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum();
            sum * norm
        })
        .collect()
}

/// A density curve ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct KdeCurve {
    pub xs: Vec<f64>,
    pub densities: Vec<f64>,
    pub bandwidth: f64,
}

impl KdeCurve {
    /// Estimate the density of `values` on `gridsize` points spanning the
    /// data range extended by `cut` bandwidths on each side.
    ///
    /// `None` when the data has fewer than two values or no spread.
    pub fn estimate(values: &[f64], cut: f64, gridsize: usize) -> Option<Self> {
        let bandwidth = scott_bandwidth(values)?;
        let (min, max) = min_max(values)?;
        let xs = linspace(min - cut * bandwidth, max + cut * bandwidth, gridsize);
        let densities = gaussian_kde(values, bandwidth, &xs);
        Some(Self {
            xs,
            densities,
            bandwidth,
        })
    }

    /// Multiply every density by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for d in &mut self.densities {
            *d *= factor;
        }
        self
    }

    pub fn max_density(&self) -> f64 {
        self.densities.iter().copied().fold(0.0, f64::max)
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.densities.iter().copied())
    }
}

/// Smallest and largest value.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// =============================================================================
// Histogram binning
// =============================================================================

/// Bin edges chosen like numpy's `bins="auto"`: the smaller of the
/// Freedman-Diaconis and Sturges widths, Sturges alone when the IQR is zero.
pub fn auto_bin_edges(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = min_max(values) else {
        return Vec::new();
    };

    if max == min {
        return vec![min - 0.5, max + 0.5];
    }

    let n = values.len() as f64;
    let range = max - min;
    let sturges = range / (n.log2() + 1.0);

    let sorted = sorted(values);
    let iqr = match (quantile_sorted(&sorted, 0.75), quantile_sorted(&sorted, 0.25)) {
        (Some(q3), Some(q1)) => q3 - q1,
        _ => 0.0,
    };
    let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);

    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    let bins = ((range / width).ceil() as usize).clamp(1, MAX_BINS);

    linspace(min, max, bins + 1)
}

/// Count values per bin; the last bin includes its right edge.
pub fn histogram_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    if edges.len() < 2 {
        return Vec::new();
    }
    let bins = edges.len() - 1;
    let first = edges[0];
    let last = edges[bins];
    let mut counts = vec![0usize; bins];

    for &v in values {
        if v < first || v > last {
            continue;
        }
        // edges are evenly spaced, so the bin index is a direct division
        let idx = (((v - first) / (last - first)) * bins as f64).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }
    counts
}

// =============================================================================
// Boxplot statistics
// =============================================================================

/// Five-number summary plus fliers, drawn the matplotlib way.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Most extreme value at or above `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Most extreme value at or below `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    /// Values beyond the whiskers.
    pub fliers: Vec<f64>,
}

impl BoxplotStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|v| *v >= low_fence)
            .unwrap_or(q1)
            .min(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= high_fence)
            .unwrap_or(q3)
            .max(q3);

        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== mean / std tests ====================

    #[test]
    fn test_sample_std_basic() {
        // Mean = 3, Variance = 10 / 4 = 2.5
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!(approx(std, 2.5f64.sqrt()));
    }

    #[test]
    fn test_sample_std_single_value() {
        assert_eq!(sample_std(&[5.0]), None);
        assert_eq!(mean(&[]), None);
    }

    // ==================== quantile tests ====================

    #[test]
    fn test_quantile_linear_interpolation() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // pos = 0.25 * 3 = 0.75
        assert!(approx(quantile_sorted(&sorted, 0.25).unwrap(), 1.75));
        assert!(approx(quantile_sorted(&sorted, 0.75).unwrap(), 3.25));
        assert_eq!(quantile_sorted(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
    }

    // ==================== kde tests ====================

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [1.0, 2.0, 2.5, 3.0, 7.0];
        let curve = KdeCurve::estimate(&values, 3.0, 400).unwrap();
        let step = curve.xs[1] - curve.xs[0];
        let area: f64 = curve.densities.iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 0.01, "area was {}", area);
    }

    #[test]
    fn test_kde_cut_zero_stays_in_range() {
        let values = [10.0, 12.0, 15.0, 20.0];
        let curve = KdeCurve::estimate(&values, 0.0, 50).unwrap();
        assert_eq!(curve.xs.first().copied(), Some(10.0));
        assert!(approx(*curve.xs.last().unwrap(), 20.0));
    }

    #[test]
    fn test_kde_needs_spread() {
        assert!(KdeCurve::estimate(&[4.0, 4.0, 4.0], 3.0, 10).is_none());
        assert!(KdeCurve::estimate(&[4.0], 3.0, 10).is_none());
    }

    #[test]
    fn test_kde_scaled() {
        let curve = KdeCurve::estimate(&[1.0, 2.0, 3.0], 0.0, 5).unwrap();
        let max = curve.max_density();
        let scaled = curve.scaled(10.0);
        assert!(approx(scaled.max_density(), max * 10.0));
    }

    // ==================== histogram tests ====================

    #[test]
    fn test_auto_bins_constant_values() {
        let edges = auto_bin_edges(&[3.0, 3.0, 3.0]);
        assert_eq!(edges, vec![2.5, 3.5]);
        assert_eq!(histogram_counts(&[3.0, 3.0, 3.0], &edges), vec![3]);
    }

    #[test]
    fn test_auto_bins_sturges_when_iqr_zero() {
        // IQR is zero, so Sturges: width = 9 / (log2(8) + 1) = 2.25 -> 4 bins
        let values = [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 10.0];
        let edges = auto_bin_edges(&values);
        assert_eq!(edges.len(), 5);
        assert_eq!(edges[0], 1.0);
        assert!(approx(edges[4], 10.0));
    }

    #[test]
    fn test_histogram_counts_total() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let edges = auto_bin_edges(&values);
        let counts = histogram_counts(&values, &edges);
        assert_eq!(counts.iter().sum::<usize>(), 100);
        assert_eq!(counts.len(), edges.len() - 1);
    }

    #[test]
    fn test_histogram_last_edge_inclusive() {
        let counts = histogram_counts(&[0.0, 0.5, 1.0], &[0.0, 0.5, 1.0]);
        assert_eq!(counts, vec![1, 2]);
    }

    // ==================== boxplot tests ====================

    #[test]
    fn test_boxplot_stats_with_flier() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let stats = BoxplotStats::from_values(&values).unwrap();
        // q1 = 2.25, q3 = 4.75, iqr = 2.5, high fence = 8.5
        assert!(approx(stats.q1, 2.25));
        assert!(approx(stats.median, 3.5));
        assert!(approx(stats.q3, 4.75));
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.fliers, vec![100.0]);
    }

    #[test]
    fn test_boxplot_stats_empty() {
        assert!(BoxplotStats::from_values(&[]).is_none());
    }
}
