/// Number of samples in the trend-line window.
pub const ROLLING_WINDOW: usize = 7;

/// Trailing rolling mean over `values`.
///
/// Position `i` averages `values[i + 1 - window..=i]`. Positions with fewer
/// than `window` preceding samples, or whose window holds a missing sample,
/// produce `None`.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let samples = &values[i + 1 - window..=i];
            let sum = samples
                .iter()
                .try_fold(0.0, |acc, v| v.map(|x| acc + x))?;
            Some(sum / window as f64)
        })
        .collect()
}
