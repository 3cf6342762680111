//! Small numeric helpers shared by charts and summaries.

use std::cmp::Ordering;

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (ddof = 1). `None` for fewer than two values.
pub(crate) fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Returns a sorted copy of `values`.
pub(crate) fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// q-th quantile (0.0..=1.0) of an already sorted slice, using linear interpolation.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = pos.floor() as usize;
            let upper = pos.ceil() as usize;
            if lower == upper {
                Some(sorted[lower])
            } else {
                let frac = pos - lower as f64;
                Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
            }
        }
    }
}

/// True when `xs` has at least two values, all finite, and not all equal.
pub(crate) fn varies(xs: &[f64]) -> bool {
    xs.len() >= 2 && xs.iter().all(|x| x.is_finite()) && xs.iter().any(|&x| x != xs[0])
}

/// Deviations from the mean, divided by the largest absolute deviation.
///
/// Keeps the sums of squares in range for very small and very large magnitudes.
fn scaled_deviations(xs: &[f64]) -> Option<Vec<f64>> {
    let m = mean(xs)?;
    let dev: Vec<f64> = xs.iter().map(|x| x - m).collect();
    let scale = dev.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    Some(dev.into_iter().map(|d| d / scale).collect())
}

/// Pearson correlation of two equally long series.
///
/// `None` when it is undefined: fewer than two pairs, a constant series, or non-finite input.
pub(crate) fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    if !varies(xs) || !varies(ys) {
        return None;
    }
    let dx = scaled_deviations(xs)?;
    let dy = scaled_deviations(ys)?;

    let mut cov = 0.0_f64;
    let mut var_x = 0.0_f64;
    let mut var_y = 0.0_f64;
    for (x, y) in dx.iter().zip(&dy) {
        cov += x * y;
        var_x += x * x;
        var_y += y * y;
    }

    let denom = var_x.sqrt() * var_y.sqrt();
    if denom == 0.0 {
        return None;
    }
    let r = (cov / denom).clamp(-1.0, 1.0);
    r.is_finite().then_some(r)
}
