use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f64, end: f64, factor: f64) -> f64 {
    start + (end - start) * factor
}

/// Numerical derivative of `values` sampled at strictly increasing `times`.
///
/// Second order central differences on the interior (valid for non-uniform
/// spacing) and first order one-sided differences at both ends. Sequences
/// shorter than two samples have a zero derivative.
pub fn gradient(values: &[f64], times: &[f64]) -> Vec<f64> {
    let n = values.len().min(times.len());
    if n < 2 {
        return vec![0.0; n];
    }

    let mut out = vec![0.0; n];
    out[0] = (values[1] - values[0]) / (times[1] - times[0]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (times[n - 1] - times[n - 2]);

    for i in 1..n - 1 {
        let h_prev = times[i] - times[i - 1];
        let h_next = times[i + 1] - times[i];
        out[i] = (h_prev.powi(2) * values[i + 1] - h_next.powi(2) * values[i - 1]
            + (h_next.powi(2) - h_prev.powi(2)) * values[i])
            / (h_prev * h_next * (h_prev + h_next));
    }

    out
}

/// Root mean square of the element-wise difference of two sequences.
pub fn rms_error(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum();
    (sum / n as f64).sqrt()
}
