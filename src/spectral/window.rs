//! Hann tapering windows.

use std::f64::consts::PI;

/// Symmetric Hann window of length `n` (endpoints are zero).
///
/// Used to taper a whole burst before its DFT.
pub fn hann_symmetric(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (n - 1) as f64;
            (0..n)
                .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / denom).cos())
                .collect()
        }
    }
}

/// Periodic Hann window of length `n` (DFT-even, last sample non-zero).
///
/// Used for Welch segments so that overlapping windows sum to a constant.
pub fn hann_periodic(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let len = n as f64;
    (0..n)
        .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / len).cos())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_symmetric() {
        let w = hann_symmetric(5);
        let expected = [0.0, 0.5, 1.0, 0.5, 0.0];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert!((a - b).abs() < TOL);
        }
        assert_eq!(hann_symmetric(1), vec![1.0]);
        assert!(hann_symmetric(0).is_empty());
    }

    #[test]
    fn test_periodic() {
        let w = hann_periodic(4);
        let expected = [0.0, 0.5, 1.0, 0.5];
        for (a, b) in w.iter().zip(expected.iter()) {
            assert!((a - b).abs() < TOL);
        }
    }

    #[test]
    fn test_periodic_overlap_add_is_constant() {
        // 50% overlapped periodic Hann windows sum to 1
        let n = 16;
        let w = hann_periodic(n);
        for i in 0..n / 2 {
            assert!((w[i] + w[i + n / 2] - 1.0).abs() < TOL);
        }
    }
}
