//! Angle utilities for bearings on a circle of arbitrary period.

use crate::math::stats::StatsHelper;
use std::cmp::Ordering;
use std::f64::consts::TAU;

/// Normalizes an angle into `[0, period)`.
#[inline]
pub fn normalize(angle: f64, period: f64) -> f64 {
    let norm = angle.rem_euclid(period);
    // rem_euclid may round up to the period itself for tiny negative inputs.
    if norm >= period {
        0.0
    } else {
        norm
    }
}

/// Normalizes an angle into `[0, 2π)`.
#[inline]
pub fn normalize_full(angle: f64) -> f64 {
    normalize(angle, TAU)
}

/// Smallest unsigned separation of two angles on a circle of `period`.
#[inline]
pub fn circular_distance(a: f64, b: f64, period: f64) -> f64 {
    let diff = normalize(a - b, period);
    diff.min(period - diff)
}

/// Median of angles on a circle of `period`.
///
/// The circle is cut at the widest empty arc between neighbouring angles, the
/// angles are unwrapped from that cut into one monotonic run, and the ordinary
/// median of the run is folded back into `[0, period)`. Returns `None` for an
/// empty input or when any angle is not finite.
pub fn circular_median(angles: &[f64], period: f64) -> Option<f64> {
    if angles.is_empty() || angles.iter().any(|a| !a.is_finite()) {
        return None;
    }

    let mut sorted: Vec<f64> = angles.iter().map(|&a| normalize(a, period)).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let last = sorted.len() - 1;
    let mut widest_gap = sorted[0] + period - sorted[last];
    let mut cut = last;
    for idx in 0..last {
        let gap = sorted[idx + 1] - sorted[idx];
        if gap > widest_gap {
            widest_gap = gap;
            cut = idx;
        }
    }

    let unwrapped: Vec<f64> = sorted[cut + 1..]
        .iter()
        .copied()
        .chain(sorted[..=cut].iter().map(|&a| a + period))
        .collect();

    StatsHelper::median_of_sorted(&unwrapped).map(|m| normalize(m, period))
}
