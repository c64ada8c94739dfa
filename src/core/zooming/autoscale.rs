// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use crate::calibration::CalibrationContext;

/// Upper bound of the point count along one vertical edge
pub const MAX_EDGE_SAMPLES: usize = 1 << 16;

// Returns the sampled points of the image border, horizontal edges first.
// `samples` points go along each horizontal edge, the vertical edges get the
// count scaled by the aspect ratio and rounded up to an even number, at most
// `MAX_EDGE_SAMPLES`.
pub fn points_around_rect(aspect_ratio: f64, samples: usize) -> Vec<(f64, f64)> {
    let half = (samples as f64 / aspect_ratio / 2.0).ceil();
    // `as` saturates, NaN (0 samples of a 0 ratio) maps to 0
    let vertical_samples = (half as usize).min(MAX_EDGE_SAMPLES / 2) * 2;

    let mut points = Vec::with_capacity(samples.saturating_add(vertical_samples).saturating_mul(2));
    for i in 0..samples {
        let x = aspect_ratio * (-1.0 + i as f64 / samples as f64 * 2.0);
        points.push((x, -1.0));
        points.push((x, 1.0));
    }
    for i in 0..vertical_samples {
        let y = -1.0 + i as f64 / vertical_samples as f64 * 2.0;
        points.push((-aspect_ratio, y));
        points.push((aspect_ratio, y));
    }
    points
}

/// Zoom needed so the undistorted image still covers the whole frame,
/// estimated as the largest local scale over `samples`-dense border points.
///
/// NaN samples are ignored, infinity (divergent distortion) wins.
/// Falls back to `1.0` when there's no usable sample or the maximum is zero.
pub fn autoscale(ctx: &CalibrationContext, samples: usize) -> f64 {
    let max = points_around_rect(ctx.aspect_ratio, samples)
        .into_iter()
        .map(|(x, y)| ctx.scaling_at(x, y))
        .filter(|s| !s.is_nan())
        .reduce(f64::max);

    match max {
        Some(max) if max != 0.0 => max,
        _ => 1.0
    }
}
