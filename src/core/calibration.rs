// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use crate::distortion_models::DistortionModel;
use crate::projection::ProjectionType;

use std::ops::RangeInclusive;

pub const DEFAULT_ASPECT_RATIO: f64 = 1.5;

/// Aspect ratios accepted from a lens database
pub const ASPECT_RATIO_RANGE: RangeInclusive<f64> = 1e-3..=1e3;

/// Half of the 24 mm full frame sensor height
pub const FULL_FRAME_HALF_HEIGHT_MM: f64 = 12.0;

/// Focal length in units of half the sensor height.
pub fn focal_ratio(focal_length: f64, crop_factor: f64) -> f64 {
    focal_length / (FULL_FRAME_HALF_HEIGHT_MM / crop_factor)
}

/// Everything needed to compute the autoscale of one lens at one focal length.
///
/// Image coordinates are normalized to a half-height of 1, so the image
/// rectangle spans `[-aspect_ratio, aspect_ratio] x [-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationContext {
    pub focal_ratio: f64,
    pub distortion: DistortionModel,
    pub projection: ProjectionType,
    pub aspect_ratio: f64,
}

impl CalibrationContext {
    pub fn new(focal_ratio: f64, distortion: DistortionModel, projection: ProjectionType, aspect_ratio: f64) -> Self {
        Self { focal_ratio, distortion, projection, aspect_ratio }
    }

    pub fn rectilinear(focal_ratio: f64, distortion: DistortionModel) -> Self {
        Self::new(focal_ratio, distortion, ProjectionType::Rectilinear, DEFAULT_ASPECT_RATIO)
    }

    /// Local autoscale factor at the normalized image point `(x, y)`.
    ///
    /// Returns `f64::INFINITY` when the distortion can't be inverted at this radius.
    /// NaN is possible for degenerate points (at or within root tolerance of
    /// the image center) and is left to the caller.
    pub fn scaling_at(&self, x: f64, y: f64) -> f64 {
        let rd = x.hypot(y);
        let ru = self.distortion.invert(rd);
        if ru.is_infinite() {
            return f64::INFINITY;
        }
        let r = self.projection.apply(ru, self.focal_ratio);
        if r == 0.0 {
            return f64::NAN;
        }
        rd / r
    }
}
