// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use serde::Serialize;
use crate::calibration::CalibrationContext;
use crate::settings::SearchSettings;
use super::autoscale::autoscale;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Converged { samples: usize },
    /// No stable estimate up to the configured sample limit
    DidNotConverge { max_samples: usize },
    /// The reference autoscale is infinite (or NaN), no estimate can get close to it
    NonFiniteReference { reference: f64 },
}

impl SearchOutcome {
    pub fn samples(&self) -> Option<usize> {
        match self {
            SearchOutcome::Converged { samples } => Some(*samples),
            _ => None
        }
    }
}

/// Smallest border sample count for which the autoscale estimate has settled.
///
/// Estimates are computed for 1, 2, 3, ... samples. The search stops as soon
/// as the last `window` estimates (or all of them while there are fewer) are
/// within `tolerance` relative error of the estimate at `reference_samples`.
pub fn find_sample_count(ctx: &CalibrationContext, settings: &SearchSettings) -> SearchOutcome {
    let reference = autoscale(ctx, settings.reference_samples);
    if !reference.is_finite() {
        log::debug!("Reference autoscale is {reference}, skipping search for {ctx:?}");
        return SearchOutcome::NonFiniteReference { reference };
    }

    let is_close = |estimate: f64| (estimate - reference).abs() / reference < settings.tolerance;

    // Number of trailing estimates within tolerance
    let mut streak = 0;
    let mut samples = 1;
    loop {
        if let Some(max_samples) = settings.max_samples {
            if samples > max_samples {
                log::warn!("Autoscale estimate didn't settle within {max_samples} samples (reference: {reference})");
                return SearchOutcome::DidNotConverge { max_samples };
            }
        }

        streak = if is_close(autoscale(ctx, samples)) { streak + 1 } else { 0 };
        if streak >= settings.window.min(samples) {
            return SearchOutcome::Converged { samples };
        }
        samples += 1;
    }
}
