// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

pub mod root_finding;
pub mod distortion_models;
pub mod projection;
pub mod calibration;
pub mod zooming;

pub mod settings;
pub mod lens_database;
pub mod pipeline;

mod error;

pub use error::{ Error, Result };
pub use calibration::{ focal_ratio, CalibrationContext };
pub use distortion_models::DistortionModel;
pub use projection::ProjectionType;
pub use settings::SearchSettings;
pub use lens_database::{ LensDatabase, LensRecord };
pub use pipeline::{ RunSummary, SampleCount };
pub use zooming::{ autoscale, find_sample_count, SearchOutcome };

pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
