// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use std::collections::BTreeSet;
use rayon::iter::{ IntoParallelRefIterator, ParallelIterator };
use serde::Serialize;

use crate::lens_database::LensRecord;
use crate::projection::ProjectionType;
use crate::settings::SearchSettings;
use crate::zooming::{ find_sample_count, SearchOutcome };

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleCount {
    pub model: String,
    pub maker: String,
    pub focal_length: f64,
    pub crop_factor: f64,
    pub projection: ProjectionType,
    /// Distortion model id, "ptlens" or "poly3"
    pub distortion: &'static str,
    pub outcome: SearchOutcome,
}

impl SampleCount {
    /// `(model, focal length, sample count)`, only for converged searches
    pub fn as_tuple(&self) -> Option<(&str, f64, usize)> {
        self.outcome.samples().map(|n| (self.model.as_str(), self.focal_length, n))
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub results: Vec<SampleCount>,
    /// Every distinct converged sample count of the run
    pub distinct: BTreeSet<usize>,
}

impl RunSummary {
    pub fn not_converged(&self) -> impl Iterator<Item = &SampleCount> {
        self.results.iter().filter(|r| r.outcome.samples().is_none())
    }
}

/// Runs the sample count search for every record on the rayon pool.
///
/// Results are in the same order as `records`. `progress` is called from the
/// worker threads once per finished record.
pub fn run<F>(records: &[LensRecord], settings: &SearchSettings, progress: F) -> RunSummary
    where F: Fn(&SampleCount) + Sync
{
    let _time = std::time::Instant::now();

    let results: Vec<SampleCount> = records.par_iter()
        .map(|record| {
            let outcome = find_sample_count(&record.context, settings);
            let ctx = &record.context;
            log::debug!("{} @ {}mm ({}, {}): {:?}", record.model, record.focal_length, ctx.projection.id(), ctx.distortion.id(), outcome);

            let result = SampleCount {
                model: record.model.clone(),
                maker: record.maker.clone(),
                focal_length: record.focal_length,
                crop_factor: record.crop_factor,
                projection: ctx.projection,
                distortion: ctx.distortion.id(),
                outcome
            };
            progress(&result);
            result
        })
        .collect();

    let distinct = results.iter().filter_map(|r| r.outcome.samples()).collect();

    ::log::info!("Searched {} calibrations in {:.3}ms", results.len(), _time.elapsed().as_micros() as f64 / 1000.0);

    RunSummary { results, distinct }
}
