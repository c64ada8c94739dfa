// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use argh::FromArgs;
use autoscale_core::*;
use indicatif::{ ProgressBar, ProgressDrawTarget, ProgressStyle };
use itertools::Itertools;
use simplelog::LevelFilter;

pub const DEFAULT_DB_PATH: &str = "./data/db";

/** lensfun-autoscale
Finds how many border samples are needed to estimate the autoscale of lensfun distortion calibrations
*/
#[derive(FromArgs)]
pub struct Opts {
    /// lensfun database directories or XML files, default: ./data/db
    #[argh(positional)]
    pub input: Vec<String>,

    /// search settings JSON file with any of: reference_samples, tolerance, window, max_samples
    #[argh(option, short = 's')]
    pub settings: Option<String>,

    /// print the report as JSON
    #[argh(switch)]
    pub json: bool,

    /// number of worker threads, default: all cores
    #[argh(option, short = 'j')]
    pub threads: Option<usize>,

    /// verbose logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,

    /// only log errors
    #[argh(switch, short = 'q')]
    pub quiet: bool,

    /// print app version
    #[argh(switch)]
    pub version: bool,
}

impl Opts {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet { LevelFilter::Error } else if self.verbose { LevelFilter::Debug } else { LevelFilter::Info }
    }
}

/// Returns the process exit code
pub fn run(opts: Opts) -> i32 {
    if opts.version {
        println!("lensfun-autoscale v{}", crate::util::get_version());
        return 0;
    }

    let settings = match &opts.settings {
        Some(path) => match SearchSettings::from_json_file(path) {
            Ok(s) => s,
            Err(e) => {
                log::error!("Invalid settings file {}: {}", path, e);
                return 2;
            }
        },
        None => SearchSettings::default()
    };

    if let Some(threads) = opts.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global() {
            log::warn!("Unable to set the number of threads: {}", e);
        }
    }

    let mut db = LensDatabase::default();
    let inputs = if opts.input.is_empty() { vec![DEFAULT_DB_PATH.to_string()] } else { opts.input.clone() };
    for input in &inputs {
        let path = std::path::Path::new(input);
        if path.is_dir() {
            db.load_dir(path);
        } else if path.is_file() {
            if let Err(e) = db.load_file(path) {
                log::error!("Error loading {}: {}", input, e);
            }
        } else {
            log::error!("{} doesn't exist.", input);
            return 2;
        }
    }
    if db.is_empty() {
        log::error!("No supported distortion calibrations found in {:?}", inputs);
        return 1;
    }
    log::info!("Searching sample counts for {} calibrations ({:?})", db.len(), settings);

    let pb = ProgressBar::new(db.len() as u64);
    if opts.quiet {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(ProgressStyle::with_template("[{bar:50.cyan/blue}] {pos:>5}/{len:5} {elapsed_precise} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"));

    let summary = pipeline::run(db.records(), &settings, |result| {
        pb.set_message(result.model.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    if opts.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Unable to serialize the report: {}", e);
                return 1;
            }
        }
    } else {
        print!("{}", format_report(&summary));
    }

    let failed = summary.not_converged().count();
    if failed > 0 {
        log::warn!("{} of {} calibrations didn't converge", failed, summary.results.len());
    }
    0
}

fn format_outcome(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Converged { samples } => samples.to_string(),
        SearchOutcome::DidNotConverge { max_samples } => format!("not converged (> {})", max_samples),
        SearchOutcome::NonFiniteReference { reference } => format!("divergent ({})", reference),
    }
}

/// One `model focal samples` line per calibration, then the set of distinct sample counts
pub fn format_report(summary: &RunSummary) -> String {
    let mut out = String::new();
    for r in &summary.results {
        out.push_str(&format!("{} {} {}\n", r.model, r.focal_length, format_outcome(&r.outcome)));
    }
    out.push_str(&format!("{{{}}}\n", summary.distinct.iter().join(", ")));
    out
}
