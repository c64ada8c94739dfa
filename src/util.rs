// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2021-2022 Adrian <adrian.eddy at gmail>

use simplelog::{ ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode };

pub fn init_logging(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("rayon")
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Debug)
        .build();

    // Logs go to stderr, stdout is reserved for the report
    if let Err(e) = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialize logger: {e}");
    }
    log_panics::init();
}

pub fn get_version() -> String {
    format!("{} (core {})", env!("CARGO_PKG_VERSION"), autoscale_core::get_version())
}
