// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2021-2022 Adrian <adrian.eddy at gmail>

pub mod cli;
pub mod util;

fn main() {
    let opts: cli::Opts = argh::from_env();
    util::init_logging(opts.log_level());
    ::log::debug!("lensfun-autoscale {}", util::get_version());

    std::process::exit(cli::run(opts));
}
