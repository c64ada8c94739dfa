// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

pub mod autoscale;
pub mod sample_search;

pub use autoscale::{ autoscale, points_around_rect };
pub use sample_search::{ find_sample_count, SearchOutcome };
