// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

// Adapted from LensFun: https://github.com/lensfun/lensfun/blob/e78e7be448c81256cce36a5a37ddc229616c0db7/libs/lensfun/mod-coord.cpp#L562

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Poly3 {
    pub k1: f64,
}

impl Poly3 {
    pub fn new(k1: f64) -> Self {
        Self { k1 }
    }

    /// Rd = Ru * (k1 * Ru^2 + 1 - k1)
    pub fn forward(&self, ru: f64) -> f64 {
        ru * (self.k1 * ru.powi(2) + 1.0 - self.k1)
    }

    pub fn is_identity(&self) -> bool {
        self.k1 == 0.0
    }

    pub fn id() -> &'static str { "poly3" }
    pub fn name() -> &'static str { "Poly3" }
}
