// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

// Adapted from LensFun: https://github.com/lensfun/lensfun/blob/e78e7be448c81256cce36a5a37ddc229616c0db7/libs/lensfun/mod-coord.cpp#L696

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PtLens {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PtLens {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Rd = Ru * (a * Ru^3 + b * Ru^2 + c * Ru + d), with d = 1 - a - b - c so that Rd(1) = 1
    pub fn forward(&self, ru: f64) -> f64 {
        let d = 1.0 - self.a - self.b - self.c;
        ru * (self.a * ru.powi(3) + self.b * ru.powi(2) + self.c * ru + d)
    }

    pub fn is_identity(&self) -> bool {
        self.a == 0.0 && self.b == 0.0 && self.c == 0.0
    }

    pub fn id() -> &'static str { "ptlens" }
    pub fn name() -> &'static str { "PTLens" }
}
