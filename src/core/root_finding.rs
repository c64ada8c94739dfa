// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

// Brent's method, same stepping rules as the classic `brentq` (Brent 1973, chapter 4).

pub const XTOL: f64 = 2e-12;
pub const RTOL: f64 = 4.0 * f64::EPSILON;
pub const MAX_ITER: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    Found(f64),
    /// Residuals at both ends of the interval have the same sign (or aren't finite)
    NoBracket,
}

impl Root {
    pub fn found(self) -> Option<f64> {
        match self {
            Root::Found(x) => Some(x),
            Root::NoBracket => None,
        }
    }
}

/// Finds a zero of `f` in `[xa, xb]`.
///
/// If the iteration budget runs out the current best estimate is returned, the
/// interval still brackets a root so the estimate is within the last step size.
pub fn brent<F: Fn(f64) -> f64>(f: F, xa: f64, xb: f64) -> Root {
    let mut xpre = xa;
    let mut xcur = xb;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if !fpre.is_finite() || !fcur.is_finite() {
        return Root::NoBracket;
    }
    if fpre == 0.0 { return Root::Found(xpre); }
    if fcur == 0.0 { return Root::Found(xcur); }
    if fpre.signum() == fcur.signum() {
        return Root::NoBracket;
    }

    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0f64, 0.0f64);

    for _ in 0..MAX_ITER {
        if fpre != 0.0 && fcur != 0.0 && fpre.signum() != fcur.signum() {
            xblk = xpre;
            fblk = fpre;
            scur = xcur - xpre;
            spre = scur;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur; xcur = xblk; xblk = xpre;
            fpre = fcur; fcur = fblk; fblk = fpre;
        }

        let delta = (XTOL + RTOL * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Root::Found(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);
    }

    log::debug!("brent: iteration limit reached at x = {xcur}");
    Root::Found(xcur)
}
