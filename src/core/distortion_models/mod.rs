// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

mod ptlens;
mod poly3;
pub use ptlens::PtLens;
pub use poly3::Poly3;

use crate::root_finding::brent;

/// Initial bracket is [0, 2], widened by one until the upper limit passes this value.
pub const INITIAL_UPPER_LIMIT: f64 = 2.0;
pub const MAX_UPPER_LIMIT: f64 = 10.0;

macro_rules! impl_models {
    ($($name:ident => $class:ty,)*) => {
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum DistortionModel {
            $($name($class),)*
        }
        impl DistortionModel {
            pub fn forward(&self, ru: f64) -> f64 {
                match self { $(DistortionModel::$name(x) => x.forward(ru),)* }
            }
            pub fn is_identity(&self) -> bool {
                match self { $(DistortionModel::$name(x) => x.is_identity(),)* }
            }
            pub fn id(&self)   -> &'static str { match self { $(DistortionModel::$name(_) => <$class>::id(),)* } }
            pub fn name(&self) -> &'static str { match self { $(DistortionModel::$name(_) => <$class>::name(),)* } }

            pub fn is_supported(id: &str) -> bool {
                [$(<$class>::id(),)*].contains(&id)
            }
        }
    };
}

impl_models! {
    PtLens => PtLens,
    Poly3  => Poly3,
}

impl DistortionModel {
    pub fn ptlens(a: f64, b: f64, c: f64) -> Self { DistortionModel::PtLens(PtLens::new(a, b, c)) }
    pub fn poly3(k1: f64) -> Self { DistortionModel::Poly3(Poly3::new(k1)) }

    /// Builds the model named `id` ("ptlens" or "poly3"), missing coefficients are 0.
    /// Returns `None` for unsupported models.
    pub fn from_id<F: Fn(&str) -> Option<f64>>(id: &str, coeff: F) -> Option<Self> {
        let k = |name: &str| coeff(name).unwrap_or(0.0);
        match id {
            "ptlens" => Some(Self::ptlens(k("a"), k("b"), k("c"))),
            "poly3"  => Some(Self::poly3(k("k1"))),
            _ => None
        }
    }

    /// Coefficient names read by [`DistortionModel::from_id`]
    pub fn coefficient_names(id: &str) -> &'static [&'static str] {
        match id {
            "ptlens" => &["a", "b", "c"],
            "poly3"  => &["k1"],
            _ => &[]
        }
    }

    /// Ideal radius `ru` such that `forward(ru) == rd`.
    ///
    /// The polynomials are not monotonic in general, so the root is searched in
    /// `[0, upper_limit]` and the interval is widened until its ends have
    /// residuals of opposite sign. Returns `f64::INFINITY` when no bracket is
    /// found up to [`MAX_UPPER_LIMIT`].
    pub fn invert(&self, rd: f64) -> f64 {
        if self.is_identity() {
            return rd;
        }

        let mut upper_limit = INITIAL_UPPER_LIMIT;
        while upper_limit <= MAX_UPPER_LIMIT {
            if let Some(ru) = brent(|ru| self.forward(ru) - rd, 0.0, upper_limit).found() {
                return ru;
            }
            upper_limit += 1.0;
        }
        log::debug!("{}: no ideal radius for rd = {rd} in [0, {MAX_UPPER_LIMIT}]", self.name());
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root_finding::Root;
    use test_case::test_case;

    #[test_case(DistortionModel::ptlens(0.0, 0.0, -0.1)       ; "ptlens barrel")]
    #[test_case(DistortionModel::ptlens(0.0, 0.0, 0.1)        ; "ptlens pincushion")]
    #[test_case(DistortionModel::ptlens(0.01, -0.03, 0.02)    ; "ptlens mixed")]
    #[test_case(DistortionModel::poly3(-0.02)                 ; "poly3 barrel")]
    #[test_case(DistortionModel::poly3(0.015)                 ; "poly3 pincushion")]
    fn forward_inverse_round_trip(model: DistortionModel) {
        // All of these are monotonic on [0, 3], past the initial bracket
        for i in 0..=300 {
            let r = i as f64 / 100.0;
            let rd = model.forward(r);
            let back = model.forward(model.invert(rd));
            assert!((back - rd).abs() < 1e-9, "{}: r = {r}, {back} != {rd}", model.name());
        }
    }

    #[test_case(DistortionModel::ptlens(0.0, 0.0, -0.1), 2.5 ; "ptlens barrel")]
    #[test_case(DistortionModel::poly3(-0.02),           2.2 ; "poly3 barrel")]
    fn inverse_beyond_initial_bracket(model: DistortionModel, ru: f64) {
        let rd = model.forward(ru);
        assert!(model.forward(INITIAL_UPPER_LIMIT) < rd);
        assert!((model.invert(rd) - ru).abs() < 1e-9);
    }

    #[test]
    fn normalized_at_unit_radius() {
        assert!((DistortionModel::ptlens(0.02, -0.05, 0.01).forward(1.0) - 1.0).abs() < 1e-15);
        assert!((DistortionModel::poly3(-0.03).forward(1.0) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn identity_inverse_is_exact() {
        for rd in [0.0, 0.3, 1.0, 1.3, 1.8027756377319946] {
            assert_eq!(DistortionModel::ptlens(0.0, 0.0, 0.0).invert(rd), rd);
            assert_eq!(DistortionModel::poly3(0.0).invert(rd), rd);
        }
    }

    #[test]
    fn inverse_of_known_point() {
        // 1.1 r - 0.1 r^2 = 1.5  =>  r = (1.1 - sqrt(0.61)) / 0.2
        let ru = DistortionModel::ptlens(0.0, 0.0, -0.1).invert(1.5);
        assert!((ru - (1.1 - 0.61f64.sqrt()) / 0.2).abs() < 1e-9);
    }

    #[test]
    fn widens_bracket_beyond_initial_limit() {
        // 0.1 r^4 - 0.5 r^3 + 1.4 r dips below 1 at r = 2, 3 and 4 and comes back up at 5
        let model = DistortionModel::ptlens(0.1, -0.5, 0.0);
        assert_eq!(brent(|r| model.forward(r) - 1.0, 0.0, INITIAL_UPPER_LIMIT), Root::NoBracket);

        let ru = model.invert(1.0);
        assert!(ru.is_finite());
        assert!((model.forward(ru) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn divergent_model_returns_infinity() {
        // r * (2 - r^3) never reaches 1.8 and is negative at every upper limit
        let model = DistortionModel::ptlens(-1.0, 0.0, 0.0);
        assert_eq!(model.invert(1.8), f64::INFINITY);
        assert_eq!(model.invert(1.0), f64::INFINITY);
        assert!(DistortionModel::ptlens(0.0, 0.0, -0.1).invert(1.8).is_finite());
    }

    #[test]
    fn from_id_defaults_missing_coefficients() {
        let coeffs = |name: &str| match name { "b" => Some(-0.01), "k1" => Some(0.02), _ => None };
        assert_eq!(DistortionModel::from_id("ptlens", coeffs), Some(DistortionModel::ptlens(0.0, -0.01, 0.0)));
        assert_eq!(DistortionModel::from_id("poly3", coeffs), Some(DistortionModel::poly3(0.02)));
        assert_eq!(DistortionModel::from_id("poly5", coeffs), None);
        assert_eq!(DistortionModel::coefficient_names("ptlens"), &["a", "b", "c"]);
    }

    #[test]
    fn supported_ids() {
        assert!(DistortionModel::is_supported("ptlens"));
        assert!(DistortionModel::is_supported("poly3"));
        assert!(!DistortionModel::is_supported("poly5"));
        assert_eq!(DistortionModel::poly3(0.1).id(), "poly3");
        assert_eq!(DistortionModel::ptlens(0.1, 0.0, 0.0).name(), "PTLens");
    }
}
