// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use serde::{ Serialize, Deserialize };
use std::str::FromStr;

/// Lens projection, named as in the lensfun database `<type>` element.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionType {
    #[default]
    Rectilinear,
    Fisheye,
    EquisolidAngle,
    Stereographic,
}

impl ProjectionType {
    /// Physical radius on the sensor for the ideal rectilinear radius `r`.
    /// `focal_ratio` is the focal length in half-sensor-heights.
    ///
    /// Out of domain input (e.g. `r / f / 2 > 1` for equisolid) gives NaN, never a panic.
    pub fn apply(&self, r: f64, focal_ratio: f64) -> f64 {
        let f = focal_ratio;
        match self {
            ProjectionType::Rectilinear    => r,
            ProjectionType::Fisheye        => f * (r / f).tan(),
            ProjectionType::EquisolidAngle => f * (2.0 * (r / f / 2.0).asin()).tan(),
            ProjectionType::Stereographic  => f * (2.0 * (r / f / 2.0).atan()).tan(),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ProjectionType::Rectilinear    => "rectilinear",
            ProjectionType::Fisheye        => "fisheye",
            ProjectionType::EquisolidAngle => "equisolidangle",
            ProjectionType::Stereographic  => "stereographic",
        }
    }
}

impl FromStr for ProjectionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rectilinear"    => Ok(ProjectionType::Rectilinear),
            "fisheye"        => Ok(ProjectionType::Fisheye),
            "equisolidangle" => Ok(ProjectionType::EquisolidAngle),
            "stereographic"  => Ok(ProjectionType::Stereographic),
            other => Err(other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ProjectionType::Rectilinear,    0.5, 2.0, 0.5)]
    #[test_case(ProjectionType::Fisheye,        0.5, 2.0, 2.0 * 0.25f64.tan())]
    #[test_case(ProjectionType::EquisolidAngle, 0.5, 2.0, 2.0 * (2.0 * 0.125f64.asin()).tan())]
    #[test_case(ProjectionType::Stereographic,  0.5, 2.0, 2.0 * (2.0 * 0.125f64.atan()).tan())]
    fn closed_form(projection: ProjectionType, r: f64, f: f64, expected: f64) {
        assert_eq!(projection.apply(r, f), expected);
    }

    #[test]
    fn non_rectilinear_projections_stretch_the_radius() {
        for p in [ProjectionType::Fisheye, ProjectionType::EquisolidAngle, ProjectionType::Stereographic] {
            let r = p.apply(0.8, 1.5);
            assert!(r > 0.8, "{p:?}: {r}");
        }
    }

    #[test]
    fn out_of_domain_does_not_panic() {
        assert!(ProjectionType::EquisolidAngle.apply(5.0, 1.0).is_nan());
        assert!(ProjectionType::Fisheye.apply(f64::INFINITY, 1.0).is_nan());
    }

    #[test_case("rectilinear",    ProjectionType::Rectilinear)]
    #[test_case("fisheye",        ProjectionType::Fisheye)]
    #[test_case(" equisolidangle\n", ProjectionType::EquisolidAngle)]
    #[test_case("stereographic",  ProjectionType::Stereographic)]
    fn parse(s: &str, expected: ProjectionType) {
        assert_eq!(s.parse::<ProjectionType>(), Ok(expected));
        assert_eq!(expected.id().parse::<ProjectionType>(), Ok(expected));
    }

    #[test]
    fn parse_unsupported() {
        assert_eq!("panoramic".parse::<ProjectionType>(), Err("panoramic".to_string()));
        assert_eq!(ProjectionType::default(), ProjectionType::Rectilinear);
    }
}
