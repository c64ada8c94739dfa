// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

use std::collections::HashMap;
use std::path::Path;
use roxmltree::Node;
use walkdir::WalkDir;

use crate::calibration::{ focal_ratio, CalibrationContext, ASPECT_RATIO_RANGE, DEFAULT_ASPECT_RATIO };
use crate::distortion_models::DistortionModel;
use crate::projection::ProjectionType;
use crate::{ Error, Result };

/// One `<distortion>` entry of a lensfun `<lens>`.
#[derive(Clone, Debug, PartialEq)]
pub struct LensRecord {
    pub model: String,
    pub maker: String,
    pub focal_length: f64,
    pub crop_factor: f64,
    pub context: CalibrationContext,
}

impl LensRecord {
    pub fn new(model: &str, focal_length: f64, crop_factor: f64, projection: ProjectionType, aspect_ratio: f64, distortion: DistortionModel) -> Self {
        Self {
            model: model.to_string(),
            maker: String::new(),
            focal_length,
            crop_factor,
            context: CalibrationContext::new(focal_ratio(focal_length, crop_factor), distortion, projection, aspect_ratio),
        }
    }
}

#[derive(Default)]
pub struct LensDatabase {
    records: Vec<LensRecord>
}

impl LensDatabase {
    /// Loads every `.xml` file under `path`, in file name order.
    /// Files that can't be read or parsed are logged and skipped.
    pub fn load_dir<P: AsRef<Path>>(&mut self, path: P) -> usize {
        let _time = std::time::Instant::now();
        let before = self.records.len();

        WalkDir::new(path.as_ref()).sort_by_file_name().into_iter().for_each(|e| {
            match e {
                Ok(entry) => {
                    let is_xml = entry.path().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
                    if entry.file_type().is_file() && is_xml {
                        if let Err(e) = self.load_file(entry.path()) {
                            log::error!("Error loading lens database file {}: {}", entry.path().display(), e);
                        }
                    }
                },
                Err(e) => {
                    log::error!("Error reading lens database directory: {}", e);
                }
            }
        });

        let loaded = self.records.len() - before;
        ::log::info!("Loaded {} calibrations from {} in {:.3}ms", loaded, path.as_ref().display(), _time.elapsed().as_micros() as f64 / 1000.0);
        loaded
    }

    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let records = Self::parse_xml(&data)?;
        log::debug!("{}: {} calibrations", path.as_ref().display(), records.len());
        let count = records.len();
        self.records.extend(records);
        Ok(count)
    }

    /// Records of all lenses in a lensfun XML document.
    ///
    /// Only malformed XML is an error; a lens with missing or invalid fields is
    /// logged and skipped, the rest of the document is still used.
    pub fn parse_xml(xml: &str) -> Result<Vec<LensRecord>> {
        let doc = roxmltree::Document::parse(xml)?;

        let mut records = Vec::new();
        for lens in doc.root_element().children().filter(|n| n.has_tag_name("lens")) {
            match lens_records(lens) {
                Ok(v) => records.extend(v),
                Err(e) => log::error!("Skipping lens at line {}: {}", doc.text_pos_at(lens.range().start).row, e)
            }
        }
        Ok(records)
    }

    pub fn records(&self) -> &[LensRecord] { &self.records }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).map(|n| n.text().unwrap_or_default().trim())
}

fn parse_number(lens: &str, field: &'static str, value: &str) -> Result<f64> {
    value.trim().parse::<f64>().map_err(|_| Error::InvalidNumber { lens: lens.to_string(), field, value: value.to_string() })
}

/// "3:2" or "1.5", within [`ASPECT_RATIO_RANGE`]
fn parse_aspect_ratio(lens: &str, value: &str) -> Result<f64> {
    let invalid = || Error::InvalidAspectRatio { lens: lens.to_string(), value: value.to_string() };
    let ratio = match value.split_once(':') {
        Some((num, den)) if !den.trim().is_empty() => {
            let num = num.trim().parse::<f64>().map_err(|_| invalid())?;
            let den = den.trim().parse::<f64>().map_err(|_| invalid())?;
            num / den
        }
        Some((num, _)) => num.trim().parse::<f64>().map_err(|_| invalid())?,
        None => value.trim().parse::<f64>().map_err(|_| invalid())?
    };
    if ASPECT_RATIO_RANGE.contains(&ratio) { Ok(ratio) } else { Err(invalid()) }
}

pub(crate) fn lens_records(lens: Node) -> Result<Vec<LensRecord>> {
    let model = child_text(lens, "model").ok_or_else(|| Error::MissingElement { lens: String::new(), element: "model" })?;
    let maker = child_text(lens, "maker").unwrap_or_default();

    let projection = match child_text(lens, "type") {
        Some(t) => match t.parse::<ProjectionType>() {
            Ok(p) => p,
            Err(t) => {
                log::warn!("{}: unsupported lens type {:?}, skipping", model, t);
                return Ok(Vec::new());
            }
        },
        None => ProjectionType::Rectilinear
    };

    let crop_factor = child_text(lens, "cropfactor").ok_or_else(|| Error::MissingElement { lens: model.to_string(), element: "cropfactor" })?;
    let crop_factor = parse_number(model, "cropfactor", crop_factor)?;

    let aspect_ratio = match child_text(lens, "aspect-ratio") {
        Some(v) => parse_aspect_ratio(model, v)?,
        None => DEFAULT_ASPECT_RATIO
    };

    let Some(calibration) = child(lens, "calibration") else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for distortion in calibration.children().filter(|n| n.has_tag_name("distortion")) {
        let id = distortion.attribute("model").unwrap_or_default();
        if !DistortionModel::is_supported(id) {
            log::debug!("{}: unsupported distortion model {:?}", model, id);
            continue;
        }

        let focal = distortion.attribute("focal").ok_or_else(|| Error::MissingAttribute { lens: model.to_string(), attribute: "focal" })?;
        let focal_length = parse_number(model, "focal", focal)?;

        let mut coeffs = HashMap::new();
        for &name in DistortionModel::coefficient_names(id) {
            if let Some(v) = distortion.attribute(name) {
                coeffs.insert(name, parse_number(model, "distortion", v)?);
            }
        }
        let Some(distortion) = DistortionModel::from_id(id, |name| coeffs.get(name).copied()) else { continue; };

        records.push(LensRecord {
            maker: maker.to_string(),
            ..LensRecord::new(model, focal_length, crop_factor, projection, aspect_ratio, distortion)
        });
    }
    Ok(records)
}
