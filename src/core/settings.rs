// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2024 Adrian <adrian.eddy at gmail>

use serde::{ Serialize, Deserialize };
use std::path::Path;
use crate::{ Error, Result };

/// Parameters of the sample count search.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    /// Sample count of the reference autoscale estimate
    pub reference_samples: usize,
    /// Maximum relative error against the reference
    pub tolerance: f64,
    /// Number of consecutive estimates that have to be within tolerance
    pub window: usize,
    /// Give up after this many samples. `None` searches forever.
    pub max_samples: Option<usize>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            reference_samples: 100,
            tolerance: 1e-3,
            window: 3,
            max_samples: Some(1000),
        }
    }
}

impl SearchSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&data)?;
        log::debug!("Loaded search settings from {}: {:?}", path.as_ref().display(), settings);
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_samples == 0 {
            return Err(Error::InvalidSettings("reference_samples must be at least 1".into()));
        }
        if self.window == 0 {
            return Err(Error::InvalidSettings("window must be at least 1".into()));
        }
        if !(self.tolerance > 0.0) {
            return Err(Error::InvalidSettings(format!("tolerance must be positive, got {}", self.tolerance)));
        }
        if self.max_samples == Some(0) {
            return Err(Error::InvalidSettings("max_samples must be at least 1".into()));
        }
        Ok(())
    }
}
