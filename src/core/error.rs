// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright © 2022 Adrian <adrian.eddy at gmail>

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0:?}")]                                Io(#[from] std::io::Error),
    #[error("XML error: {0}")]                                 Xml(#[from] roxmltree::Error),
    #[error("Settings error: {0}")]                            Settings(#[from] serde_json::Error),
    #[error("Lens {lens:?} is missing the <{element}> element")] MissingElement { lens: String, element: &'static str },
    #[error("Lens {lens:?}: <distortion> is missing the {attribute:?} attribute")] MissingAttribute { lens: String, attribute: &'static str },
    #[error("Lens {lens:?}: invalid number {value:?} in {field}")] InvalidNumber { lens: String, field: &'static str, value: String },
    #[error("Lens {lens:?}: invalid aspect ratio {value:?}")]    InvalidAspectRatio { lens: String, value: String },
    #[error("Invalid settings: {0}")]                          InvalidSettings(String),
}

pub type Result<T> = std::result::Result<T, Error>;
