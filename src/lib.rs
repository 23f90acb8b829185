//! QGIS `.model3` style-reference tooling.
//!
//! Processing models built with the QGIS model designer embed absolute
//! paths to `.qml` layer-style files, which break as soon as a model is
//! shared with another machine or profile. This crate parses the `.model3`
//! XML dialect into a generic Option tree and provides two text-level
//! operations on it:
//!
//! - [`styles::extract_qml_paths`] lists the referenced style files
//! - [`styles::replace_qml_paths`] redirects every reference into a new
//!   models directory, keeping the original file names
//!
//! Both take document text and return values; reading and writing files is
//! the caller's job. The binary `model3-restyle` is such a caller and
//! exposes both operations over the command line.

pub mod generator;
pub mod model;
pub mod parser;
pub mod scan;
pub mod styles;
