//! Locate `.model3` files on disk and report their style references.
//!
//! QGIS keeps processing models in the profile's `processing/models`
//! directory; the CLI points this module at such a directory, or at any
//! other tree containing model files.

use crate::styles::extract_qml_paths;
use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

/// Style references found in one model file.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStyles {
    pub model: Utf8PathBuf,
    pub qml_paths: Vec<String>,
}

/// Find all `.model3` files under `dir` (recursively), sorted by path.
pub fn find_model_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir.as_std_path()) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = Utf8PathBuf::from_path_buf(entry.into_path())
            .map_err(|p| anyhow!("Non-UTF8 path under {}: {}", dir, p.display()))?;
        if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("model3"))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Extract the style references of every model file under `dir`.
///
/// Files that cannot be read are hard errors; files that read fine but do
/// not parse as XML yield an empty style list, per the extractor contract.
pub fn scan_model_styles(dir: &Utf8Path) -> Result<Vec<ModelStyles>> {
    let files = find_model_files(dir)?;
    files
        .into_par_iter()
        .map(|model| {
            let text = std::fs::read_to_string(model.as_str())
                .with_context(|| format!("Failed to read {}", model))?;
            let qml_paths = extract_qml_paths(&text);
            Ok(ModelStyles { model, qml_paths })
        })
        .collect()
}
