//! Extraction and rewriting of QML style references in `.model3` text.
//!
//! A style reference is stored in the following attribute pattern:
//!
//! ```xml
//! <Option name="STYLE" type="List">
//!   <Option type="Map">
//!     <Option value="…/style.qml" name="static_value" type="QString"/>
//!   </Option>
//! </Option>
//! ```
//!
//! Both operations here are pure text-in/text-out: no file I/O, no host
//! lookups. Malformed input is never a hard failure, since these functions
//! are routinely pointed at arbitrary files.

use crate::generator::generate_model_xml;
use crate::parser::parse_model;
use indexmap::IndexSet;

const STYLE_LIST: [(&str, &str); 2] = [("name", "STYLE"), ("type", "List")];
const STATIC_VALUE: [(&str, &str); 2] = [("name", "static_value"), ("type", "QString")];

fn is_qml_path(value: &str) -> bool {
    value.to_ascii_lowercase().ends_with(".qml")
}

/// Last path segment of a style path, treating both `/` and `\` as
/// separators. Model files written on Windows keep their backslash paths
/// even when processed on another host.
fn file_name_component(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Join a file name onto the models directory, following the directory's
/// own separator convention rather than the host's.
fn join_models_dir(models_dir: &str, file_name: &str) -> String {
    if models_dir.ends_with(['/', '\\']) {
        return format!("{}{}", models_dir, file_name);
    }
    let sep = if models_dir.contains('\\') && !models_dir.contains('/') {
        '\\'
    } else {
        '/'
    };
    format!("{}{}{}", models_dir, sep, file_name)
}

/// Extract the QML style-file paths referenced by a `.model3` document.
///
/// Returns the paths in first-seen order with exact duplicates removed.
/// The `.qml` extension check is case-insensitive; dedup is case-sensitive.
/// Input that fails to parse as XML yields an empty list.
pub fn extract_qml_paths(content: &str) -> Vec<String> {
    let doc = match parse_model(content) {
        Ok(doc) => doc,
        Err(_) => return Vec::new(),
    };

    let mut found: IndexSet<String> = IndexSet::new();
    doc.root.visit(&mut |node| {
        if !node.has_attrs(&STYLE_LIST) {
            return;
        }
        node.visit(&mut |entry| {
            if !entry.has_attrs(&STATIC_VALUE) {
                return;
            }
            if let Some(value) = entry.attr("value") {
                if is_qml_path(value) {
                    found.insert(value.to_string());
                }
            }
        });
    });
    found.into_iter().collect()
}

/// Rewrite every QML style reference to point into `models_dir`, keeping
/// only the file name of the original path.
///
/// The returned text is the regenerated document; untouched attributes and
/// elements survive in their original order. Input that fails to parse is
/// returned unchanged: leaving a model file as-is always beats corrupting
/// it. Rewriting is idempotent for a fixed `models_dir`.
pub fn replace_qml_paths(content: &str, models_dir: &str) -> String {
    let mut doc = match parse_model(content) {
        Ok(doc) => doc,
        Err(_) => return content.to_string(),
    };

    doc.root.visit_mut(&mut |node| {
        if !node.has_attrs(&STYLE_LIST) {
            return;
        }
        node.visit_mut(&mut |entry| {
            if !entry.has_attrs(&STATIC_VALUE) {
                return;
            }
            let new_path = match entry.attr("value") {
                Some(value) if is_qml_path(value) => {
                    join_models_dir(models_dir, file_name_component(value))
                }
                _ => return,
            };
            entry.attributes.insert("value".to_string(), new_path);
        });
    });
    generate_model_xml(&doc)
}
