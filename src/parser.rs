//! Parse `.model3` XML text into the generic Option tree.

use crate::model::{ModelDoc, ModelNode};
use anyhow::{Context, Result};
use camino::Utf8Path;
use roxmltree::{Document, Node};

/// Trait for abstracting file I/O so model documents can come from the
/// filesystem or from in-memory test fixtures.
pub trait ContentSource {
    /// Read a file at the given logical path and return its content as a string.
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String>;
}

/// Reads files directly from the local filesystem.
pub struct FsSource;

impl ContentSource for FsSource {
    fn read_to_string(&mut self, path: &Utf8Path) -> Result<String> {
        Ok(std::fs::read_to_string(path.as_str())
            .with_context(|| format!("Failed to read {}", path))?)
    }
}

/// Parse model-definition text into a [`ModelDoc`].
///
/// Returns an error for malformed XML. The style operations in
/// [`crate::styles`] absorb that error and degrade gracefully; the CLI
/// surfaces it with the file path attached.
pub fn parse_model(text: &str) -> Result<ModelDoc> {
    let doc = Document::parse(text).context("Failed to parse model XML")?;
    let root = convert_element(doc.root_element());
    Ok(ModelDoc {
        root,
        xml_declaration: sniff_xml_declaration(text),
    })
}

/// Read and parse a `.model3` file through a [`ContentSource`].
pub fn load_model(
    path: impl AsRef<Utf8Path>,
    source: &mut impl ContentSource,
) -> Result<ModelDoc> {
    let path = path.as_ref();
    let text = source.read_to_string(path)?;
    parse_model(&text).with_context(|| format!("Failed to parse {}", path))
}

fn convert_element(node: Node) -> ModelNode {
    let mut out = ModelNode::new(node.tag_name().name());
    for attr in node.attributes() {
        out.attributes
            .insert(attr.name().to_string(), attr.value().to_string());
    }
    for child in node.children() {
        if child.is_element() {
            out.children.push(convert_element(child));
        } else if child.is_text() {
            // Indentation whitespace is regenerated by the serializer
            let t = child.text().unwrap_or("").trim();
            if !t.is_empty() {
                out.text = Some(t.to_string());
            }
        }
    }
    out
}

/// Capture the literal `<?xml … ?>` declaration from the start of the text,
/// if present, so the generator can reproduce it verbatim.
fn sniff_xml_declaration(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    if !trimmed.starts_with("<?xml") {
        return None;
    }
    trimmed.find("?>").map(|end| trimmed[..end + 2].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attributes_in_document_order() {
        let doc = parse_model(r#"<Option type="Map" name="outer"><Option name="inner"/></Option>"#)
            .expect("parse");
        let keys: Vec<&str> = doc.root.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["type", "name"]);
        assert_eq!(doc.root.children.len(), 1);
        assert_eq!(doc.root.children[0].attr("name"), Some("inner"));
    }

    #[test]
    fn captures_xml_declaration() {
        let doc = parse_model("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Model/>").expect("parse");
        assert_eq!(
            doc.xml_declaration.as_deref(),
            Some("<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
        );

        let bare = parse_model("<Model/>").expect("parse");
        assert_eq!(bare.xml_declaration, None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_model("not xml at all").is_err());
        assert!(parse_model("<Model><Option></Model>").is_err());
    }
}
