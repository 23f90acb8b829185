use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// ModelNode
// ────────────────────────────────────────────────────────────────────────────

/// A single element of a `.model3` document.
///
/// QGIS processing models are built almost entirely from generic `<Option>`
/// elements distinguished by their attribute values rather than by element
/// names, so one recursive node type covers the whole format.
///
/// `attributes` preserves the insertion order of attributes from the XML,
/// which is essential for round-trip regeneration of model files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelNode {
    /// Element tag name (usually `"Option"`).
    pub tag: String,
    /// Ordered map of attribute name → attribute value.
    pub attributes: IndexMap<String, String>,
    /// Non-whitespace text content, if any. `.model3` elements carry their
    /// data in attributes, so this is almost always `None`.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// True if every `(name, value)` pair is present on this node.
    ///
    /// Matching is attribute-set based: the order in which attributes were
    /// written in the source document is irrelevant.
    pub fn has_attrs(&self, pairs: &[(&str, &str)]) -> bool {
        pairs.iter().all(|(name, value)| self.attr(name) == Some(*value))
    }

    /// Depth-first traversal of this node and all of its descendants.
    pub fn visit(&self, f: &mut impl FnMut(&ModelNode)) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Depth-first mutable traversal of this node and all of its descendants.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut ModelNode)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ModelDoc
// ────────────────────────────────────────────────────────────────────────────

/// A parsed model document: the root element plus the raw XML declaration
/// captured from the source text, so regenerated output starts with the
/// same declaration the input had.
///
/// A `<!DOCTYPE …>` prolog is not captured and will not appear in
/// regenerated output. `.model3` files in practice carry only the XML
/// declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDoc {
    pub root: ModelNode,
    /// Literal `<?xml … ?>` declaration from the source, if present.
    #[serde(default)]
    pub xml_declaration: Option<String>,
}
