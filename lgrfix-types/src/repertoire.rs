use crate::codepoint::CodePoint;
use serde::{Deserialize, Serialize};

/// Opaque per-variant attributes.
///
/// lgrfix copies these through unchanged; edges created during closure carry
/// the default (empty) value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantMeta {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub variant_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_when: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

impl VariantMeta {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Directed edge `source -> cp`: `cp` is an acceptable variant of the owning entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEdge {
    pub cp: CodePoint,

    #[serde(flatten)]
    pub meta: VariantMeta,
}

impl VariantEdge {
    pub fn new(cp: CodePoint) -> Self {
        Self {
            cp,
            meta: VariantMeta::default(),
        }
    }

    pub fn with_meta(cp: CodePoint, meta: VariantMeta) -> Self {
        Self { cp, meta }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodePointEntry {
    pub cp: CodePoint,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantEdge>,
}

impl CodePointEntry {
    pub fn new(cp: CodePoint) -> Self {
        Self {
            cp,
            comment: None,
            tags: vec![],
            variants: vec![],
        }
    }

    pub fn has_variant(&self, target: &CodePoint) -> bool {
        self.variants.iter().any(|v| &v.cp == target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepertoireMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// On-disk repertoire (`lgrfix.repertoire.v1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepertoireDocument {
    pub schema: String,

    #[serde(default)]
    pub metadata: RepertoireMetadata,

    #[serde(default)]
    pub entries: Vec<CodePointEntry>,
}

impl RepertoireDocument {
    pub fn new(entries: Vec<CodePointEntry>) -> Self {
        Self {
            schema: crate::schema::LGRFIX_REPERTOIRE_V1.to_string(),
            metadata: RepertoireMetadata::default(),
            entries,
        }
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }
}
