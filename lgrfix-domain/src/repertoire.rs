use crate::error::RepertoireError;
use crate::ports::RepertoireStore;
use lgrfix_types::CodePoint;
use lgrfix_types::repertoire::{
    CodePointEntry, RepertoireDocument, RepertoireMetadata, VariantEdge, VariantMeta,
};
use std::collections::HashMap;

/// In-memory repertoire.
///
/// Entries live in a `Vec` in insertion order and are addressed through a
/// code point index, so inserting while a caller holds a `code_points()`
/// snapshot never invalidates it.
#[derive(Debug, Clone, Default)]
pub struct Repertoire {
    metadata: RepertoireMetadata,
    entries: Vec<CodePointEntry>,
    index: HashMap<CodePoint, usize>,
}

impl Repertoire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a document, rejecting duplicate entries and duplicate edges.
    ///
    /// Edges pointing at code points without an entry are kept as-is.
    pub fn from_document(doc: RepertoireDocument) -> Result<Self, RepertoireError> {
        let mut rep = Self {
            metadata: doc.metadata,
            ..Self::default()
        };
        for entry in doc.entries {
            let CodePointEntry {
                cp,
                comment,
                tags,
                variants,
            } = entry;
            rep.add_code_point(cp.clone())?;
            for edge in variants {
                rep.add_variant(&cp, edge.cp, edge.meta)?;
            }
            let slot = rep.slot_mut(&cp)?;
            slot.comment = comment;
            slot.tags = tags;
        }
        Ok(rep)
    }

    pub fn to_document(&self) -> RepertoireDocument {
        let mut doc = RepertoireDocument::new(self.entries.clone());
        doc.metadata = self.metadata.clone();
        doc
    }

    pub fn into_document(self) -> RepertoireDocument {
        let mut doc = RepertoireDocument::new(self.entries);
        doc.metadata = self.metadata;
        doc
    }

    pub fn entries(&self) -> impl Iterator<Item = &CodePointEntry> {
        self.entries.iter()
    }

    pub fn metadata(&self) -> &RepertoireMetadata {
        &self.metadata
    }

    pub fn variant_count(&self) -> usize {
        self.entries.iter().map(|e| e.variants.len()).sum()
    }

    /// Convenience for fixtures and tests: insert `cp` if missing, then add
    /// the edges that are not already there.
    pub fn with_variants(mut self, cp: CodePoint, targets: &[CodePoint]) -> Self {
        if !self.contains(&cp) {
            self.push_entry(CodePointEntry::new(cp.clone()));
        }
        for target in targets {
            let _ = self.add_variant(&cp, target.clone(), VariantMeta::default());
        }
        self
    }

    fn push_entry(&mut self, entry: CodePointEntry) {
        self.index.insert(entry.cp.clone(), self.entries.len());
        self.entries.push(entry);
    }

    fn slot_mut(&mut self, cp: &CodePoint) -> Result<&mut CodePointEntry, RepertoireError> {
        match self.index.get(cp) {
            Some(&i) => Ok(&mut self.entries[i]),
            None => Err(RepertoireError::NotInRepertoire { cp: cp.clone() }),
        }
    }
}

impl RepertoireStore for Repertoire {
    fn code_points(&self) -> Vec<CodePoint> {
        self.entries.iter().map(|e| e.cp.clone()).collect()
    }

    fn get(&self, cp: &CodePoint) -> Result<&CodePointEntry, RepertoireError> {
        match self.index.get(cp) {
            Some(&i) => Ok(&self.entries[i]),
            None => Err(RepertoireError::NotInRepertoire { cp: cp.clone() }),
        }
    }

    fn add_code_point(&mut self, cp: CodePoint) -> Result<(), RepertoireError> {
        if self.index.contains_key(&cp) {
            return Err(RepertoireError::CodePointAlreadyExists { cp });
        }
        self.push_entry(CodePointEntry::new(cp));
        Ok(())
    }

    fn add_variant(
        &mut self,
        source: &CodePoint,
        target: CodePoint,
        meta: VariantMeta,
    ) -> Result<(), RepertoireError> {
        let entry = self.slot_mut(source)?;
        if entry.has_variant(&target) {
            return Err(RepertoireError::VariantAlreadyExists {
                cp: source.clone(),
                variant: target,
            });
        }
        entry.variants.push(VariantEdge::with_meta(target, meta));
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
