use crate::error::RepertoireError;
use lgrfix_types::CodePoint;
use lgrfix_types::repertoire::{CodePointEntry, VariantEdge, VariantMeta};

/// Mutable access to a repertoire of code points and their variant edges.
///
/// The closure engine and the relation checks only talk to this trait, so
/// they can run against the in-memory [`crate::Repertoire`] or any other
/// backing store.
pub trait RepertoireStore {
    /// Snapshot of all entry keys, in stable iteration order.
    fn code_points(&self) -> Vec<CodePoint>;

    fn get(&self, cp: &CodePoint) -> Result<&CodePointEntry, RepertoireError>;

    /// Insert an empty entry.
    fn add_code_point(&mut self, cp: CodePoint) -> Result<(), RepertoireError>;

    /// Insert the edge `source -> target`.
    ///
    /// Fails with `VariantAlreadyExists` if `source` already has an edge to
    /// `target` (whatever its metadata), and with `NotInRepertoire` if
    /// `source` has no entry. `target` is not required to exist.
    fn add_variant(
        &mut self,
        source: &CodePoint,
        target: CodePoint,
        meta: VariantMeta,
    ) -> Result<(), RepertoireError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, cp: &CodePoint) -> bool {
        self.get(cp).is_ok()
    }

    fn variants(&self, cp: &CodePoint) -> Result<&[VariantEdge], RepertoireError> {
        Ok(&self.get(cp)?.variants)
    }

    fn has_variant(&self, source: &CodePoint, target: &CodePoint) -> Result<bool, RepertoireError> {
        Ok(self.get(source)?.has_variant(target))
    }

    /// Targets of `cp`'s edges, copied out so the caller may mutate the store
    /// while walking them.
    fn variant_targets(&self, cp: &CodePoint) -> Result<Vec<CodePoint>, RepertoireError> {
        Ok(self.variants(cp)?.iter().map(|v| v.cp.clone()).collect())
    }
}
