use super::RelationCheck;
use crate::ports::RepertoireStore;
use lgrfix_types::check::Violation;

/// Every edge `A -> B` has a mirror `B -> A`.
///
/// An edge whose target has no entry cannot be mirrored and is reported too.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymmetryCheck;

impl SymmetryCheck {
    pub const NAME: &'static str = "symmetry";
}

impl RelationCheck for SymmetryCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn violations(&self, rel: &dyn RepertoireStore) -> anyhow::Result<Vec<Violation>> {
        let mut out = Vec::new();
        for a in rel.code_points() {
            for edge in rel.variants(&a)? {
                let mirrored = match rel.get(&edge.cp) {
                    Ok(b) => b.has_variant(&a),
                    Err(_) => false,
                };
                if !mirrored {
                    out.push(Violation::MissingMirror {
                        source: a.clone(),
                        target: edge.cp.clone(),
                    });
                }
            }
        }
        Ok(out)
    }

    fn check(&self, rel: &dyn RepertoireStore) -> anyhow::Result<bool> {
        for a in rel.code_points() {
            for edge in rel.variants(&a)? {
                match rel.get(&edge.cp) {
                    Ok(b) if b.has_variant(&a) => {}
                    _ => return Ok(false),
                }
            }
        }
        Ok(true)
    }
}
