use super::RelationCheck;
use crate::ports::RepertoireStore;
use lgrfix_types::check::Violation;

/// For every `A -> B` and `B -> C` with `C != A`, `A -> C` exists.
///
/// Two-hop paths through a code point without an entry are ignored; that is
/// [`super::ExistenceCheck`]'s concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitivityCheck;

impl TransitivityCheck {
    pub const NAME: &'static str = "transitivity";
}

impl RelationCheck for TransitivityCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn violations(&self, rel: &dyn RepertoireStore) -> anyhow::Result<Vec<Violation>> {
        let mut out = Vec::new();
        for a in rel.code_points() {
            let entry = rel.get(&a)?;
            for b in &entry.variants {
                let Ok(b_entry) = rel.get(&b.cp) else {
                    continue;
                };
                for c in b_entry.variants.iter().filter(|c| c.cp != a) {
                    if !entry.has_variant(&c.cp) {
                        out.push(Violation::MissingShortcut {
                            source: a.clone(),
                            via: b.cp.clone(),
                            target: c.cp.clone(),
                        });
                    }
                }
            }
        }
        Ok(out)
    }

    fn check(&self, rel: &dyn RepertoireStore) -> anyhow::Result<bool> {
        for a in rel.code_points() {
            let entry = rel.get(&a)?;
            for b in &entry.variants {
                let Ok(b_entry) = rel.get(&b.cp) else {
                    continue;
                };
                if b_entry
                    .variants
                    .iter()
                    .any(|c| c.cp != a && !entry.has_variant(&c.cp))
                {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Repertoire;
    use lgrfix_types::CodePoint;

    fn cp(v: u32) -> CodePoint {
        CodePoint::single(v)
    }

    #[test]
    fn symmetric_pair_is_transitive() {
        // A -> B -> A must not demand the self-loop A -> A.
        let rep = Repertoire::new()
            .with_variants(cp(0x41), &[cp(0x42)])
            .with_variants(cp(0x42), &[cp(0x41)]);
        assert!(TransitivityCheck.check(&rep).unwrap());
    }

    #[test]
    fn reports_missing_shortcut() {
        let rep = Repertoire::new()
            .with_variants(cp(0x41), &[cp(0x42)])
            .with_variants(cp(0x42), &[cp(0x43)])
            .with_variants(cp(0x43), &[]);
        assert!(!TransitivityCheck.check(&rep).unwrap());
        assert_eq!(
            TransitivityCheck.violations(&rep).unwrap(),
            vec![Violation::MissingShortcut {
                source: cp(0x41),
                via: cp(0x42),
                target: cp(0x43),
            }]
        );
    }

    #[test]
    fn paths_through_missing_entries_are_ignored() {
        let rep = Repertoire::new().with_variants(cp(0x41), &[cp(0x42)]);
        assert!(TransitivityCheck.check(&rep).unwrap());
        assert!(TransitivityCheck.violations(&rep).unwrap().is_empty());
    }
}
