use super::RelationCheck;
use crate::ports::RepertoireStore;
use lgrfix_types::check::Violation;

/// Every variant target has its own entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExistenceCheck;

impl ExistenceCheck {
    pub const NAME: &'static str = "existence";
}

impl RelationCheck for ExistenceCheck {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn violations(&self, rel: &dyn RepertoireStore) -> anyhow::Result<Vec<Violation>> {
        let mut out = Vec::new();
        for a in rel.code_points() {
            for edge in rel.variants(&a)? {
                if !rel.contains(&edge.cp) {
                    out.push(Violation::MissingEntry {
                        source: a.clone(),
                        target: edge.cp.clone(),
                    });
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Repertoire;
    use lgrfix_types::CodePoint;

    #[test]
    fn reports_each_dangling_edge() {
        let a = CodePoint::single(0x41);
        let rep = Repertoire::new()
            .with_variants(a.clone(), &[CodePoint::single(0x430), CodePoint::single(0x391)])
            .with_variants(CodePoint::single(0x391), &[]);

        assert!(!ExistenceCheck.check(&rep).unwrap());
        assert_eq!(
            ExistenceCheck.violations(&rep).unwrap(),
            vec![Violation::MissingEntry {
                source: a,
                target: CodePoint::single(0x430),
            }]
        );
    }
}
