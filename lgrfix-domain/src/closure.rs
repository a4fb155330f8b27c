//! Symmetric/transitive closure of a variant relation.
//!
//! Two phases:
//! 1. Existence repair: every variant target without an entry gets one,
//!    seeded with the back-edge to the entry that referenced it.
//! 2. Fixed-point loop: symmetry pass then transitivity pass, repeated until
//!    both injected checks pass.
//!
//! Entries and edges are only ever added. Edges created here carry empty
//! metadata; existing edges are never touched.

use crate::audit::AuditLog;
use crate::checks::{RelationCheck, SymmetryCheck, TransitivityCheck};
use crate::error::{ClosureError, RepertoireError};
use crate::ports::RepertoireStore;
use lgrfix_types::CodePoint;
use lgrfix_types::closure::{AddReason, ClosureEvent, ClosureStrategy, ClosureSummary};
use lgrfix_types::repertoire::VariantMeta;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ClosureConfig {
    pub strategy: ClosureStrategy,

    /// Abort with [`ClosureError::IterationLimit`] after this many loop
    /// iterations. `None` runs until the checks pass.
    pub max_iterations: Option<u64>,
}

pub struct ClosureEngine {
    symmetry: Box<dyn RelationCheck>,
    transitivity: Box<dyn RelationCheck>,
    config: ClosureConfig,
}

impl Default for ClosureEngine {
    fn default() -> Self {
        Self::new(ClosureConfig::default())
    }
}

impl ClosureEngine {
    pub fn new(config: ClosureConfig) -> Self {
        Self {
            symmetry: Box::new(SymmetryCheck),
            transitivity: Box::new(TransitivityCheck),
            config,
        }
    }

    pub fn with_checks(
        symmetry: Box<dyn RelationCheck>,
        transitivity: Box<dyn RelationCheck>,
        config: ClosureConfig,
    ) -> Self {
        Self {
            symmetry,
            transitivity,
            config,
        }
    }

    pub fn config(&self) -> &ClosureConfig {
        &self.config
    }

    /// Close `rep` under existence, symmetry and transitivity.
    ///
    /// Every mutation is appended to `audit`. On error the repertoire keeps
    /// everything added so far.
    pub fn populate(
        &self,
        rep: &mut dyn RepertoireStore,
        audit: &mut AuditLog,
    ) -> Result<ClosureSummary, ClosureError> {
        info!(
            "closing variant relation over {} code points ({})",
            rep.len(),
            self.config.strategy.as_str()
        );

        let mut rec = Recorder::new(audit);
        repair_existence(rep, &mut rec)?;

        let worklist = self.config.strategy == ClosureStrategy::Worklist;
        let mut next = Scope::All;
        let mut iterations = 0u64;

        while !self.is_closed(&*rep)? {
            if let Some(limit) = self.config.max_iterations
                && iterations >= limit
            {
                return Err(ClosureError::IterationLimit { limit });
            }
            iterations += 1;

            let scope = if worklist {
                std::mem::replace(&mut next, Scope::All).or_all()
            } else {
                Scope::All
            };
            rec.touched.clear();

            let targets = scope.resolve(&*rep);
            symmetry_pass(rep, &targets, &mut rec)?;

            let scope = if worklist {
                scope.union(expand(&*rep, rec.take_touched()))
            } else {
                scope
            };
            let targets = scope.resolve(&*rep);
            transitivity_pass(rep, &targets, &mut rec)?;

            if worklist {
                next = Scope::Only(expand(&*rep, rec.take_touched()));
            }
            debug!(
                "iteration {} done: {} variants added so far",
                iterations, rec.summary.variants_added
            );
        }

        let mut summary = rec.summary;
        summary.iterations = iterations;
        info!(
            "variant relation closed: {} code points and {} variants added in {} iterations",
            summary.code_points_added, summary.variants_added, summary.iterations
        );
        Ok(summary)
    }

    fn is_closed(&self, rep: &dyn RepertoireStore) -> Result<bool, ClosureError> {
        for check in [&self.symmetry, &self.transitivity] {
            let passed = check.check(rep).map_err(|source| ClosureError::Check {
                check: check.name(),
                source,
            })?;
            if !passed {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Close `rep` with the built-in checks and the default configuration.
pub fn populate(
    rep: &mut dyn RepertoireStore,
    audit: &mut AuditLog,
) -> Result<ClosureSummary, ClosureError> {
    ClosureEngine::default().populate(rep, audit)
}

/// Appends events, keeps the running summary, and remembers which edges
/// were added since the last [`Recorder::take_touched`].
struct Recorder<'a> {
    audit: &'a mut AuditLog,
    summary: ClosureSummary,
    touched: Vec<(CodePoint, CodePoint)>,
}

impl<'a> Recorder<'a> {
    fn new(audit: &'a mut AuditLog) -> Self {
        Self {
            audit,
            summary: ClosureSummary::default(),
            touched: Vec::new(),
        }
    }

    fn record(&mut self, event: ClosureEvent) {
        self.summary.record(&event);
        self.audit.record(event);
    }

    fn take_touched(&mut self) -> Vec<(CodePoint, CodePoint)> {
        std::mem::take(&mut self.touched)
    }

    fn add_code_point(
        &mut self,
        rep: &mut dyn RepertoireStore,
        cp: CodePoint,
        variant_of: &CodePoint,
    ) -> Result<(), ClosureError> {
        rep.add_code_point(cp.clone())?;
        debug!(
            "add missing code point {} as it is a variant of {}",
            cp, variant_of
        );
        self.record(ClosureEvent::AddCodePoint {
            cp,
            variant_of: variant_of.clone(),
        });
        Ok(())
    }

    fn add_variant(
        &mut self,
        rep: &mut dyn RepertoireStore,
        source: &CodePoint,
        target: &CodePoint,
        reason: AddReason,
    ) -> Result<(), ClosureError> {
        match rep.add_variant(source, target.clone(), VariantMeta::default()) {
            Ok(()) => {}
            Err(RepertoireError::VariantAlreadyExists { .. }) => {
                debug!("variant {} of {} already present", target, source);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
        debug!("add {} as variant of {} ({:?})", target, source, reason);
        self.touched.push((source.clone(), target.clone()));
        self.record(ClosureEvent::AddVariant {
            source: source.clone(),
            target: target.clone(),
            reason,
        });
        Ok(())
    }
}

/// Single pass over the entries present at phase start.
fn repair_existence(rep: &mut dyn RepertoireStore, rec: &mut Recorder) -> Result<(), ClosureError> {
    let mut created: HashSet<CodePoint> = HashSet::new();

    for a in rep.code_points() {
        for b in rep.variant_targets(&a)? {
            match rep.get(&b) {
                Ok(_) => continue,
                Err(RepertoireError::NotInRepertoire { .. }) => {}
                Err(e) => return Err(e.into()),
            }
            if created.insert(b.clone()) {
                rec.add_code_point(rep, b.clone(), &a)?;
            }
            rec.add_variant(rep, &b, &a, AddReason::Existence)?;
        }
    }
    Ok(())
}

/// For every `a -> b` in scope, ensure `b -> a`.
fn symmetry_pass(
    rep: &mut dyn RepertoireStore,
    scope: &[CodePoint],
    rec: &mut Recorder,
) -> Result<(), ClosureError> {
    for a in scope {
        for b in rep.variant_targets(a)? {
            if !rep.has_variant(&b, a)? {
                rec.add_variant(rep, &b, a, AddReason::Symmetry)?;
            }
        }
    }
    Ok(())
}

/// For every `a -> b -> c` in scope with `c != a`, ensure `a -> c`.
fn transitivity_pass(
    rep: &mut dyn RepertoireStore,
    scope: &[CodePoint],
    rec: &mut Recorder,
) -> Result<(), ClosureError> {
    for a in scope {
        for b in rep.variant_targets(a)? {
            for c in rep.variant_targets(&b)? {
                if &c == a || rep.has_variant(a, &c)? {
                    continue;
                }
                rec.add_variant(rep, a, &c, AddReason::Transitivity { via: b.clone() })?;
            }
        }
    }
    Ok(())
}

/// Code points whose violations may have changed because of `touched` edges:
/// both endpoints and their current neighbours.
fn expand(rep: &dyn RepertoireStore, touched: Vec<(CodePoint, CodePoint)>) -> HashSet<CodePoint> {
    let mut out = HashSet::new();
    for (source, target) in touched {
        for cp in [source, target] {
            if let Ok(entry) = rep.get(&cp) {
                out.extend(entry.variants.iter().map(|v| v.cp.clone()));
            }
            out.insert(cp);
        }
    }
    out
}

enum Scope {
    All,
    Only(HashSet<CodePoint>),
}

impl Scope {
    /// An empty worklist while the relation is still open means the
    /// tracking missed something; fall back to a full re-scan.
    fn or_all(self) -> Self {
        match self {
            Scope::Only(set) if set.is_empty() => Scope::All,
            other => other,
        }
    }

    fn union(self, more: HashSet<CodePoint>) -> Self {
        match self {
            Scope::All => Scope::All,
            Scope::Only(mut set) => {
                set.extend(more);
                Scope::Only(set)
            }
        }
    }

    /// Code points in scope, in store order.
    fn resolve(&self, rep: &dyn RepertoireStore) -> Vec<CodePoint> {
        let all = rep.code_points();
        match self {
            Scope::All => all,
            Scope::Only(set) => all.into_iter().filter(|cp| set.contains(cp)).collect(),
        }
    }
}
