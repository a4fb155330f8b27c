use lgrfix_types::closure::ClosureEvent;

/// Ordered record of every mutation a closure run performed.
///
/// Callers own the log and pass it into [`crate::ClosureEngine::populate`];
/// the engine only appends.
#[derive(Debug, Clone, Default)]
pub struct AuditLog {
    events: Vec<ClosureEvent>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ClosureEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ClosureEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<ClosureEvent> {
        self.events
    }
}
