use std::fmt;
use std::sync::Arc;

use crate::PointCloud;

/// The kind of change a cloud just went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    SetPoints,
    AppendPoints,
    Colors,
    Filter,
    Sort,
    Ingest,
    Partial,
    Clear,
}

/// Callback run after a successful state change, with the cloud in its new
/// state.
pub type MutationHook = Arc<dyn Fn(Mutation, &PointCloud) + Send + Sync>;

#[derive(Clone, Default)]
pub(crate) struct Hooks(Vec<MutationHook>);

impl Hooks {
    pub(crate) fn push(&mut self, hook: MutationHook) {
        self.0.push(hook);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn dispatch(&self, mutation: Mutation, cloud: &PointCloud) {
        if self.0.is_empty() {
            return;
        }
        tracing::trace!(?mutation, hooks = self.0.len(), points = cloud.len(), "dispatching mutation hooks");
        for hook in &self.0 {
            hook(mutation, cloud);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hooks({})", self.0.len())
    }
}
