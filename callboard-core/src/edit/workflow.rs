use super::{EditError, EditOutcome, EditSession, EditStep};
use crate::surface::ChartSurface;
use prefstore::PreferenceStore;
use std::sync::Arc;

/// Runs an [`EditSession`] against a store, blocking on each remote call.
#[derive(Clone)]
pub struct EditWorkflow {
    store: Arc<dyn PreferenceStore>,
}

impl EditWorkflow {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn PreferenceStore> {
        Arc::clone(&self.store)
    }

    /// Opens a session seeded from the surface's live slot.
    pub fn open(&self, surface: &ChartSurface) -> EditSession {
        EditSession::open(surface.slot().value, surface.slot_label())
    }

    pub fn submit_identity(&self, session: &mut EditSession) -> Result<EditStep, EditError> {
        let request = session.begin_lookup()?;
        let result = self.store.lookup(&request.email, &request.setting_key);
        session.resolve_lookup(result)
    }

    pub fn submit_value(&self, session: &mut EditSession) -> Result<EditOutcome, EditError> {
        let request = session.begin_save()?;
        let result = self.store.upsert(&request.record);
        session.complete_save(result)
    }

    /// Applies a finished outcome to the surface. Cancelled sessions change nothing.
    pub fn finish(
        &self,
        outcome: &EditOutcome,
        surface: &mut ChartSurface,
    ) -> Result<(), crate::surface::SurfaceError> {
        match outcome {
            EditOutcome::Saved { email, value, .. } => surface.report_edit(email, *value),
            EditOutcome::Cancelled => Ok(()),
        }
    }
}
