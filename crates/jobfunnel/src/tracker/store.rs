use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info, warn};

use crate::funnel::{FunnelGraph, TransitionAggregator, TransitionEdge};

use super::domain::{ApplicationDraft, ApplicationId, ApplicationPatch, JobApplication};
use super::gateway::{ApplicationGateway, GatewayError};

/// Read-only view of the cached collection.
pub type Snapshot = Arc<[JobApplication]>;

/// Cache of the application collection kept in step with the gateway.
///
/// Loads swap the snapshot `Arc` wholesale, so readers see either the old
/// or the new collection. When loads race, the last one to finish wins.
pub struct ApplicationStore<G> {
    gateway: Arc<G>,
    snapshot: RwLock<Snapshot>,
    last_error: Mutex<Option<GatewayError>>,
}

impl<G> ApplicationStore<G>
where
    G: ApplicationGateway + 'static,
{
    /// Creates an empty store; call [`load`](Self::load) to populate it.
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            snapshot: RwLock::new(Arc::from(Vec::new())),
            last_error: Mutex::new(None),
        }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    /// Current collection. Callers get a shared, immutable handle.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
            .read()
            .expect("snapshot lock poisoned")
            .clone()
    }

    /// Failure from the most recent load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<GatewayError> {
        self.last_error
            .lock()
            .expect("error flag mutex poisoned")
            .clone()
    }

    /// Replaces the cached collection with the gateway's current contents.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn load(&self) -> Result<Snapshot, GatewayError> {
        match self.gateway.fetch_all() {
            Ok(applications) => {
                let fresh: Snapshot = Arc::from(applications);
                *self.snapshot.write().expect("snapshot lock poisoned") = fresh.clone();
                *self.last_error.lock().expect("error flag mutex poisoned") = None;
                debug!(applications = fresh.len(), "application store loaded");
                Ok(fresh)
            }
            Err(err) => {
                *self.last_error.lock().expect("error flag mutex poisoned") = Some(err.clone());
                warn!(error = %err, "application store load failed; keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Reloads after a confirmed mutation. Failures are recorded on the
    /// error flag rather than returned.
    pub fn invalidate(&self) {
        if let Err(err) = self.load() {
            warn!(error = %err, "reload after mutation failed; snapshot may be stale");
        }
    }

    pub fn get(&self, id: &ApplicationId) -> Result<JobApplication, GatewayError> {
        self.gateway.fetch(id)
    }

    pub fn create(&self, draft: ApplicationDraft) -> Result<JobApplication, GatewayError> {
        let created = self.gateway.create(draft)?;
        info!(application_id = %created.id, company = %created.company, "application created");
        self.invalidate();
        Ok(created)
    }

    pub fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, GatewayError> {
        let updated = self.gateway.update(id, patch)?;
        info!(application_id = %updated.id, "application updated");
        self.invalidate();
        Ok(updated)
    }

    pub fn delete(&self, id: &ApplicationId) -> Result<(), GatewayError> {
        self.gateway.delete(id)?;
        info!(application_id = %id, "application deleted");
        self.invalidate();
        Ok(())
    }

    /// Transition edges recomputed from the current snapshot.
    pub fn edges(&self) -> Vec<TransitionEdge> {
        TransitionAggregator::from_applications(self.snapshot().iter()).edges()
    }

    pub fn funnel(&self) -> FunnelGraph {
        TransitionAggregator::from_applications(self.snapshot().iter()).graph()
    }
}
