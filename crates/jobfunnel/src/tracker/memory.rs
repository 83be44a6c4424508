use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

use super::domain::{ApplicationDraft, ApplicationId, ApplicationPatch, JobApplication};
use super::gateway::{ApplicationGateway, GatewayError};
use super::validation::{validate_draft, validate_patch};

/// Process-local persistence used by the API server and the demo.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    records: Arc<Mutex<BTreeMap<ApplicationId, JobApplication>>>,
    sequence: Arc<AtomicU64>,
    today: Option<NaiveDate>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the date used for drafts without an applied date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("gateway mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn next_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ApplicationId(format!("app-{id:06}"))
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl ApplicationGateway for InMemoryGateway {
    fn fetch_all(&self) -> Result<Vec<JobApplication>, GatewayError> {
        let guard = self.records.lock().expect("gateway mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<JobApplication, GatewayError> {
        let guard = self.records.lock().expect("gateway mutex poisoned");
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.clone()))
    }

    fn create(&self, draft: ApplicationDraft) -> Result<JobApplication, GatewayError> {
        validate_draft(&draft)?;

        let application = draft.into_application(self.next_id(), self.today());
        let mut guard = self.records.lock().expect("gateway mutex poisoned");
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, GatewayError> {
        validate_patch(&patch)?;

        let mut guard = self.records.lock().expect("gateway mutex poisoned");
        let record = guard
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(id.clone()))?;
        patch.apply(record);
        Ok(record.clone())
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), GatewayError> {
        let mut guard = self.records.lock().expect("gateway mutex poisoned");
        match guard.remove(id) {
            Some(_) => Ok(()),
            None => Err(GatewayError::NotFound(id.clone())),
        }
    }
}
