use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::tracker::domain::{
    ApplicationDraft, ApplicationId, ApplicationPatch, ApplicationStatus, JobApplication,
};
use crate::tracker::gateway::{ApplicationGateway, GatewayError, TransportError};
use crate::tracker::memory::InMemoryGateway;
use crate::tracker::store::ApplicationStore;
use crate::tracker::validation::ValidationError;

pub(super) fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, day).expect("valid date")
}

pub(super) fn draft(company: &str) -> ApplicationDraft {
    ApplicationDraft {
        company: company.to_string(),
        role: "Backend Engineer".to_string(),
        salary: "$150k".to_string(),
        applied_date: Some(date(1)),
        ..ApplicationDraft::default()
    }
}

pub(super) fn interviewed_draft(company: &str) -> ApplicationDraft {
    draft(company)
        .with_status(date(1), ApplicationStatus::Applied)
        .with_status(date(8), ApplicationStatus::Screen)
        .with_status(date(15), ApplicationStatus::Interview)
}

pub(super) fn memory_gateway() -> InMemoryGateway {
    InMemoryGateway::new().with_today(date(1))
}

pub(super) fn build_store() -> (Arc<ApplicationStore<InMemoryGateway>>, InMemoryGateway) {
    let gateway = memory_gateway();
    let store = Arc::new(ApplicationStore::new(Arc::new(gateway.clone())));
    (store, gateway)
}

/// Wraps the in-memory gateway with a switch that makes every call fail.
#[derive(Default)]
pub(super) struct SwitchableGateway {
    pub(super) inner: InMemoryGateway,
    offline: AtomicBool,
    reads_offline: AtomicBool,
    reads_rejected: AtomicBool,
}

impl SwitchableGateway {
    pub(super) fn new() -> Self {
        Self {
            inner: memory_gateway(),
            ..Self::default()
        }
    }

    pub(super) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Only `fetch_all` fails; mutations still reach the backing store.
    pub(super) fn set_reads_offline(&self, offline: bool) {
        self.reads_offline.store(offline, Ordering::SeqCst);
    }

    /// `fetch_all` answers with a validation rejection instead of data.
    pub(super) fn set_reads_rejected(&self, rejected: bool) {
        self.reads_rejected.store(rejected, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), GatewayError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::new(503, "backend offline").into());
        }
        Ok(())
    }
}

impl ApplicationGateway for SwitchableGateway {
    fn fetch_all(&self) -> Result<Vec<JobApplication>, GatewayError> {
        self.check()?;
        if self.reads_offline.load(Ordering::SeqCst) {
            return Err(TransportError::new(504, "list timed out").into());
        }
        if self.reads_rejected.load(Ordering::SeqCst) {
            return Err(ValidationError::Rejected("list query rejected".to_string()).into());
        }
        self.inner.fetch_all()
    }

    fn fetch(&self, id: &ApplicationId) -> Result<JobApplication, GatewayError> {
        self.check()?;
        self.inner.fetch(id)
    }

    fn create(&self, draft: ApplicationDraft) -> Result<JobApplication, GatewayError> {
        self.check()?;
        self.inner.create(draft)
    }

    fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, GatewayError> {
        self.check()?;
        self.inner.update(id, patch)
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), GatewayError> {
        self.check()?;
        self.inner.delete(id)
    }
}

pub(super) fn switchable_store() -> (
    Arc<ApplicationStore<SwitchableGateway>>,
    Arc<SwitchableGateway>,
) {
    let gateway = Arc::new(SwitchableGateway::new());
    let store = Arc::new(ApplicationStore::new(gateway.clone()));
    (store, gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
