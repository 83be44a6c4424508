use serde::{Deserialize, Serialize};

use super::domain::{ApplicationDraft, ApplicationId, ApplicationPatch, JobApplication};
use super::validation::ValidationError;

/// Persistence collaborator backing the application store.
///
/// Implementations own durability; the store only caches what `fetch_all`
/// returns.
pub trait ApplicationGateway: Send + Sync {
    fn fetch_all(&self) -> Result<Vec<JobApplication>, GatewayError>;
    fn fetch(&self, id: &ApplicationId) -> Result<JobApplication, GatewayError>;
    fn create(&self, draft: ApplicationDraft) -> Result<JobApplication, GatewayError>;
    fn update(
        &self,
        id: &ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<JobApplication, GatewayError>;
    fn delete(&self, id: &ApplicationId) -> Result<(), GatewayError>;
}

/// Network or server failure talking to the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("transport failure (status {status}): {message}")]
pub struct TransportError {
    /// HTTP-like status code; `0` when no response was received.
    pub status: u16,
    pub message: String,
}

impl TransportError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }
}

/// Error enumeration for gateway failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("application {0} not found")]
    NotFound(ApplicationId),
}
