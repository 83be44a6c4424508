//! Job application records, their persistence collaborators, and the cached
//! store the funnel report reads from.

pub mod domain;
pub mod gateway;
pub mod http;
pub mod memory;
pub mod router;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, ApplicationId, ApplicationNote, ApplicationPatch, ApplicationStatus,
    JobApplication, StatusEvent,
};
pub use gateway::{ApplicationGateway, GatewayError, TransportError};
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
pub use router::application_router;
pub use store::{ApplicationStore, Snapshot};
pub use validation::ValidationError;
