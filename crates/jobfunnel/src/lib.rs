//! Job application tracking with a status-transition funnel report.
//!
//! - **tracker**: application records, persistence gateways, the cached
//!   [`ApplicationStore`](tracker::ApplicationStore) and its HTTP router
//! - **funnel**: classification of status histories into weighted stage edges
//! - **config** / **telemetry** / **error**: service plumbing shared with the API binary

pub mod config;
pub mod error;
pub mod funnel;
pub mod telemetry;
pub mod tracker;
