//! Status-transition aggregation for the application funnel.
//!
//! Each application's history is classified into a [`FunnelPath`], expanded
//! into stage-to-stage segments, and folded into weighted
//! [`TransitionEdge`]s keyed by `(from, to)`.

mod aggregate;
mod classify;
pub mod export;
mod stage;


pub use aggregate::{transition_edges, FunnelGraph, TransitionAggregator, TransitionEdge};
pub use classify::{FunnelPath, Segment};
pub use stage::FunnelStage;
