use std::collections::BTreeMap;

use serde::Serialize;

use crate::tracker::domain::JobApplication;

use super::classify::{FunnelPath, Segment};
use super::stage::FunnelStage;

/// Weighted directed edge between two funnel stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionEdge {
    pub from: FunnelStage,
    pub to: FunnelStage,
    pub count: u32,
}

/// Accumulates classified applications into transition edges.
#[derive(Debug, Default, Clone)]
pub struct TransitionAggregator {
    edges: BTreeMap<Segment, u32>,
    applications: usize,
    untracked: usize,
}

impl TransitionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_applications<'a, I>(applications: I) -> Self
    where
        I: IntoIterator<Item = &'a JobApplication>,
    {
        let mut aggregator = Self::new();
        for application in applications {
            aggregator.add(application);
        }
        aggregator
    }

    pub fn add(&mut self, application: &JobApplication) {
        self.applications += 1;

        let path = FunnelPath::classify(&application.status_history);
        if path == FunnelPath::Untracked {
            self.untracked += 1;
            return;
        }

        for segment in path.segments() {
            *self.edges.entry(segment).or_insert(0) += 1;
        }
    }

    pub fn applications(&self) -> usize {
        self.applications
    }

    /// Applications skipped because their history was empty.
    pub fn untracked(&self) -> usize {
        self.untracked
    }

    /// Edges ordered by descending count.
    ///
    /// Ties currently fall back to stage order; that ordering is not part of
    /// the contract.
    pub fn edges(&self) -> Vec<TransitionEdge> {
        let mut edges: Vec<TransitionEdge> = self
            .edges
            .iter()
            .map(|(&(from, to), &count)| TransitionEdge { from, to, count })
            .collect();
        edges.sort_by(|a, b| b.count.cmp(&a.count));
        edges
    }

    pub fn graph(&self) -> FunnelGraph {
        FunnelGraph::from_edges(self.edges(), self.applications)
    }
}

/// Node/link payload handed to the diagram renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelGraph {
    pub nodes: Vec<FunnelStage>,
    pub links: Vec<TransitionEdge>,
    pub total_applications: usize,
}

impl FunnelGraph {
    /// Nodes are exactly the endpoints of `links`, in first-seen order.
    pub fn from_edges(links: Vec<TransitionEdge>, total_applications: usize) -> Self {
        let mut nodes = Vec::new();
        for edge in &links {
            for stage in [edge.from, edge.to] {
                if !nodes.contains(&stage) {
                    nodes.push(stage);
                }
            }
        }

        Self {
            nodes,
            links,
            total_applications,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Sum of counts flowing into `stage`.
    pub fn inflow(&self, stage: FunnelStage) -> u32 {
        self.links
            .iter()
            .filter(|edge| edge.to == stage)
            .map(|edge| edge.count)
            .sum()
    }

    /// Sum of counts leaving `stage`.
    pub fn outflow(&self, stage: FunnelStage) -> u32 {
        self.links
            .iter()
            .filter(|edge| edge.from == stage)
            .map(|edge| edge.count)
            .sum()
    }
}

/// Aggregates `applications` and returns the sorted edge list.
pub fn transition_edges(applications: &[JobApplication]) -> Vec<TransitionEdge> {
    TransitionAggregator::from_applications(applications).edges()
}
