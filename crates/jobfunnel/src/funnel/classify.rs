use std::collections::BTreeSet;

use crate::tracker::domain::{ApplicationStatus, StatusEvent};

use super::stage::FunnelStage;

/// One directed hop between funnel stages.
pub type Segment = (FunnelStage, FunnelStage);

/// Funnel route an application's history resolves to.
///
/// Only the set of statuses present matters, plus whether the history holds
/// a single event. Event order and duplicates are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunnelPath {
    /// No events recorded; contributes nothing.
    Untracked,
    /// Exactly one event, so the employer never answered.
    NoResponse,
    /// A rejection anywhere in the history ends the path.
    Rejected,
    /// Everything else flows toward the interview stage.
    ///
    /// The interview hop is always followed by an offer/no-offer hop, even
    /// when `interviewed` is false.
    Advanced {
        responded: bool,
        interviewed: bool,
        offered: bool,
    },
}

impl FunnelPath {
    pub fn classify(history: &[StatusEvent]) -> Self {
        match history {
            [] => return Self::Untracked,
            [_] => return Self::NoResponse,
            _ => {}
        }

        let seen: BTreeSet<ApplicationStatus> = history.iter().map(|event| event.status).collect();

        if seen.contains(&ApplicationStatus::Rejected) {
            return Self::Rejected;
        }

        Self::Advanced {
            responded: seen.iter().any(|status| status.is_response_signal()),
            interviewed: seen.iter().any(|status| status.is_interview_signal()),
            offered: seen.contains(&ApplicationStatus::Offer),
        }
    }

    pub fn segments(self) -> Vec<Segment> {
        use FunnelStage::*;

        match self {
            Self::Untracked => Vec::new(),
            Self::NoResponse => vec![(Applied, NoResponse)],
            Self::Rejected => vec![(Applied, Responded), (Responded, Rejected)],
            Self::Advanced {
                responded,
                interviewed,
                offered,
            } => {
                let mut segments = Vec::with_capacity(3);
                if responded {
                    segments.push((Applied, Responded));
                }
                if interviewed {
                    segments.push((Responded, Interview));
                }
                segments.push((Interview, if offered { Offer } else { NoOffer }));
                segments
            }
        }
    }
}
