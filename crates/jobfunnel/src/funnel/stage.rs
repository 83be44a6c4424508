use std::fmt;

use serde::{Serialize, Serializer};

/// Node of the funnel graph.
///
/// `Responded` and `NoResponse` never appear on stored applications; the
/// aggregator introduces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunnelStage {
    Applied,
    Responded,
    Interview,
    Offer,
    Rejected,
    NoResponse,
    NoOffer,
}

impl FunnelStage {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Applied,
            Self::Responded,
            Self::Interview,
            Self::Offer,
            Self::Rejected,
            Self::NoResponse,
            Self::NoOffer,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "APPLIED",
            Self::Responded => "RESPONDED",
            Self::Interview => "INTERVIEW",
            Self::Offer => "OFFER",
            Self::Rejected => "REJECTED",
            Self::NoResponse => "NO RESPONSE",
            Self::NoOffer => "NOOFFER",
        }
    }

    /// Sentence-case name for human-facing output, e.g. `No response`.
    pub fn display_name(self) -> String {
        let label = self.label();
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|stage| stage.label() == label)
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for FunnelStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
