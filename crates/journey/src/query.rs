use serde::{Deserialize, Serialize};

use flowpath_core::label::PURCHASE_LABEL;

/// Which participants a journey query covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantFilter {
    All,
    One(String),
}

impl ParticipantFilter {
    /// Parse the selector value ("All" is case-insensitive).
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("all") {
            ParticipantFilter::All
        } else {
            ParticipantFilter::One(raw.to_owned())
        }
    }

    pub fn matches(&self, participant_id: &str) -> bool {
        match self {
            ParticipantFilter::All => true,
            ParticipantFilter::One(id) => id == participant_id,
        }
    }
}

/// Outcome class of a journey, decided by its final label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyKind {
    Purchase,
    NonPurchase,
}

impl JourneyKind {
    /// Parse a selector value; `None` for anything unknown.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "purchase" => Some(JourneyKind::Purchase),
            "non-purchase" | "non_purchase" => Some(JourneyKind::NonPurchase),
            _ => None,
        }
    }

    /// Whether a journey ending in `label` belongs to this class.
    pub fn matches_final(self, label: &str) -> bool {
        match self {
            JourneyKind::Purchase => label == PURCHASE_LABEL,
            JourneyKind::NonPurchase => label != PURCHASE_LABEL,
        }
    }
}

impl Default for JourneyKind {
    fn default() -> Self {
        JourneyKind::Purchase
    }
}

impl std::fmt::Display for JourneyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JourneyKind::Purchase => write!(f, "purchase"),
            JourneyKind::NonPurchase => write!(f, "non-purchase"),
        }
    }
}

/// A full filter selection: app, participant, and outcome class.
#[derive(Debug, Clone)]
pub struct JourneyQuery {
    pub app_id: String,
    pub participant: ParticipantFilter,
    pub kind: JourneyKind,
}
