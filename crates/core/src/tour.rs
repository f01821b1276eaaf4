//! Tour date status and the ticket call-to-action it allows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Booking status of a tour date, stored as text in `tour_dates.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStatus {
    #[default]
    Available,
    SoldOut,
    Cancelled,
    Postponed,
    FewLeft,
}

/// What the tour section offers next to a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum TicketAction {
    /// Link out to the ticket seller.
    Buy(String),
    /// Sold out: offer a "notify me" button instead of a purchase link.
    NotifyMe,
    /// No button at all (cancelled, postponed, or no ticket URL yet).
    Hidden,
}

impl TourStatus {
    pub const ALL: [TourStatus; 5] = [
        TourStatus::Available,
        TourStatus::SoldOut,
        TourStatus::Cancelled,
        TourStatus::Postponed,
        TourStatus::FewLeft,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TourStatus::Available => "available",
            TourStatus::SoldOut => "sold_out",
            TourStatus::Cancelled => "cancelled",
            TourStatus::Postponed => "postponed",
            TourStatus::FewLeft => "few_left",
        }
    }

    /// Human label used by the tour section badge.
    pub fn label(self) -> &'static str {
        match self {
            TourStatus::Available => "Available",
            TourStatus::SoldOut => "Sold Out",
            TourStatus::Cancelled => "Cancelled",
            TourStatus::Postponed => "Postponed",
            TourStatus::FewLeft => "Few Left",
        }
    }

    /// Read a stored status. The column is nullable free text, so missing or
    /// unrecognised values fall back to `Available`.
    pub fn from_db(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Whether a purchase link may be shown for this status.
    pub fn offers_tickets(self) -> bool {
        matches!(self, TourStatus::Available | TourStatus::FewLeft)
    }

    /// Decide the call-to-action for a show with this status.
    pub fn ticket_action(self, ticket_url: Option<&str>) -> TicketAction {
        match self {
            TourStatus::SoldOut => TicketAction::NotifyMe,
            s if s.offers_tickets() => match ticket_url.map(str::trim).filter(|u| !u.is_empty()) {
                Some(url) => TicketAction::Buy(url.to_string()),
                None => TicketAction::Hidden,
            },
            _ => TicketAction::Hidden,
        }
    }
}

impl fmt::Display for TourStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        TourStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Unknown tour status '{s}'"))
    }
}
