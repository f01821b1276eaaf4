//! Tour date entity model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use marquee_core::tour::{TicketAction, TourStatus};
use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tour_dates` table.
///
/// `status` is kept as the stored text; use [`TourDate::status`] for the
/// typed value.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TourDate {
    pub id: DbId,
    pub venue_name: String,
    pub city: String,
    pub country: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub ticket_url: Option<String>,
    pub ticket_price: Option<String>,
    pub status: String,
    pub additional_info: Option<String>,
    pub is_visible: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TourDate {
    pub fn status(&self) -> TourStatus {
        TourStatus::from_db(Some(&self.status))
    }

    /// The ticket call-to-action for this show. Sold-out shows never get a
    /// purchase link.
    pub fn ticket_action(&self) -> TicketAction {
        self.status().ticket_action(self.ticket_url.as_deref())
    }
}

/// DTO for creating a tour date. `status` defaults to `available`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTourDate {
    pub venue_name: String,
    pub city: String,
    pub country: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: Option<NaiveTime>,
    pub ticket_url: Option<String>,
    pub ticket_price: Option<String>,
    pub status: Option<TourStatus>,
    pub additional_info: Option<String>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTourDate {
    pub venue_name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<NaiveTime>,
    pub ticket_url: Option<String>,
    pub ticket_price: Option<String>,
    pub status: Option<TourStatus>,
    pub additional_info: Option<String>,
    pub is_visible: Option<bool>,
    pub sort_order: Option<i32>,
}
