//! Repository for the `tour_dates` table.

use marquee_core::tour::TourStatus;
use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::tour_date::{CreateTourDate, TourDate, UpdateTourDate};

const COLUMNS: &str = "id, venue_name, city, country, event_date, event_time, ticket_url, \
                       ticket_price, status, additional_info, is_visible, sort_order, \
                       created_at, updated_at";

pub struct TourDateRepo;

impl TourDateRepo {
    /// Visible tour dates in calendar order.
    pub async fn list_visible(pool: &PgPool) -> Result<Vec<TourDate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tour_dates WHERE is_visible = true
             ORDER BY event_date ASC, event_time ASC NULLS LAST, sort_order ASC"
        );
        sqlx::query_as::<_, TourDate>(&query).fetch_all(pool).await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<TourDate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tour_dates
             ORDER BY event_date ASC, event_time ASC NULLS LAST, sort_order ASC"
        );
        sqlx::query_as::<_, TourDate>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TourDate>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tour_dates WHERE id = $1");
        sqlx::query_as::<_, TourDate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateTourDate) -> Result<TourDate, sqlx::Error> {
        let query = format!(
            "INSERT INTO tour_dates
                (venue_name, city, country, event_date, event_time, ticket_url,
                 ticket_price, status, additional_info, is_visible, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'available'), $9,
                     COALESCE($10, true), COALESCE($11, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TourDate>(&query)
            .bind(&input.venue_name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.event_date)
            .bind(input.event_time)
            .bind(&input.ticket_url)
            .bind(&input.ticket_price)
            .bind(input.status.map(TourStatus::as_str))
            .bind(&input.additional_info)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTourDate,
    ) -> Result<Option<TourDate>, sqlx::Error> {
        let query = format!(
            "UPDATE tour_dates SET
                venue_name = COALESCE($2, venue_name),
                city = COALESCE($3, city),
                country = COALESCE($4, country),
                event_date = COALESCE($5, event_date),
                event_time = COALESCE($6, event_time),
                ticket_url = COALESCE($7, ticket_url),
                ticket_price = COALESCE($8, ticket_price),
                status = COALESCE($9, status),
                additional_info = COALESCE($10, additional_info),
                is_visible = COALESCE($11, is_visible),
                sort_order = COALESCE($12, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TourDate>(&query)
            .bind(id)
            .bind(&input.venue_name)
            .bind(&input.city)
            .bind(&input.country)
            .bind(input.event_date)
            .bind(input.event_time)
            .bind(&input.ticket_url)
            .bind(&input.ticket_price)
            .bind(input.status.map(TourStatus::as_str))
            .bind(&input.additional_info)
            .bind(input.is_visible)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tour_dates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
