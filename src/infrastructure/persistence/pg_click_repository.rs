//! PostgreSQL implementation of the click event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{ClickEvent, DeviceClass, DeviceCount, NewClickEvent};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    ip: String,
    device: String,
    os: String,
    browser: String,
    referrer: Option<String>,
    user_agent: Option<String>,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    continent: Option<String>,
    clicked_at: DateTime<Utc>,
}

fn parse_device(id: i64, device: &str) -> Result<DeviceClass, AppError> {
    device.parse().map_err(|reason: String| {
        AppError::internal("Corrupt click row", json!({ "id": id, "reason": reason }))
    })
}

impl TryFrom<ClickRow> for ClickEvent {
    type Error = AppError;

    fn try_from(row: ClickRow) -> Result<Self, Self::Error> {
        Ok(ClickEvent {
            device: parse_device(row.id, &row.device)?,
            id: row.id,
            link_id: row.link_id,
            ip: row.ip,
            os: row.os,
            browser: row.browser,
            referrer: row.referrer,
            user_agent: row.user_agent,
            country: row.country,
            region: row.region,
            city: row.city,
            continent: row.continent,
            clicked_at: row.clicked_at,
        })
    }
}

/// PostgreSQL repository for click events.
///
/// Only ever inserts; rows disappear solely through the cascade when their
/// link is deleted.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn insert(&self, new_click: NewClickEvent) -> Result<ClickEvent, AppError> {
        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO click_events (link_id, ip, device, os, browser, referrer, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, link_id, ip, device, os, browser, referrer, user_agent,
                      country, region, city, continent, clicked_at
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.ip)
        .bind(new_click.device.as_str())
        .bind(&new_click.os)
        .bind(&new_click.browser)
        .bind(&new_click.referrer)
        .bind(&new_click.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        ClickEvent::try_from(row)
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM click_events WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn device_breakdown(&self, link_id: i64) -> Result<Vec<DeviceCount>, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT device, COUNT(*)
            FROM click_events
            WHERE link_id = $1
            GROUP BY device
            ORDER BY COUNT(*) DESC, device
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter()
            .map(|(device, clicks)| {
                Ok(DeviceCount {
                    device: parse_device(link_id, &device)?,
                    clicks,
                })
            })
            .collect()
    }
}
