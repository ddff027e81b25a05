//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkKind, UpiDetails};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, code, destination_url, clicks, title, description, image, \
     kind, upi_vpa, upi_payee_name, upi_amount, upi_note, created_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    destination_url: String,
    clicks: i64,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    kind: String,
    upi_vpa: Option<String>,
    upi_payee_name: Option<String>,
    upi_amount: Option<String>,
    upi_note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<LinkRow> for Link {
    type Error = AppError;

    fn try_from(row: LinkRow) -> Result<Self, Self::Error> {
        let kind: LinkKind = row.kind.parse().map_err(|reason: String| {
            AppError::internal(
                "Corrupt link row",
                json!({ "id": row.id, "reason": reason }),
            )
        })?;

        // A UPI row without a VPA still loads; building its destination fails later.
        let upi = match kind {
            LinkKind::UpiPayment => Some(UpiDetails {
                vpa: row.upi_vpa.unwrap_or_default(),
                payee_name: row.upi_payee_name,
                amount: row.upi_amount,
                note: row.upi_note,
            }),
            LinkKind::Standard => None,
        };

        Ok(Link {
            id: row.id,
            code: row.code,
            destination_url: row.destination_url,
            clicks: row.clicks,
            title: row.title,
            description: row.description,
            image: row.image,
            kind,
            upi,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters for every value; short codes are compared exactly.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn increment_clicks(&self, link_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE links SET clicks = clicks + 1 WHERE id = $1")
            .bind(link_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_destination(
        &self,
        code: &str,
        destination_url: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "UPDATE links SET destination_url = $2 WHERE code = $1 RETURNING {LINK_COLUMNS}"
        ))
        .bind(code)
        .bind(destination_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Link::try_from).transpose()
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        // click_events rows go with the link through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
