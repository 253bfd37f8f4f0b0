//! Order Records

use sqlx::{FromRow, Row, sqlite::SqliteRow};
use uuid::Uuid;

use crate::domain::cart::records::try_get_amount;

/// An `orders` row. Pickup is flattened into columns keyed by
/// `pickup_kind`; the line items travel as a JSON payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OrderRecord {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub created_at_ms: i64,
    pub pickup_kind: String,
    pub estimated_minutes: Option<u32>,
    pub pickup_day: Option<String>,
    pub pickup_slot: Option<String>,
    pub pickup_slot_label: Option<String>,
    pub comment: String,
    pub total: u64,
    pub items: String,
}

impl<'r> FromRow<'r, SqliteRow> for OrderRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let estimated_minutes: Option<i64> = row.try_get("estimated_minutes")?;
        let estimated_minutes = estimated_minutes
            .map(|minutes| {
                u32::try_from(minutes).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "estimated_minutes".to_string(),
                    source: Box::new(e),
                })
            })
            .transpose()?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            created_at_ms: row.try_get("created_at_ms")?,
            pickup_kind: row.try_get("pickup_kind")?,
            estimated_minutes,
            pickup_day: row.try_get("pickup_day")?,
            pickup_slot: row.try_get("pickup_slot")?,
            pickup_slot_label: row.try_get("pickup_slot_label")?,
            comment: row.try_get("comment")?,
            total: try_get_amount(row, "total")?,
            items: row.try_get("items")?,
        })
    }
}
