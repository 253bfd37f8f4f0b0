//! Cart Records

use sqlx::{FromRow, Row, sqlite::SqliteRow};
use uuid::Uuid;

/// A `cart_items` row. The `kind` discriminator decides which of the two
/// nullable price columns must be set; the mapper enforces that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CartItemRecord {
    pub line_uuid: Uuid,
    pub product_uuid: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub kind: String,
    pub unit_price: Option<u64>,
    pub base_price: Option<u64>,
    pub quantity: u32,
}

/// A `cart_toppings` row, keyed by the owning line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CartToppingRecord {
    pub line_uuid: Uuid,
    pub topping_uuid: Uuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
}

/// The singleton `cart_metadata` row driving TTL expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CartMetadataRecord {
    pub updated_at_ms: i64,
}

impl<'r> FromRow<'r, SqliteRow> for CartItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            line_uuid: row.try_get("line_uuid")?,
            product_uuid: row.try_get("product_uuid")?,
            name: row.try_get("name")?,
            image_url: row.try_get("image_url")?,
            kind: row.try_get("kind")?,
            unit_price: try_get_optional_amount(row, "unit_price")?,
            base_price: try_get_optional_amount(row, "base_price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartToppingRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            line_uuid: row.try_get("line_uuid")?,
            topping_uuid: row.try_get("topping_uuid")?,
            name: row.try_get("name")?,
            unit_price: try_get_amount(row, "unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartMetadataRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            updated_at_ms: row.try_get("updated_at_ms")?,
        })
    }
}

/// SQLite integers are signed; amounts this large do not occur, so clamp
/// rather than fail the write.
pub(crate) fn amount_to_i64(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

pub(crate) fn try_get_amount(row: &SqliteRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn try_get_optional_amount(
    row: &SqliteRow,
    col: &str,
) -> Result<Option<u64>, sqlx::Error> {
    let amount_i64: Option<i64> = row.try_get(col)?;

    amount_i64
        .map(|amount| {
            u64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
                index: col.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}

pub(crate) fn try_get_quantity(row: &SqliteRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i64: i64 = row.try_get(col)?;

    u32::try_from(quantity_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
