//! Cart Metadata Repository
//!
//! The metadata table holds at most one row (fixed key), tracking when the
//! cart was last written or touched.

use sqlx::{Sqlite, Transaction, query, query_as};

use crate::domain::cart::records::CartMetadataRecord;

const GET_CART_METADATA_SQL: &str = include_str!("../sql/get_cart_metadata.sql");
const UPSERT_CART_METADATA_SQL: &str = include_str!("../sql/upsert_cart_metadata.sql");
const DELETE_CART_METADATA_SQL: &str = include_str!("../sql/delete_cart_metadata.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartMetadataRepository;

impl SqliteCartMetadataRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Option<CartMetadataRecord>, sqlx::Error> {
        query_as::<Sqlite, CartMetadataRecord>(GET_CART_METADATA_SQL)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn upsert(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        updated_at_ms: i64,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_METADATA_SQL)
            .bind(updated_at_ms)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_METADATA_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
