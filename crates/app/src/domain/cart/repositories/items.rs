//! Cart Items Repository

use sqlx::{Sqlite, Transaction, query, query_as};
use uuid::Uuid;

use crate::domain::cart::records::{CartItemRecord, amount_to_i64};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("../sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const DELETE_ALL_CART_ITEMS_SQL: &str = include_str!("../sql/delete_all_cart_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CartItemRecord>, sqlx::Error> {
        query_as::<Sqlite, CartItemRecord>(GET_CART_ITEMS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert or overwrite a line. `ON CONFLICT … DO UPDATE` keeps the
    /// original rowid, so a re-added line stays in its insertion position.
    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: &CartItemRecord,
    ) -> Result<(), sqlx::Error> {
        query(UPSERT_CART_ITEM_SQL)
            .bind(item.line_uuid)
            .bind(item.product_uuid)
            .bind(item.name.as_str())
            .bind(item.image_url.as_deref())
            .bind(item.kind.as_str())
            .bind(item.unit_price.map(amount_to_i64))
            .bind(item.base_price.map(amount_to_i64))
            .bind(i64::from(item.quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        line: Uuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(line)
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        line: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(line)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_all(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ALL_CART_ITEMS_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
