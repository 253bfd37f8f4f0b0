//! Orders Repository

use sqlx::{Sqlite, Transaction, query, query_as};
use uuid::Uuid;

use crate::domain::cart::records::amount_to_i64;

use super::records::OrderRecord;

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LIST_ORDERS_FOR_USER_SQL: &str = include_str!("sql/list_orders_for_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        record: &OrderRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(record.uuid)
            .bind(record.user_uuid)
            .bind(record.created_at_ms)
            .bind(record.pickup_kind.as_str())
            .bind(record.estimated_minutes.map(i64::from))
            .bind(record.pickup_day.as_deref())
            .bind(record.pickup_slot.as_deref())
            .bind(record.pickup_slot_label.as_deref())
            .bind(record.comment.as_str())
            .bind(amount_to_i64(record.total))
            .bind(record.items.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_for_user(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: Uuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(LIST_ORDERS_FOR_USER_SQL)
            .bind(user)
            .fetch_all(&mut **tx)
            .await
    }
}
