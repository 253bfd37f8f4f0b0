//! Cart Toppings Repository

use sqlx::{Sqlite, Transaction, query, query_as};
use uuid::Uuid;

use crate::domain::cart::records::{CartToppingRecord, amount_to_i64};

const GET_CART_TOPPINGS_SQL: &str = include_str!("../sql/get_cart_toppings.sql");
const CREATE_CART_TOPPING_SQL: &str = include_str!("../sql/create_cart_topping.sql");
const DELETE_CART_TOPPINGS_SQL: &str = include_str!("../sql/delete_cart_toppings.sql");
const DELETE_ALL_CART_TOPPINGS_SQL: &str = include_str!("../sql/delete_all_cart_toppings.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartToppingsRepository;

impl SqliteCartToppingsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_toppings(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<CartToppingRecord>, sqlx::Error> {
        query_as::<Sqlite, CartToppingRecord>(GET_CART_TOPPINGS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_topping(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        topping: &CartToppingRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CART_TOPPING_SQL)
            .bind(topping.line_uuid)
            .bind(topping.topping_uuid)
            .bind(topping.name.as_str())
            .bind(amount_to_i64(topping.unit_price))
            .bind(i64::from(topping.quantity))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_for_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        line: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_TOPPINGS_SQL)
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
        let rows_affected = query(DELETE_ALL_CART_TOPPINGS_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
