//! Order history service.

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use forno::order::Order;

use crate::{
    database::Db,
    domain::orders::{errors::OrdersStoreError, mapper, repository::SqliteOrdersRepository},
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersStore {
    db: Db,
    repository: SqliteOrdersRepository,
}

impl SqliteOrdersStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersStore for SqliteOrdersStore {
    #[tracing::instrument(name = "orders.store.submit", skip(self, order), err)]
    async fn submit(&self, order: Order) -> Result<Uuid, OrdersStoreError> {
        let uuid = Uuid::now_v7();
        let record = mapper::to_record(uuid, &order)?;

        let mut tx = self.db.begin().await?;

        self.repository.create_order(&mut tx, &record).await?;

        tx.commit().await?;

        Ok(uuid)
    }

    async fn list_for_user(&self, user: Uuid) -> Result<Vec<Order>, OrdersStoreError> {
        let mut tx = self.db.begin().await?;

        let records = self.repository.list_for_user(&mut tx, user).await?;

        tx.commit().await?;

        records
            .into_iter()
            .map(|record| mapper::into_order(record).map_err(Into::into))
            .collect()
    }
}

#[automock]
#[async_trait]
pub trait OrdersStore: Send + Sync {
    /// Persist a placed order, returning its generated id.
    async fn submit(&self, order: Order) -> Result<Uuid, OrdersStoreError>;

    /// List a user's past orders, newest first.
    async fn list_for_user(&self, user: Uuid) -> Result<Vec<Order>, OrdersStoreError>;
}
