//! Cart store service.
//!
//! Durable cart state with TTL expiry and write-coalescing. Every entry
//! point runs the expiry check first, inside the same transaction as its
//! own effect, so an expired cart is always purged before anything else
//! happens. Observers subscribe to a watch channel that carries the current
//! cart plus every subsequent change.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use forno::{cart::Cart, lines::CartLine};

use crate::{
    database::Db,
    domain::cart::{
        errors::CartStoreError,
        mapper,
        repositories::{
            SqliteCartItemsRepository, SqliteCartMetadataRepository, SqliteCartToppingsRepository,
        },
    },
};

/// Tuning for expiry and touch-coalescing.
#[derive(Debug, Clone, Copy)]
pub struct CartStoreConfig {
    /// How long a cart survives without a mutation or touch.
    pub ttl: Duration,

    /// Minimum interval between observation-driven metadata writes.
    pub touch_throttle: Duration,
}

impl Default for CartStoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(120 * 60),
            touch_throttle: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqliteCartStore {
    db: Db,
    config: CartStoreConfig,
    items: SqliteCartItemsRepository,
    toppings: SqliteCartToppingsRepository,
    metadata: SqliteCartMetadataRepository,
    cart_tx: watch::Sender<Cart>,
    /// When an observation-driven touch last wrote, process-local. Owned by
    /// the store instance and reset only on construction.
    last_throttled_touch_ms: Arc<Mutex<Option<i64>>>,
}

impl SqliteCartStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_config(db, CartStoreConfig::default())
    }

    #[must_use]
    pub fn with_config(db: Db, config: CartStoreConfig) -> Self {
        let (cart_tx, _) = watch::channel(Cart::default());

        Self {
            db,
            config,
            items: SqliteCartItemsRepository::new(),
            toppings: SqliteCartToppingsRepository::new(),
            metadata: SqliteCartMetadataRepository::new(),
            cart_tx,
            last_throttled_touch_ms: Arc::new(Mutex::new(None)),
        }
    }

    /// Purge everything when the metadata row says the cart outlived its
    /// TTL. Runs before the calling operation's own effect.
    async fn expire_if_needed(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        now_ms: i64,
    ) -> Result<bool, CartStoreError> {
        let Some(metadata) = self.metadata.get(tx).await? else {
            return Ok(false);
        };

        if now_ms.saturating_sub(metadata.updated_at_ms) <= duration_ms(self.config.ttl) {
            return Ok(false);
        }

        self.toppings.delete_all(tx).await?;
        self.items.delete_all(tx).await?;
        self.metadata.delete(tx).await?;

        debug!("cart ttl elapsed; purged stored cart");

        Ok(true)
    }

    async fn load_cart(&self, tx: &mut Transaction<'_, Sqlite>) -> Result<Cart, CartStoreError> {
        let items = self.items.get_cart_items(tx).await?;
        let toppings = self.toppings.get_cart_toppings(tx).await?;

        Ok(Cart::with_lines(mapper::to_domain(items, toppings)?))
    }

    async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        line: Uuid,
    ) -> Result<bool, CartStoreError> {
        self.toppings.delete_for_line(tx, line).await?;
        let rows_affected = self.items.delete_cart_item(tx, line).await?;

        Ok(rows_affected > 0)
    }

    /// Observation-driven touch. Skips when the last throttled write is
    /// inside the throttle window; with no in-memory marker (a fresh
    /// process attaching to existing state) the metadata row's own
    /// timestamp is the secondary guard. Returns whether a write happened.
    async fn touch_throttled(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        now_ms: i64,
    ) -> Result<bool, CartStoreError> {
        let throttle_ms = duration_ms(self.config.touch_throttle);

        if let Some(last_ms) = self.last_touch() {
            if now_ms.saturating_sub(last_ms) < throttle_ms {
                return Ok(false);
            }
        } else if let Some(metadata) = self.metadata.get(tx).await? {
            if now_ms.saturating_sub(metadata.updated_at_ms) < throttle_ms {
                self.mark_touched(metadata.updated_at_ms);

                return Ok(false);
            }
        }

        self.metadata.upsert(tx, now_ms).await?;

        Ok(true)
    }

    fn last_touch(&self) -> Option<i64> {
        *self
            .last_throttled_touch_ms
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mark_touched(&self, now_ms: i64) {
        *self
            .last_throttled_touch_ms
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(now_ms);
    }

    fn publish(&self, cart: Cart) {
        // Re-observing an unchanged cart must not wake existing subscribers.
        self.cart_tx.send_if_modified(|current| {
            if *current == cart {
                false
            } else {
                *current = cart;
                true
            }
        });
    }
}

#[async_trait]
impl CartStore for SqliteCartStore {
    async fn observe(&self) -> Result<watch::Receiver<Cart>, CartStoreError> {
        let now_ms = now_ms();
        let mut tx = self.db.begin().await?;

        self.expire_if_needed(&mut tx, now_ms).await?;

        let cart = self.load_cart(&mut tx).await?;

        let wrote = if cart.is_empty() {
            false
        } else {
            self.touch_throttled(&mut tx, now_ms).await?
        };

        tx.commit().await?;

        if wrote {
            self.mark_touched(now_ms);
        }

        self.publish(cart);

        Ok(self.cart_tx.subscribe())
    }

    #[tracing::instrument(name = "cart.store.add_item", skip(self, line), err)]
    async fn add_item(&self, line: CartLine) -> Result<Cart, CartStoreError> {
        if line.quantity() == 0 {
            return self.remove_item(line.uuid()).await;
        }

        let now_ms = now_ms();
        let mut tx = self.db.begin().await?;

        self.expire_if_needed(&mut tx, now_ms).await?;

        let (item, toppings) = mapper::to_records(&line);

        self.items.upsert_cart_item(&mut tx, &item).await?;

        // Toppings are replaced atomically with the line; a simple line
        // clears any stale topping rows left under its id.
        self.toppings.delete_for_line(&mut tx, line.uuid()).await?;

        for topping in &toppings {
            self.toppings.create_cart_topping(&mut tx, topping).await?;
        }

        self.metadata.upsert(&mut tx, now_ms).await?;

        let cart = self.load_cart(&mut tx).await?;

        tx.commit().await?;

        self.mark_touched(now_ms);
        self.publish(cart.clone());

        Ok(cart)
    }

    #[tracing::instrument(name = "cart.store.update_quantity", skip(self), err)]
    async fn update_quantity(&self, line: Uuid, quantity: u32) -> Result<Cart, CartStoreError> {
        let now_ms = now_ms();
        let mut tx = self.db.begin().await?;

        let expired = self.expire_if_needed(&mut tx, now_ms).await?;

        let changed = if quantity == 0 {
            self.delete_line(&mut tx, line).await?
        } else {
            self.items.update_quantity(&mut tx, line, quantity).await? > 0
        };

        if changed {
            self.metadata.upsert(&mut tx, now_ms).await?;
        }

        let cart = self.load_cart(&mut tx).await?;

        tx.commit().await?;

        if changed {
            self.mark_touched(now_ms);
        }

        if changed || expired {
            self.publish(cart.clone());
        }

        Ok(cart)
    }

    #[tracing::instrument(name = "cart.store.remove_item", skip(self), err)]
    async fn remove_item(&self, line: Uuid) -> Result<Cart, CartStoreError> {
        let now_ms = now_ms();
        let mut tx = self.db.begin().await?;

        let expired = self.expire_if_needed(&mut tx, now_ms).await?;

        let removed = self.delete_line(&mut tx, line).await?;

        if removed {
            self.metadata.upsert(&mut tx, now_ms).await?;
        }

        let cart = self.load_cart(&mut tx).await?;

        tx.commit().await?;

        if removed {
            self.mark_touched(now_ms);
        }

        if removed || expired {
            self.publish(cart.clone());
        }

        Ok(cart)
    }

    #[tracing::instrument(name = "cart.store.clear", skip(self), err)]
    async fn clear(&self) -> Result<(), CartStoreError> {
        let mut tx = self.db.begin().await?;

        self.toppings.delete_all(&mut tx).await?;
        self.items.delete_all(&mut tx).await?;
        self.metadata.delete(&mut tx).await?;

        tx.commit().await?;

        self.publish(Cart::default());

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Subscribe to the cart: the receiver holds the current value and is
    /// notified of every subsequent change. Runs the expiry check and, for
    /// a non-empty cart, a throttled touch.
    async fn observe(&self) -> Result<watch::Receiver<Cart>, CartStoreError>;

    /// Insert or overwrite a line; its toppings are replaced with it.
    async fn add_item(&self, line: CartLine) -> Result<Cart, CartStoreError>;

    /// Set a line's quantity; zero deletes the line. A missing line is a
    /// silent no-op that performs no write.
    async fn update_quantity(&self, line: Uuid, quantity: u32) -> Result<Cart, CartStoreError>;

    /// Delete a line and its toppings. A missing line is a silent no-op.
    async fn remove_item(&self, line: Uuid) -> Result<Cart, CartStoreError>;

    /// Delete all lines, toppings and the metadata row.
    async fn clear(&self) -> Result<(), CartStoreError>;
}

fn now_ms() -> i64 {
    Timestamp::now().as_millisecond()
}

fn duration_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
