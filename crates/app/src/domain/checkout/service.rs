//! Checkout session service.
//!
//! Binds the observed cart, the pickup planner and the order comment into
//! one continuously published [`CheckoutState`]. All entry points are
//! driven by discrete UI actions; the session republishes after each one.

use jiff::{Timestamp, Zoned, civil::Date};
use tokio::sync::watch;
use uuid::Uuid;

use forno::{
    cart::Cart,
    checkout::{CheckoutState, OrderError, PickupOption, build_order},
    order::Order,
    schedule::PickupPlanner,
};

#[derive(Debug)]
pub struct CheckoutSession {
    cart_rx: watch::Receiver<Cart>,
    planner: PickupPlanner,
    pickup: PickupOption,
    comment: String,
    state_tx: watch::Sender<CheckoutState>,
}

impl CheckoutSession {
    /// Open a session over an observed cart, generating the pickup
    /// calendar relative to `now`.
    #[must_use]
    pub fn new(cart_rx: watch::Receiver<Cart>, now: &Zoned) -> Self {
        let planner = PickupPlanner::from_now(now);
        let pickup = PickupOption::default();
        let initial = CheckoutState::compose(
            cart_rx.borrow().clone(),
            pickup,
            &planner,
            String::new(),
        );
        let (state_tx, _) = watch::channel(initial);

        Self {
            cart_rx,
            planner,
            pickup,
            comment: String::new(),
            state_tx,
        }
    }

    /// Subscribe to the published checkout state.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state_tx.subscribe()
    }

    /// The current checkout state.
    pub fn state(&self) -> CheckoutState {
        self.state_tx.borrow().clone()
    }

    /// Switch between ASAP and scheduled pickup.
    ///
    /// Re-entering scheduled mode with an existing confirmation re-seeds
    /// the picker from it; the confirmation itself is never cleared here.
    pub fn select_pickup_option(&mut self, option: PickupOption) {
        if option == PickupOption::Scheduled && self.pickup != PickupOption::Scheduled {
            self.planner.reseed_from_confirmation();
        }

        self.pickup = option;
        self.republish();
    }

    /// Select a pickup day.
    pub fn select_day(&mut self, day: Date) {
        self.planner.select_day(day);
        self.republish();
    }

    /// Select a pickup slot under the current day.
    pub fn select_slot(&mut self, slot: &str) {
        self.planner.select_slot(slot);
        self.republish();
    }

    /// Commit the current day/slot selection.
    pub fn confirm_schedule(&mut self) {
        self.planner.confirm();
        self.republish();
    }

    /// Set the free-text comment for the kitchen.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
        self.republish();
    }

    /// Await the next cart change and republish the derived state.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart store has gone away.
    pub async fn cart_changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.cart_rx.changed().await?;
        self.republish();

        Ok(())
    }

    /// Materialise an order from the current state, stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] when the cart is empty or a scheduled
    /// pickup has not been confirmed.
    pub fn place_order(&self, user: Uuid) -> Result<Order, OrderError> {
        let cart = self.cart_rx.borrow().clone();

        build_order(
            user,
            &cart,
            self.pickup,
            self.planner.confirmation(),
            &self.comment,
            Timestamp::now(),
        )
    }

    fn republish(&mut self) {
        let cart = self.cart_rx.borrow_and_update().clone();
        let state = CheckoutState::compose(cart, self.pickup, &self.planner, self.comment.clone());

        self.state_tx.send_replace(state);
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use forno::order::Pickup;

    use crate::{
        domain::cart::CartStore,
        test::{TestContext, helpers::margherita},
    };

    use super::*;

    fn wednesday_noon() -> Zoned {
        date(2026, 8, 5)
            .at(12, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap()
    }

    #[tokio::test]
    async fn session_tracks_cart_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let rx = ctx.store.observe().await?;
        let mut session = CheckoutSession::new(rx, &wednesday_noon());

        assert!(session.state().cart.is_empty());
        assert!(!session.state().can_place_order);

        ctx.store.add_item(margherita(1)).await?;
        session.cart_changed().await?;

        assert_eq!(session.state().cart.len(), 1);
        assert!(session.state().can_place_order);

        Ok(())
    }

    #[tokio::test]
    async fn scheduled_order_requires_a_confirmation() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store.add_item(margherita(1)).await?;

        let rx = ctx.store.observe().await?;
        let mut session = CheckoutSession::new(rx, &wednesday_noon());

        session.select_pickup_option(PickupOption::Scheduled);

        assert!(!session.state().can_place_order);
        assert_eq!(
            session.place_order(Uuid::now_v7()),
            Err(OrderError::ScheduleUnconfirmed)
        );

        session.select_day(date(2026, 8, 6));
        session.select_slot("12:00");
        session.confirm_schedule();
        session.set_comment("no basil");

        assert!(session.state().can_place_order);

        let order = session.place_order(Uuid::now_v7())?;

        assert_eq!(
            order.pickup,
            Pickup::Scheduled {
                day: date(2026, 8, 6),
                slot: "12:00".to_string(),
                slot_label: "12:00 - 12:15".to_string(),
            }
        );
        assert_eq!(order.comment, "no basil");

        Ok(())
    }

    #[tokio::test]
    async fn switching_pickup_option_keeps_the_confirmation() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store.add_item(margherita(1)).await?;

        let rx = ctx.store.observe().await?;
        let mut session = CheckoutSession::new(rx, &wednesday_noon());

        session.select_pickup_option(PickupOption::Scheduled);
        session.select_day(date(2026, 8, 6));
        session.select_slot("12:00");
        session.confirm_schedule();

        session.select_pickup_option(PickupOption::Asap);
        session.select_pickup_option(PickupOption::Scheduled);

        let state = session.state();
        assert_eq!(state.selected_day, Some(date(2026, 8, 6)));
        assert_eq!(state.selected_slot.as_deref(), Some("12:00"));
        assert!(state.confirmation.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn asap_order_succeeds_without_schedule_state() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.store.add_item(margherita(1)).await?;

        let rx = ctx.store.observe().await?;
        let session = CheckoutSession::new(rx, &wednesday_noon());

        let order = session.place_order(Uuid::now_v7())?;

        assert!(
            matches!(order.pickup, Pickup::Asap { estimated_minutes: 15 }),
            "expected an ASAP pickup, got {:?}",
            order.pickup
        );

        Ok(())
    }
}
