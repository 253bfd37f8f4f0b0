//! Checkout
//!
//! Composes the cart, the pickup selection and the order comment into a
//! single order-ready state, and materialises the final [`Order`].

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::Cart,
    order::{Order, OrderLine, Pickup},
    schedule::{PickupConfirmation, PickupDay, PickupPlanner},
};

/// Fixed lead-time estimate for ASAP pickup, in minutes.
pub const ASAP_ESTIMATE_MINUTES: u32 = 15;

/// The top-level pickup choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PickupOption {
    /// Pick up as soon as possible.
    #[default]
    Asap,

    /// Pick up at a scheduled day and slot.
    Scheduled,
}

/// Errors raised while materialising an [`Order`].
///
/// These indicate a UI-flow error (the caller is expected to gate order
/// placement on [`CheckoutState::can_place_order`]) and are not recoverable
/// for the attempted operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Scheduled pickup was selected but no slot has been confirmed.
    #[error("pickup is scheduled but no slot has been confirmed")]
    ScheduleUnconfirmed,

    /// The cart has no lines to order.
    #[error("cannot build an order from an empty cart")]
    EmptyCart,
}

/// Order-ready snapshot of the whole checkout screen.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    /// The current cart.
    pub cart: Cart,

    /// The selected pickup option.
    pub pickup: PickupOption,

    /// The generated pickup calendar.
    pub days: Vec<PickupDay>,

    /// The in-progress day selection.
    pub selected_day: Option<jiff::civil::Date>,

    /// The in-progress slot selection.
    pub selected_slot: Option<String>,

    /// The committed schedule choice.
    pub confirmation: Option<PickupConfirmation>,

    /// Free-text comment for the kitchen.
    pub comment: String,

    /// Whether an order can be placed from this state.
    pub can_place_order: bool,
}

impl CheckoutState {
    /// Compose a snapshot from the current cart, pickup option and planner.
    pub fn compose(
        cart: Cart,
        pickup: PickupOption,
        planner: &PickupPlanner,
        comment: String,
    ) -> Self {
        let can_place = can_place_order(&cart, pickup, planner.confirmation());

        CheckoutState {
            cart,
            pickup,
            days: planner.days().to_vec(),
            selected_day: planner.selected_day(),
            selected_slot: planner.selected_slot().map(str::to_string),
            confirmation: planner.confirmation().cloned(),
            comment,
            can_place_order: can_place,
        }
    }
}

/// Whether an order can be placed: the cart has lines, and a scheduled
/// pickup has been confirmed.
pub fn can_place_order(
    cart: &Cart,
    pickup: PickupOption,
    confirmation: Option<&PickupConfirmation>,
) -> bool {
    let schedule_ready = match pickup {
        PickupOption::Asap => true,
        PickupOption::Scheduled => confirmation.is_some(),
    };

    !cart.is_empty() && schedule_ready
}

/// Materialise an [`Order`] from the checkout state.
///
/// # Errors
///
/// - [`OrderError::EmptyCart`]: the cart has no lines.
/// - [`OrderError::ScheduleUnconfirmed`]: scheduled pickup was selected but
///   never confirmed.
pub fn build_order(
    user: Uuid,
    cart: &Cart,
    pickup: PickupOption,
    confirmation: Option<&PickupConfirmation>,
    comment: &str,
    created_at: Timestamp,
) -> Result<Order, OrderError> {
    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let pickup = match pickup {
        PickupOption::Asap => Pickup::Asap {
            estimated_minutes: ASAP_ESTIMATE_MINUTES,
        },
        PickupOption::Scheduled => {
            let confirmation = confirmation.ok_or(OrderError::ScheduleUnconfirmed)?;

            Pickup::Scheduled {
                day: confirmation.day,
                slot: confirmation.slot.clone(),
                slot_label: confirmation.slot_label.clone(),
            }
        }
    };

    Ok(Order {
        user,
        created_at,
        pickup,
        comment: comment.to_string(),
        total: cart.subtotal(),
        lines: cart.lines().iter().map(OrderLine::from).collect(),
    })
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use crate::{
        lines::{CartLine, SimpleLine},
        prices::Price,
        schedule::pickup_days,
    };

    use super::*;

    fn cart_with_one_line() -> Cart {
        Cart::with_lines([CartLine::Simple(SimpleLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Lemonade".to_string(),
            image_url: None,
            quantity: 2,
            unit_price: Price::new(200),
        })])
    }

    fn confirmed_planner() -> PickupPlanner {
        let now = date(2026, 8, 5)
            .at(12, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();
        let mut planner = PickupPlanner::new(pickup_days(&now));

        planner.select_day(date(2026, 8, 6));
        planner.select_slot("10:30");
        planner.confirm();

        planner
    }

    #[test]
    fn asap_order_succeeds_without_any_schedule_state() {
        let order = build_order(
            Uuid::now_v7(),
            &cart_with_one_line(),
            PickupOption::Asap,
            None,
            "",
            Timestamp::UNIX_EPOCH,
        );

        assert!(
            matches!(
                order,
                Ok(Order {
                    pickup: Pickup::Asap {
                        estimated_minutes: ASAP_ESTIMATE_MINUTES
                    },
                    ..
                })
            ),
            "expected an ASAP order, got {order:?}"
        );
    }

    #[test]
    fn scheduled_order_without_confirmation_fails() {
        let order = build_order(
            Uuid::now_v7(),
            &cart_with_one_line(),
            PickupOption::Scheduled,
            None,
            "",
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(order, Err(OrderError::ScheduleUnconfirmed));
    }

    #[test]
    fn scheduled_order_carries_the_confirmation() {
        let planner = confirmed_planner();

        let order = build_order(
            Uuid::now_v7(),
            &cart_with_one_line(),
            PickupOption::Scheduled,
            planner.confirmation(),
            "extra napkins",
            Timestamp::UNIX_EPOCH,
        )
        .unwrap();

        assert_eq!(
            order.pickup,
            Pickup::Scheduled {
                day: date(2026, 8, 6),
                slot: "10:30".to_string(),
                slot_label: "10:30 - 10:45".to_string(),
            }
        );
        assert_eq!(order.comment, "extra napkins");
        assert_eq!(order.total, Price::new(400));
        assert_eq!(order.lines.len(), 1);
    }

    #[test]
    fn empty_cart_never_builds_an_order() {
        let order = build_order(
            Uuid::now_v7(),
            &Cart::new(),
            PickupOption::Asap,
            None,
            "",
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(order, Err(OrderError::EmptyCart));
    }

    #[test]
    fn can_place_order_requires_lines_and_a_confirmed_schedule() {
        let planner = confirmed_planner();
        let cart = cart_with_one_line();

        assert!(can_place_order(&cart, PickupOption::Asap, None));
        assert!(!can_place_order(&cart, PickupOption::Scheduled, None));
        assert!(can_place_order(
            &cart,
            PickupOption::Scheduled,
            planner.confirmation()
        ));
        assert!(!can_place_order(&Cart::new(), PickupOption::Asap, None));
    }

    #[test]
    fn compose_derives_can_place_order() {
        let planner = confirmed_planner();

        let state = CheckoutState::compose(
            cart_with_one_line(),
            PickupOption::Scheduled,
            &planner,
            String::new(),
        );

        assert!(state.can_place_order);
        assert_eq!(state.selected_slot.as_deref(), Some("10:30"));
        assert!(state.confirmation.is_some());
    }
}
