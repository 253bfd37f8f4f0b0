//! End-to-end checkout flow over the pure domain: build a cart, schedule a
//! pickup, and materialise the order.

use jiff::{Timestamp, civil::date};
use testresult::TestResult;
use uuid::Uuid;

use forno::{
    cart::Cart,
    checkout::{CheckoutState, PickupOption, build_order},
    lines::{CartLine, LineCategory, PizzaLine, SimpleLine, Topping},
    order::Pickup,
    prices::Price,
    schedule::{PickupPlanner, pickup_days},
};

fn wednesday_noon() -> jiff::Zoned {
    date(2026, 8, 5)
        .at(12, 0, 0, 0)
        .to_zoned(jiff::tz::TimeZone::UTC)
        .unwrap()
}

fn cart() -> Cart {
    Cart::with_lines([
        CartLine::Pizza(PizzaLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Diavola".to_string(),
            image_url: None,
            quantity: 1,
            base_price: Price::new(950),
            toppings: vec![Topping {
                uuid: Uuid::now_v7(),
                name: "Extra Salami".to_string(),
                unit_price: Price::new(150),
                quantity: 1,
            }],
        }),
        CartLine::Simple(SimpleLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Lemonade".to_string(),
            image_url: None,
            quantity: 2,
            unit_price: Price::new(250),
        }),
    ])
}

#[test]
fn scheduled_checkout_from_picker_to_order() -> TestResult {
    let now = wednesday_noon();
    let mut planner = PickupPlanner::new(pickup_days(&now));

    planner.select_day(date(2026, 8, 6));
    planner.select_slot("18:30");
    planner.confirm();

    let state = CheckoutState::compose(
        cart(),
        PickupOption::Scheduled,
        &planner,
        "ring the bell".to_string(),
    );
    assert!(state.can_place_order);

    let order = build_order(
        Uuid::now_v7(),
        &state.cart,
        state.pickup,
        state.confirmation.as_ref(),
        &state.comment,
        Timestamp::UNIX_EPOCH,
    )?;

    assert_eq!(order.total, Price::new(1600));
    assert_eq!(
        order.pickup,
        Pickup::Scheduled {
            day: date(2026, 8, 6),
            slot: "18:30".to_string(),
            slot_label: "18:30 - 18:45".to_string(),
        }
    );
    assert_eq!(order.lines.len(), 2);
    assert_eq!(
        order.lines.first().map(|line| line.category),
        Some(LineCategory::Pizza)
    );

    Ok(())
}

#[test]
fn switching_pickup_option_keeps_the_confirmation() {
    let now = wednesday_noon();
    let mut planner = PickupPlanner::new(pickup_days(&now));

    planner.select_day(date(2026, 8, 6));
    planner.select_slot("18:30");
    planner.confirm();

    // The user flips to ASAP and back; the picker reopens where they left off.
    planner.select_day(date(2026, 8, 7));
    planner.reseed_from_confirmation();

    assert_eq!(planner.selected_day(), Some(date(2026, 8, 6)));
    assert_eq!(planner.selected_slot(), Some("18:30"));
    assert!(planner.confirmation().is_some());
}
