//! Display mappers
//!
//! Every place a monetary amount is shown (cart screen, checkout total,
//! order summary) goes through [`money_label`], so the same numeric value
//! always formats identically.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::Cart,
    lines::{CartLine, Topping},
    prices::Price,
};

/// Format a price in the given currency.
pub fn money_label(price: Price, currency: &'static Currency) -> String {
    let minor = i64::try_from(*price).unwrap_or(i64::MAX);

    Money::from_minor(minor, currency).to_string()
}

/// Format the total of a single cart line.
pub fn line_total_label(line: &CartLine, currency: &'static Currency) -> String {
    money_label(line.line_total(), currency)
}

/// Format the subtotal of a cart.
pub fn subtotal_label(cart: &Cart, currency: &'static Currency) -> String {
    money_label(cart.subtotal(), currency)
}

/// Summarise toppings for a single line, e.g. `"Olives x2, Basil"`.
pub fn topping_summary(toppings: &[Topping]) -> String {
    toppings
        .iter()
        .map(|topping| {
            if topping.quantity > 1 {
                format!("{} x{}", topping.name, topping.quantity)
            } else {
                topping.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
