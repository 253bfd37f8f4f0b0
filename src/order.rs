//! Orders
//!
//! The immutable output of checkout. Built once at submission; storage and
//! delivery of the order belong to collaborators outside this crate.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    lines::{CartLine, LineCategory, Topping},
    prices::Price,
};

/// How the order will be picked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pickup {
    /// Pick up as soon as the kitchen can manage.
    Asap {
        /// Estimated lead time from order placement, in minutes.
        estimated_minutes: u32,
    },

    /// Pick up at a confirmed day and slot.
    Scheduled {
        /// Confirmed day.
        day: Date,

        /// Confirmed slot id within that day.
        slot: String,

        /// Window label of the confirmed slot, e.g. `"10:30 - 10:45"`.
        slot_label: String,
    },
}

/// A line item on a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu id of the underlying product.
    pub product_uuid: Uuid,

    /// Display name of the product.
    pub name: String,

    /// Category the line falls into.
    pub category: LineCategory,

    /// Price of a single unit, toppings included.
    pub unit_price: Price,

    /// Number of units ordered.
    pub quantity: u32,

    /// Toppings applied to every unit, empty for simple lines.
    pub toppings: Vec<Topping>,
}

impl OrderLine {
    /// Total cost of the line across its quantity.
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        let toppings = match line {
            CartLine::Pizza(pizza) => pizza.toppings.clone(),
            CartLine::Simple(_) => Vec::new(),
        };

        OrderLine {
            product_uuid: line.product_uuid(),
            name: line.name().to_string(),
            category: line.category(),
            unit_price: line.unit_total(),
            quantity: line.quantity(),
            toppings,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The ordering user.
    pub user: Uuid,

    /// When the order was placed.
    pub created_at: Timestamp,

    /// How the order will be picked up.
    pub pickup: Pickup,

    /// Free-text comment for the kitchen.
    pub comment: String,

    /// Total across all lines.
    pub total: Price,

    /// Ordered line items, cart order preserved.
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
mod tests {
    use crate::lines::{PizzaLine, SimpleLine};

    use super::*;

    #[test]
    fn order_line_from_simple_cart_line() {
        let line = CartLine::Simple(SimpleLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Lemonade".to_string(),
            image_url: None,
            quantity: 3,
            unit_price: Price::new(200),
        });

        let order_line = OrderLine::from(&line);

        assert_eq!(order_line.category, LineCategory::Simple);
        assert_eq!(order_line.unit_price, Price::new(200));
        assert_eq!(order_line.line_total(), Price::new(600));
        assert!(order_line.toppings.is_empty());
    }

    #[test]
    fn order_line_from_pizza_folds_toppings_into_unit_price() {
        let line = CartLine::Pizza(PizzaLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Margherita".to_string(),
            image_url: None,
            quantity: 2,
            base_price: Price::new(800),
            toppings: vec![Topping {
                uuid: Uuid::now_v7(),
                name: "Olives".to_string(),
                unit_price: Price::new(100),
                quantity: 2,
            }],
        });

        let order_line = OrderLine::from(&line);

        assert_eq!(order_line.category, LineCategory::Pizza);
        assert_eq!(order_line.unit_price, Price::new(1000));
        assert_eq!(order_line.line_total(), Price::new(2000));
        assert_eq!(order_line.toppings.len(), 1);
    }
}
