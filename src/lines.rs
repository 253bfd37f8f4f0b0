//! Cart line items

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prices::Price;

/// A topping applied to a pizza line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topping {
    /// Menu id of the topping.
    pub uuid: Uuid,

    /// Display name of the topping.
    pub name: String,

    /// Price of a single portion.
    pub unit_price: Price,

    /// Number of portions.
    pub quantity: u32,
}

impl Topping {
    /// Total cost of this topping across its portions.
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Category a line item falls into, carried onto order lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCategory {
    /// A pizza built from a base plus toppings.
    Pizza,

    /// Anything sold as-is (drinks, sides, desserts).
    Simple,
}

/// A product sold as-is, with a single unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleLine {
    /// Stable id of this cart line.
    pub uuid: Uuid,

    /// Menu id of the product.
    pub product_uuid: Uuid,

    /// Display name of the product.
    pub name: String,

    /// Product image, when the menu provides one.
    pub image_url: Option<String>,

    /// Number of units in the cart.
    pub quantity: u32,

    /// Price of a single unit.
    pub unit_price: Price,
}

/// A pizza with a base price and a set of toppings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaLine {
    /// Stable id of this cart line.
    pub uuid: Uuid,

    /// Menu id of the pizza.
    pub product_uuid: Uuid,

    /// Display name of the pizza.
    pub name: String,

    /// Product image, when the menu provides one.
    pub image_url: Option<String>,

    /// Number of pizzas in the cart.
    pub quantity: u32,

    /// Price of the base pizza without toppings.
    pub base_price: Price,

    /// Toppings applied to every pizza on this line. Order is irrelevant.
    pub toppings: Vec<Topping>,
}

/// One entry in the cart.
///
/// Line ids are unique within a cart; a line with `quantity == 0` never
/// persists (the store removes it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartLine {
    /// A product sold as-is.
    Simple(SimpleLine),

    /// A pizza with toppings.
    Pizza(PizzaLine),
}

impl CartLine {
    /// Stable id of this cart line.
    pub fn uuid(&self) -> Uuid {
        match self {
            CartLine::Simple(line) => line.uuid,
            CartLine::Pizza(line) => line.uuid,
        }
    }

    /// Menu id of the underlying product.
    pub fn product_uuid(&self) -> Uuid {
        match self {
            CartLine::Simple(line) => line.product_uuid,
            CartLine::Pizza(line) => line.product_uuid,
        }
    }

    /// Display name of the line.
    pub fn name(&self) -> &str {
        match self {
            CartLine::Simple(line) => &line.name,
            CartLine::Pizza(line) => &line.name,
        }
    }

    /// Product image, when the menu provides one.
    pub fn image_url(&self) -> Option<&str> {
        match self {
            CartLine::Simple(line) => line.image_url.as_deref(),
            CartLine::Pizza(line) => line.image_url.as_deref(),
        }
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> u32 {
        match self {
            CartLine::Simple(line) => line.quantity,
            CartLine::Pizza(line) => line.quantity,
        }
    }

    /// Category this line falls into.
    pub fn category(&self) -> LineCategory {
        match self {
            CartLine::Simple(_) => LineCategory::Simple,
            CartLine::Pizza(_) => LineCategory::Pizza,
        }
    }

    /// Price of a single unit: the unit price as-is, or base plus toppings.
    pub fn unit_total(&self) -> Price {
        match self {
            CartLine::Simple(line) => line.unit_price,
            CartLine::Pizza(line) => line
                .toppings
                .iter()
                .fold(line.base_price, |acc, topping| acc.plus(topping.total())),
        }
    }

    /// Total cost of the line across its quantity.
    pub fn line_total(&self) -> Price {
        self.unit_total().times(self.quantity())
    }
}
