//! Cart Line Mapper
//!
//! Pure, stateless mapping between persisted rows and domain cart lines.
//! A row whose `kind` discriminator disagrees with its nullable price
//! columns indicates corrupted stored state and fails loudly.

use rustc_hash::FxHashMap;
use thiserror::Error;
use uuid::Uuid;

use forno::{
    lines::{CartLine, PizzaLine, SimpleLine, Topping},
    prices::Price,
};

use super::records::{CartItemRecord, CartToppingRecord};

pub(crate) const KIND_SIMPLE: &str = "simple";
pub(crate) const KIND_PIZZA: &str = "pizza";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartMapError {
    /// The price column matching the discriminator is null.
    #[error("cart line {0} is marked '{1}' but its {1} price is missing")]
    MissingPrice(Uuid, &'static str),

    /// The price column of the other variant is set.
    #[error("cart line {0} is marked '{1}' but carries the other variant's price")]
    ConflictingPrice(Uuid, &'static str),

    /// The discriminator names no known variant.
    #[error("cart line {0} has unknown kind '{1}'")]
    UnknownKind(Uuid, String),
}

/// Map persisted rows to domain lines, attaching each line's toppings.
///
/// Row order is preserved; topping rows without a surviving line are
/// ignored (they are deleted together with the line, but a stale read may
/// still see them).
pub(crate) fn to_domain(
    items: Vec<CartItemRecord>,
    toppings: Vec<CartToppingRecord>,
) -> Result<Vec<CartLine>, CartMapError> {
    let mut by_line: FxHashMap<Uuid, Vec<Topping>> = FxHashMap::default();

    for topping in toppings {
        by_line
            .entry(topping.line_uuid)
            .or_default()
            .push(topping_to_domain(topping));
    }

    items
        .into_iter()
        .map(|item| {
            let toppings = by_line.remove(&item.line_uuid).unwrap_or_default();

            line_to_domain(item, toppings)
        })
        .collect()
}

/// Map a domain line to its persisted representation.
pub(crate) fn to_records(line: &CartLine) -> (CartItemRecord, Vec<CartToppingRecord>) {
    match line {
        CartLine::Simple(simple) => (
            CartItemRecord {
                line_uuid: simple.uuid,
                product_uuid: simple.product_uuid,
                name: simple.name.clone(),
                image_url: simple.image_url.clone(),
                kind: KIND_SIMPLE.to_string(),
                unit_price: Some(*simple.unit_price),
                base_price: None,
                quantity: simple.quantity,
            },
            Vec::new(),
        ),
        CartLine::Pizza(pizza) => (
            CartItemRecord {
                line_uuid: pizza.uuid,
                product_uuid: pizza.product_uuid,
                name: pizza.name.clone(),
                image_url: pizza.image_url.clone(),
                kind: KIND_PIZZA.to_string(),
                unit_price: None,
                base_price: Some(*pizza.base_price),
                quantity: pizza.quantity,
            },
            pizza
                .toppings
                .iter()
                .map(|topping| topping_to_record(pizza.uuid, topping))
                .collect(),
        ),
    }
}

fn line_to_domain(
    item: CartItemRecord,
    toppings: Vec<Topping>,
) -> Result<CartLine, CartMapError> {
    match item.kind.as_str() {
        KIND_SIMPLE => {
            if item.base_price.is_some() {
                return Err(CartMapError::ConflictingPrice(item.line_uuid, KIND_SIMPLE));
            }

            let unit_price = item
                .unit_price
                .ok_or(CartMapError::MissingPrice(item.line_uuid, KIND_SIMPLE))?;

            Ok(CartLine::Simple(SimpleLine {
                uuid: item.line_uuid,
                product_uuid: item.product_uuid,
                name: item.name,
                image_url: item.image_url,
                quantity: item.quantity,
                unit_price: Price::new(unit_price),
            }))
        }
        KIND_PIZZA => {
            if item.unit_price.is_some() {
                return Err(CartMapError::ConflictingPrice(item.line_uuid, KIND_PIZZA));
            }

            let base_price = item
                .base_price
                .ok_or(CartMapError::MissingPrice(item.line_uuid, KIND_PIZZA))?;

            Ok(CartLine::Pizza(PizzaLine {
                uuid: item.line_uuid,
                product_uuid: item.product_uuid,
                name: item.name,
                image_url: item.image_url,
                quantity: item.quantity,
                base_price: Price::new(base_price),
                toppings,
            }))
        }
        _ => Err(CartMapError::UnknownKind(item.line_uuid, item.kind)),
    }
}

fn topping_to_domain(record: CartToppingRecord) -> Topping {
    Topping {
        uuid: record.topping_uuid,
        name: record.name,
        unit_price: Price::new(record.unit_price),
        quantity: record.quantity,
    }
}

fn topping_to_record(line_uuid: Uuid, topping: &Topping) -> CartToppingRecord {
    CartToppingRecord {
        line_uuid,
        topping_uuid: topping.uuid,
        name: topping.name.clone(),
        unit_price: *topping.unit_price,
        quantity: topping.quantity,
    }
}
