//! Cart

use crate::{lines::CartLine, prices::Price};

/// Cart
///
/// An in-memory view over the stored cart lines. Derived, never persisted;
/// the store republishes a fresh value after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Create a cart with the given lines.
    pub fn with_lines(lines: impl Into<Vec<CartLine>>) -> Self {
        Cart {
            lines: lines.into(),
        }
    }

    /// Calculate the subtotal of the cart.
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.line_total()))
    }

    /// Get the lines in the cart, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::lines::{PizzaLine, SimpleLine, Topping};

    use super::*;

    fn lemonade(quantity: u32) -> CartLine {
        CartLine::Simple(SimpleLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Lemonade".to_string(),
            image_url: None,
            quantity,
            unit_price: Price::new(200),
        })
    }

    fn margherita_with_olives(quantity: u32) -> CartLine {
        CartLine::Pizza(PizzaLine {
            uuid: Uuid::now_v7(),
            product_uuid: Uuid::now_v7(),
            name: "Margherita".to_string(),
            image_url: None,
            quantity,
            base_price: Price::new(800),
            toppings: vec![Topping {
                uuid: Uuid::now_v7(),
                name: "Olives".to_string(),
                unit_price: Price::new(100),
                quantity: 2,
            }],
        })
    }

    #[test]
    fn subtotal_of_empty_cart_is_zero() {
        assert_eq!(Cart::new().subtotal(), Price::ZERO);
    }

    // 2.00×3 + (8.00 + 1.00×2)×1 = 16.00
    #[test]
    fn subtotal_sums_simple_and_pizza_lines() {
        let cart = Cart::with_lines([lemonade(3), margherita_with_olives(1)]);

        assert_eq!(cart.subtotal(), Price::new(1600));
    }

    #[test]
    fn len_and_is_empty() {
        let cart = Cart::with_lines([lemonade(1)]);

        assert_eq!(cart.len(), 1);
        assert!(!cart.is_empty());
        assert!(Cart::new().is_empty());
    }

    #[test]
    fn lines_preserve_insertion_order() {
        let first = lemonade(1);
        let second = margherita_with_olives(1);
        let cart = Cart::with_lines([first.clone(), second.clone()]);

        assert_eq!(cart.lines(), [first, second]);
    }
}
