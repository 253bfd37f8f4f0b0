//! Test data builders.

use uuid::Uuid;

use forno::{
    lines::{CartLine, PizzaLine, SimpleLine, Topping},
    prices::Price,
};

/// A margherita with a double portion of olives: (8.00 + 1.00×2) per unit.
pub fn margherita(quantity: u32) -> CartLine {
    CartLine::Pizza(PizzaLine {
        uuid: Uuid::now_v7(),
        product_uuid: Uuid::now_v7(),
        name: "Margherita".to_string(),
        image_url: Some("https://cdn.example.com/margherita.png".to_string()),
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

/// A 2.00 drink.
pub fn lemonade(quantity: u32) -> CartLine {
    CartLine::Simple(SimpleLine {
        uuid: Uuid::now_v7(),
        product_uuid: Uuid::now_v7(),
        name: "Lemonade".to_string(),
        image_url: None,
        quantity,
        unit_price: Price::new(200),
    })
}
