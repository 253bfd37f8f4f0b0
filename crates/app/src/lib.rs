//! Storefront application layer: the durable cart store, checkout session
//! and order history behind the ordering screens.

pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
