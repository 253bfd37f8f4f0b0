//! Checkout session

pub mod service;

pub use service::*;
