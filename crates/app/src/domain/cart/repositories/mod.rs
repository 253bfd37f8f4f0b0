//! Cart repositories

mod items;
mod metadata;
mod toppings;

pub(crate) use items::SqliteCartItemsRepository;
pub(crate) use metadata::SqliteCartMetadataRepository;
pub(crate) use toppings::SqliteCartToppingsRepository;
