//! Order Mapper
//!
//! Maps between placed orders and their persisted rows. Pickup details are
//! flattened into nullable columns; the mapper enforces that the columns
//! matching the `pickup_kind` discriminator are present.

use std::str::FromStr;

use jiff::{Timestamp, civil::Date};
use thiserror::Error;
use uuid::Uuid;

use forno::{
    order::{Order, Pickup},
    prices::Price,
};

use super::records::OrderRecord;

pub(crate) const PICKUP_ASAP: &str = "asap";
pub(crate) const PICKUP_SCHEDULED: &str = "scheduled";

#[derive(Debug, Error)]
pub enum OrdersMapError {
    /// A column required by the pickup discriminator is null.
    #[error("order {0} is marked '{1}' but is missing its {2}")]
    MissingField(Uuid, &'static str, &'static str),

    /// The pickup discriminator names no known variant.
    #[error("order {0} has unknown pickup kind '{1}'")]
    UnknownPickupKind(Uuid, String),

    /// A stored timestamp or date does not parse.
    #[error("order {0} carries an unreadable stored value")]
    Invalid(Uuid),

    /// The line-item payload does not (de)serialise.
    #[error("order line payload could not be read or written")]
    Items(#[from] serde_json::Error),
}

pub(crate) fn to_record(uuid: Uuid, order: &Order) -> Result<OrderRecord, OrdersMapError> {
    let (pickup_kind, estimated_minutes, pickup_day, pickup_slot, pickup_slot_label) =
        match &order.pickup {
            Pickup::Asap { estimated_minutes } => {
                (PICKUP_ASAP, Some(*estimated_minutes), None, None, None)
            }
            Pickup::Scheduled {
                day,
                slot,
                slot_label,
            } => (
                PICKUP_SCHEDULED,
                None,
                Some(day.to_string()),
                Some(slot.clone()),
                Some(slot_label.clone()),
            ),
        };

    Ok(OrderRecord {
        uuid,
        user_uuid: order.user,
        created_at_ms: order.created_at.as_millisecond(),
        pickup_kind: pickup_kind.to_string(),
        estimated_minutes,
        pickup_day,
        pickup_slot,
        pickup_slot_label,
        comment: order.comment.clone(),
        total: *order.total,
        items: serde_json::to_string(&order.lines)?,
    })
}

pub(crate) fn into_order(record: OrderRecord) -> Result<Order, OrdersMapError> {
    let pickup = match record.pickup_kind.as_str() {
        PICKUP_ASAP => Pickup::Asap {
            estimated_minutes: record.estimated_minutes.ok_or(OrdersMapError::MissingField(
                record.uuid,
                PICKUP_ASAP,
                "estimated minutes",
            ))?,
        },
        PICKUP_SCHEDULED => {
            let day = record.pickup_day.ok_or(OrdersMapError::MissingField(
                record.uuid,
                PICKUP_SCHEDULED,
                "day",
            ))?;
            let slot = record.pickup_slot.ok_or(OrdersMapError::MissingField(
                record.uuid,
                PICKUP_SCHEDULED,
                "slot",
            ))?;
            let slot_label = record
                .pickup_slot_label
                .ok_or(OrdersMapError::MissingField(
                    record.uuid,
                    PICKUP_SCHEDULED,
                    "slot label",
                ))?;

            Pickup::Scheduled {
                day: Date::from_str(&day).map_err(|_| OrdersMapError::Invalid(record.uuid))?,
                slot,
                slot_label,
            }
        }
        _ => {
            return Err(OrdersMapError::UnknownPickupKind(
                record.uuid,
                record.pickup_kind,
            ));
        }
    };

    Ok(Order {
        user: record.user_uuid,
        created_at: Timestamp::from_millisecond(record.created_at_ms)
            .map_err(|_| OrdersMapError::Invalid(record.uuid))?,
        pickup,
        comment: record.comment,
        total: Price::new(record.total),
        lines: serde_json::from_str(&record.items)?,
    })
}
