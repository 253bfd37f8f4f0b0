//! Pickup planner
//!
//! Tracks the user's in-progress day/slot selection against their confirmed
//! choice. Stale references (a day or slot id that no longer resolves
//! against the generated calendar) are silent no-ops, never errors.

use jiff::{Zoned, civil::Date};

use super::{PickupDay, pickup_days};

/// The user's committed schedule choice, snapshotted by [`PickupPlanner::confirm`].
///
/// Distinct from the in-progress picker selection: switching the pickup
/// option away from scheduled and back does not clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupConfirmation {
    /// Confirmed day.
    pub day: Date,

    /// Confirmed slot id within that day.
    pub slot: String,

    /// Window label of the confirmed slot, carried onto the order.
    pub slot_label: String,
}

/// Selection state machine over a generated pickup calendar.
#[derive(Debug, Clone)]
pub struct PickupPlanner {
    days: Vec<PickupDay>,
    selected_day: Option<Date>,
    selected_slot: Option<String>,
    confirmation: Option<PickupConfirmation>,
}

impl PickupPlanner {
    /// Create a planner over a pre-generated calendar.
    pub fn new(days: Vec<PickupDay>) -> Self {
        PickupPlanner {
            days,
            selected_day: None,
            selected_slot: None,
            confirmation: None,
        }
    }

    /// Create a planner over the standard horizon relative to `now`.
    pub fn from_now(now: &Zoned) -> Self {
        Self::new(pickup_days(now))
    }

    /// The generated calendar, earliest day first.
    pub fn days(&self) -> &[PickupDay] {
        &self.days
    }

    /// The in-progress day selection.
    pub fn selected_day(&self) -> Option<Date> {
        self.selected_day
    }

    /// The in-progress slot selection.
    pub fn selected_slot(&self) -> Option<&str> {
        self.selected_slot.as_deref()
    }

    /// The committed choice, if the user has confirmed one.
    pub fn confirmation(&self) -> Option<&PickupConfirmation> {
        self.confirmation.as_ref()
    }

    /// Select a day, auto-selecting its first available slot.
    ///
    /// A previous day's slot never survives the switch. Unknown days are
    /// ignored.
    pub fn select_day(&mut self, day: Date) {
        let Some(first_slot) = self
            .day(day)
            .map(|found| found.slots.first().map(|slot| slot.id.clone()))
        else {
            return;
        };

        self.selected_slot = first_slot;
        self.selected_day = Some(day);
    }

    /// Select a slot under the currently selected day.
    ///
    /// Ignored when no day is selected or the id does not resolve against
    /// that day's slots.
    pub fn select_slot(&mut self, slot: &str) {
        let resolves = self
            .selected_day
            .and_then(|day| self.day(day))
            .is_some_and(|day| day.slots.iter().any(|candidate| candidate.id == slot));

        if resolves {
            self.selected_slot = Some(slot.to_string());
        }
    }

    /// Commit the current selection.
    ///
    /// No-ops when day or slot is unset, or when the slot id no longer
    /// resolves against the day's current slot list (e.g. the calendar was
    /// regenerated underneath the picker).
    pub fn confirm(&mut self) {
        let (Some(day), Some(slot)) = (self.selected_day, self.selected_slot.as_deref()) else {
            return;
        };

        let snapshot = self
            .day(day)
            .and_then(|found| found.slots.iter().find(|candidate| candidate.id == slot))
            .map(|found| PickupConfirmation {
                day,
                slot: found.id.clone(),
                slot_label: found.label.clone(),
            });

        if let Some(confirmation) = snapshot {
            self.confirmation = Some(confirmation);
        }
    }

    /// Re-seed the in-progress selection from an existing confirmation, so
    /// the picker reopens where the user left off.
    ///
    /// When the confirmed slot no longer resolves (regenerated calendar),
    /// the confirmed day is selected with its first slot; the confirmation
    /// itself is only ever replaced by a new [`confirm`](Self::confirm).
    pub fn reseed_from_confirmation(&mut self) {
        let Some(confirmation) = self.confirmation.clone() else {
            return;
        };

        let Some(new_slot) = self.day(confirmation.day).map(|day| {
            if day.slots.iter().any(|candidate| candidate.id == confirmation.slot) {
                Some(confirmation.slot.clone())
            } else {
                day.slots.first().map(|slot| slot.id.clone())
            }
        }) else {
            return;
        };

        self.selected_slot = new_slot;
        self.selected_day = Some(confirmation.day);
    }

    fn day(&self, day: Date) -> Option<&PickupDay> {
        self.days.iter().find(|candidate| candidate.id == day)
    }
}
