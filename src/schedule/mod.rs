//! Pickup scheduling
//!
//! Generates the bookable calendar (a fixed horizon of days, each carved
//! into 15-minute slots within the operating window) and tracks the user's
//! in-progress selection against their confirmed choice.

use jiff::{
    ToSpan, Zoned,
    civil::{Date, Time, time},
};

mod planner;

pub use planner::{PickupConfirmation, PickupPlanner};

/// First bookable slot of the day starts at opening time.
pub const OPEN: Time = time(9, 0, 0, 0);

/// No slot may end after closing time.
pub const CLOSE: Time = time(23, 0, 0, 0);

/// Width of a single pickup slot, in minutes.
pub const SLOT_MINUTES: i64 = 15;

/// Lead time before the earliest bookable slot on the current day.
pub const PREP_BUFFER_MINUTES: i64 = 15;

/// Number of days offered by the picker.
pub const PICKUP_HORIZON_DAYS: usize = 7;

/// A fixed-width pickup window on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupTimeSlot {
    /// Canonical start-time string, unique within a day (e.g. `"09:15"`).
    pub id: String,

    /// Window label, e.g. `"09:15 - 09:30"`.
    pub label: String,

    start: Time,
}

impl PickupTimeSlot {
    /// Start of the slot window.
    pub fn start(&self) -> Time {
        self.start
    }
}

/// A bookable day with its available slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupDay {
    /// Calendar date keying this day.
    pub id: Date,

    /// Relative label: "Today", "Tomorrow" or the weekday short name.
    pub label_top: String,

    /// Absolute label, e.g. `"06 Aug"`.
    pub label_bottom: String,

    /// Available slots, earliest first. Never empty in a generated list.
    pub slots: Vec<PickupTimeSlot>,
}

/// Generate the bookable days for the standard horizon, relative to `now`.
///
/// Days with no available slots are dropped from the output, so a current
/// day past the last slot simply does not appear.
pub fn pickup_days(now: &Zoned) -> Vec<PickupDay> {
    pickup_days_for_horizon(now, PICKUP_HORIZON_DAYS)
}

/// Generate the bookable days for the given horizon, relative to `now`.
pub fn pickup_days_for_horizon(now: &Zoned, count: usize) -> Vec<PickupDay> {
    let today = now.date();
    let mut days = Vec::with_capacity(count);
    let mut date = today;

    for offset in 0..count {
        let slots = time_slots(date, now);

        if !slots.is_empty() {
            days.push(PickupDay {
                id: date,
                label_top: day_label_top(offset, date),
                label_bottom: format!("{}", date.strftime("%d %b")),
                slots,
            });
        }

        date = date.saturating_add(1.day());
    }

    days
}

/// Generate the available slots on `date`, relative to `now`.
///
/// Slots are 15-minute windows `[start, start + 15min)` between opening and
/// closing time. On the current day, slots starting at or before
/// `now + 15min` are excluded; future days carry the full window.
pub fn time_slots(date: Date, now: &Zoned) -> Vec<PickupTimeSlot> {
    let cutoff = if date == now.date() {
        Some(now.datetime().saturating_add(PREP_BUFFER_MINUTES.minutes()))
    } else {
        None
    };

    let mut slots = Vec::new();
    let mut start = OPEN;

    loop {
        let Ok(end) = start.checked_add(SLOT_MINUTES.minutes()) else {
            break;
        };

        if end > CLOSE {
            break;
        }

        let starts_in_time = match cutoff {
            Some(cutoff) => date.to_datetime(start) > cutoff,
            None => true,
        };

        if starts_in_time {
            slots.push(PickupTimeSlot {
                id: format!("{}", start.strftime("%H:%M")),
                label: format!(
                    "{} - {}",
                    start.strftime("%H:%M"),
                    end.strftime("%H:%M")
                ),
                start,
            });
        }

        start = end;
    }

    slots
}

fn day_label_top(offset: usize, date: Date) -> String {
    match offset {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => format!("{}", date.strftime("%a")),
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn noon_on_a_wednesday() -> Zoned {
        date(2026, 8, 5)
            .at(12, 0, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap()
    }

    #[test]
    fn tomorrow_carries_the_full_window() {
        let now = noon_on_a_wednesday();

        let slots = time_slots(date(2026, 8, 6), &now);

        assert_eq!(slots.first().map(|s| s.id.as_str()), Some("09:00"));
        assert_eq!(slots.last().map(|s| s.id.as_str()), Some("22:45"));
        // 09:00..23:00 in 15-minute steps
        assert_eq!(slots.len(), 14 * 4);
    }

    // now = 14:07: slots starting at or before 14:22 are excluded, so the
    // first available slot is 14:30.
    #[test]
    fn todays_slots_respect_the_prep_buffer() {
        let now = date(2026, 8, 5)
            .at(14, 7, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();

        let slots = time_slots(date(2026, 8, 5), &now);

        assert_eq!(slots.first().map(|s| s.id.as_str()), Some("14:30"));
    }

    #[test]
    fn today_past_closing_yields_no_slots() {
        let now = date(2026, 8, 5)
            .at(23, 30, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();

        assert!(time_slots(date(2026, 8, 5), &now).is_empty());
    }

    #[test]
    fn slot_labels_span_the_window() {
        let now = noon_on_a_wednesday();

        let slots = time_slots(date(2026, 8, 6), &now);

        assert_eq!(slots.first().map(|s| s.label.as_str()), Some("09:00 - 09:15"));
    }

    #[test]
    fn horizon_produces_seven_days_at_noon() {
        let now = noon_on_a_wednesday();

        let days = pickup_days(&now);

        assert_eq!(days.len(), 7);
        assert_eq!(days.first().map(|d| d.id), Some(date(2026, 8, 5)));
        assert_eq!(days.last().map(|d| d.id), Some(date(2026, 8, 11)));
    }

    #[test]
    fn closed_today_is_dropped_not_disabled() {
        let now = date(2026, 8, 5)
            .at(23, 30, 0, 0)
            .to_zoned(jiff::tz::TimeZone::UTC)
            .unwrap();

        let days = pickup_days(&now);

        assert_eq!(days.len(), 6);
        assert_eq!(days.first().map(|d| d.id), Some(date(2026, 8, 6)));
        assert_eq!(days.first().map(|d| d.label_top.as_str()), Some("Tomorrow"));
    }

    #[test]
    fn day_labels_are_relative_then_weekday() {
        let now = noon_on_a_wednesday();

        let days = pickup_days(&now);

        assert_eq!(days.first().map(|d| d.label_top.as_str()), Some("Today"));
        assert_eq!(days.get(1).map(|d| d.label_top.as_str()), Some("Tomorrow"));
        // 2026-08-07 is a Friday
        assert_eq!(days.get(2).map(|d| d.label_top.as_str()), Some("Fri"));
    }
}
