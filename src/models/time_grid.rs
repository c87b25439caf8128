//! Static weekly time grid.
//!
//! The teaching week is Monday through Saturday, seven bookable slots per
//! day. Slots 1-4 run in the morning, slots 5-7 in the afternoon, and the
//! interval between slot 4 and slot 5 is a fixed lunch break that is never
//! assignable. The mapping from (day, slot) to wall-clock labels is a static
//! table, immutable for the lifetime of the system.

use std::ops::RangeInclusive;

use crate::error::{RoutineError, RoutineResult};

/// Valid day-of-week values (1 = Monday .. 6 = Saturday).
pub const DAY_RANGE: RangeInclusive<u8> = 1..=6;

/// Valid slot numbers within a day.
pub const SLOT_RANGE: RangeInclusive<u8> = 1..=7;

/// The non-bookable interval between slot 4 and slot 5.
pub const LUNCH_BREAK_RANGE: &str = "12:40-13:50";

const DAY_NAMES: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const SLOT_TIMES: [&str; 7] = [
    "09:00-09:55",
    "09:55-10:50",
    "10:50-11:45",
    "11:45-12:40",
    "13:50-14:45",
    "14:45-15:40",
    "15:40-16:35",
];

/// Weekday name for a day-of-week value.
///
/// Out-of-range values fail loudly; silently-empty labels have previously
/// masked data-shape bugs upstream.
pub fn day_name(day_of_week: u8) -> RoutineResult<&'static str> {
    if !DAY_RANGE.contains(&day_of_week) {
        return Err(RoutineError::out_of_range(
            "day_of_week",
            day_of_week,
            DAY_RANGE,
        ));
    }
    Ok(DAY_NAMES[usize::from(day_of_week) - 1])
}

/// Start-end wall-clock range for a slot number.
pub fn slot_time_range(slot_number: u8) -> RoutineResult<&'static str> {
    if !SLOT_RANGE.contains(&slot_number) {
        return Err(RoutineError::out_of_range(
            "slot_number",
            slot_number,
            SLOT_RANGE,
        ));
    }
    Ok(SLOT_TIMES[usize::from(slot_number) - 1])
}

/// Combined display label, e.g. `"Monday 09:00-09:55"`.
pub fn slot_label(day_of_week: u8, slot_number: u8) -> RoutineResult<String> {
    Ok(format!(
        "{} {}",
        day_name(day_of_week)?,
        slot_time_range(slot_number)?
    ))
}

/// Whether a slot falls in the morning block (before the lunch break).
pub fn is_morning(slot_number: u8) -> bool {
    (1..=4).contains(&slot_number)
}

/// One row of a rendered timetable grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRow {
    /// A bookable slot.
    Slot(u8),
    /// The fixed lunch break; rendered as its own row, never assignable.
    LunchBreak,
}

impl GridRow {
    /// Display label for the row's time column.
    pub fn time_label(&self) -> &'static str {
        match self {
            // Rows come from grid_rows(), so the slot number is in range.
            GridRow::Slot(n) => SLOT_TIMES[usize::from(*n) - 1],
            GridRow::LunchBreak => LUNCH_BREAK_RANGE,
        }
    }
}

/// The rows of a day column in display order: slots 1-4, the lunch break,
/// then slots 5-7.
pub fn grid_rows() -> Vec<GridRow> {
    let mut rows = Vec::with_capacity(SLOT_TIMES.len() + 1);
    for slot in SLOT_RANGE {
        if slot == 5 {
            rows.push(GridRow::LunchBreak);
        }
        rows.push(GridRow::Slot(slot));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_name_valid_range() {
        assert_eq!(day_name(1).unwrap(), "Monday");
        assert_eq!(day_name(6).unwrap(), "Saturday");
    }

    #[test]
    fn test_day_name_out_of_range() {
        assert!(day_name(0).is_err());
        assert!(day_name(7).is_err());
    }

    #[test]
    fn test_slot_time_range_valid() {
        assert_eq!(slot_time_range(1).unwrap(), "09:00-09:55");
        assert_eq!(slot_time_range(4).unwrap(), "11:45-12:40");
        assert_eq!(slot_time_range(5).unwrap(), "13:50-14:45");
        assert_eq!(slot_time_range(7).unwrap(), "15:40-16:35");
    }

    #[test]
    fn test_slot_time_range_out_of_range() {
        assert!(slot_time_range(0).is_err());
        assert!(slot_time_range(8).is_err());
    }

    #[test]
    fn test_slot_label_total_over_valid_pairs() {
        for day in DAY_RANGE {
            for slot in SLOT_RANGE {
                let label = slot_label(day, slot).expect("label must exist for valid pair");
                assert!(!label.is_empty());
            }
        }
    }

    #[test]
    fn test_slot_label_stable_across_calls() {
        assert_eq!(slot_label(3, 2).unwrap(), slot_label(3, 2).unwrap());
        assert_eq!(slot_label(1, 1).unwrap(), "Monday 09:00-09:55");
    }

    #[test]
    fn test_slot_label_out_of_range_is_error() {
        let err = slot_label(9, 1).unwrap_err();
        assert!(err.to_string().contains("day_of_week"));
        let err = slot_label(1, 9).unwrap_err();
        assert!(err.to_string().contains("slot_number"));
    }

    #[test]
    fn test_morning_afternoon_split() {
        assert!(is_morning(1));
        assert!(is_morning(4));
        assert!(!is_morning(5));
        assert!(!is_morning(7));
    }

    #[test]
    fn test_grid_rows_single_lunch_break_between_4_and_5() {
        let rows = grid_rows();
        assert_eq!(rows.len(), 8);

        let breaks: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| matches!(r, GridRow::LunchBreak))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(breaks, vec![4]);

        assert_eq!(rows[3], GridRow::Slot(4));
        assert_eq!(rows[5], GridRow::Slot(5));
    }

    #[test]
    fn test_grid_row_time_labels() {
        assert_eq!(GridRow::Slot(1).time_label(), "09:00-09:55");
        assert_eq!(GridRow::LunchBreak.time_label(), "12:40-13:50");
    }
}
