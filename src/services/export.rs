//! Export serializer: CSV rendering of a run's entries.
//!
//! Rows are pre-sorted by (day, slot) independent of any on-screen sort
//! state, so exports are reproducible. A single unresolvable reference
//! renders as a placeholder and must not abort the remaining rows.

use chrono::NaiveDate;

use crate::api::{Roster, ScheduleEntry};
use crate::models::time_grid;

/// Fixed column order of the export.
pub const CSV_HEADER: [&str; 7] = [
    "Day",
    "Time",
    "Subject Code",
    "Subject Name",
    "Teacher",
    "Room",
    "Type",
];

/// Placeholder for relational data that cannot be resolved at export time.
pub const MISSING_FIELD: &str = "N/A";

/// Render entries as CSV, one row per entry plus a header row.
pub fn export_csv(entries: &[ScheduleEntry], roster: &Roster) -> String {
    let mut sorted: Vec<&ScheduleEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| (e.day_of_week, e.slot_number, e.id));

    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    for entry in sorted {
        let day = time_grid::day_name(entry.day_of_week).unwrap_or(MISSING_FIELD);
        let time = time_grid::slot_time_range(entry.slot_number).unwrap_or(MISSING_FIELD);

        let (code, name, session_type) = match roster.subject(entry.course_offering_id) {
            Some(subject) => (
                subject.code.as_str(),
                subject.name.as_str(),
                if subject.is_lab { "Lab" } else { "Theory" },
            ),
            None => (MISSING_FIELD, MISSING_FIELD, MISSING_FIELD),
        };
        let teacher = roster.teacher_name(entry.teacher_id).unwrap_or(MISSING_FIELD);
        let room = roster.room_name(entry.room_id).unwrap_or(MISSING_FIELD);

        let fields = [day, time, code, name, teacher, room, session_type];
        let row: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Export file name: `<scope-label>_<ISO-date>.csv`.
pub fn export_file_name(scope_label: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", scope_label, date.format("%Y-%m-%d"))
}

/// Quote a field when it contains a separator, a quote, or a line break;
/// embedded quotes are doubled (RFC 4180).
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod escape_tests {
    use super::escape_csv;

    #[test]
    fn test_plain_field_unchanged() {
        assert_eq!(escape_csv("CSE-301"), "CSE-301");
    }

    #[test]
    fn test_comma_field_quoted() {
        assert_eq!(escape_csv("Networks, Lab"), "\"Networks, Lab\"");
    }

    #[test]
    fn test_embedded_quotes_doubled() {
        assert_eq!(escape_csv("Room \"A\""), "\"Room \"\"A\"\"\"");
    }

    #[test]
    fn test_newline_field_quoted() {
        assert_eq!(escape_csv("line1\nline2"), "\"line1\nline2\"");
    }
}
