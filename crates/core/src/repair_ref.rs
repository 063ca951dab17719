//! Repair reference numbers and intake constants.
//!
//! Each showroom owns a yearly counter stored as
//! `(current_serial_year, last_serial_number)`. The database performs the
//! increment atomically (see `ShowroomRepo::next_repair_sequence`); the
//! functions here define the rule and the printed format.

use serde::{Deserialize, Serialize};

/// Status assigned to every newly received repair.
pub const STATUS_RECEIVED: &str = "received";

/// Workflow phase assigned to every newly received repair.
pub const PHASE_INTAKE: &str = "intake";

/// Next sequence number for `year` given the stored counter state.
///
/// The counter restarts at 1 whenever the stored year differs from `year`
/// (including a showroom that never issued a reference).
pub fn next_sequence(current_year: Option<i32>, last_serial: Option<i32>, year: i32) -> i32 {
    if current_year == Some(year) {
        last_serial.unwrap_or(0) + 1
    } else {
        1
    }
}

/// Human-readable reference printed on the intake receipt, e.g. `2026/0042`.
pub fn format_repair_ref(year: i32, seq: i32) -> String {
    format!("{year}/{seq:04}")
}

/// Intake priority selected at the counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Top,
    Urgent,
    Vip,
    Warranty,
    #[default]
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Top => "top",
            Priority::Urgent => "urgent",
            Priority::Vip => "vip",
            Priority::Warranty => "warranty",
            Priority::Normal => "normal",
            Priority::Low => "low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_year_increments() {
        assert_eq!(next_sequence(Some(2026), Some(41), 2026), 42);
    }

    #[test]
    fn same_year_with_null_counter_starts_at_one() {
        assert_eq!(next_sequence(Some(2026), None, 2026), 1);
    }

    #[test]
    fn new_year_resets() {
        assert_eq!(next_sequence(Some(2025), Some(950), 2026), 1);
    }

    #[test]
    fn never_used_counter_starts_at_one() {
        assert_eq!(next_sequence(None, None, 2026), 1);
        assert_eq!(next_sequence(None, Some(12), 2026), 1);
    }

    #[test]
    fn reference_is_zero_padded_to_four() {
        assert_eq!(format_repair_ref(2026, 1), "2026/0001");
        assert_eq!(format_repair_ref(2026, 42), "2026/0042");
        assert_eq!(format_repair_ref(2026, 9999), "2026/9999");
    }

    #[test]
    fn large_sequences_are_not_truncated() {
        assert_eq!(format_repair_ref(2026, 12345), "2026/12345");
    }

    #[test]
    fn priority_defaults_to_normal() {
        assert_eq!(Priority::default(), Priority::Normal);
    }

    #[test]
    fn priority_serializes_lowercase() {
        let json = serde_json::to_string(&Priority::Urgent).unwrap();
        assert_eq!(json, "\"urgent\"");
    }
}
