//! Derived time-management metrics.
//!
//! Everything here is recomputed on read. The running overtime balance is
//! the one exception: it comes from a server-side aggregate
//! (`records::work::overtime_balance`) and is treated as authoritative.

use crate::calendar::clock::parse_hhmm;
use crate::calendar::constants::STANDARD_WORKDAY_MINUTES;
use crate::types::{VacationKind, VacationTransaction, WorkEntry};

/// Net worked minutes for a day: (end − start) − break, clamped at 0.
/// Entries without both times count as 0.
pub fn worked_minutes(entry: &WorkEntry) -> i64 {
    let times = entry
        .start_time
        .as_deref()
        .and_then(parse_hhmm)
        .zip(entry.end_time.as_deref().and_then(parse_hhmm));
    let Some((start, end)) = times else {
        return 0;
    };
    let gross = (end - start).num_minutes();
    (gross - entry.break_minutes).max(0)
}

pub fn worked_hours(entry: &WorkEntry) -> f64 {
    worked_minutes(entry) as f64 / 60.0
}

/// Daily overtime relative to the fixed 8-hour workday. May be negative.
pub fn daily_overtime_hours(entry: &WorkEntry) -> f64 {
    worked_hours(entry) - STANDARD_WORKDAY_MINUTES as f64 / 60.0
}

/// Derived vacation balance in hours:
/// sum(Grant) + sum(Purchase) + sum(Adjustment) − sum(|Usage|).
///
/// Usage rows subtract by magnitude, so a mis-signed positive Usage row
/// still reduces the balance. Adjustments are signed as stored.
pub fn vacation_balance(transactions: &[VacationTransaction]) -> f64 {
    transactions
        .iter()
        .map(|tx| match tx.kind {
            VacationKind::Grant | VacationKind::Purchase | VacationKind::Adjustment => tx.hours,
            VacationKind::Usage => -tx.hours.abs(),
        })
        .sum()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn make_entry(start: Option<&str>, end: Option<&str>, break_minutes: i64) -> WorkEntry {
        WorkEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            start_time: start.map(|s| s.to_string()),
            end_time: end.map(|s| s.to_string()),
            break_minutes,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn make_tx(kind: VacationKind, hours: f64) -> VacationTransaction {
        VacationTransaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            kind,
            hours,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn test_worked_minutes() {
        assert_eq!(worked_minutes(&make_entry(Some("08:00"), Some("16:30"), 30)), 480);
        assert_eq!(worked_minutes(&make_entry(Some("09:00"), Some("17:00"), 0)), 480);
    }

    #[test]
    fn test_worked_minutes_clamps_at_zero() {
        // End before start
        assert_eq!(worked_minutes(&make_entry(Some("16:00"), Some("08:00"), 0)), 0);
        // Break exceeds span
        assert_eq!(worked_minutes(&make_entry(Some("08:00"), Some("08:30"), 60)), 0);
        // Missing times
        assert_eq!(worked_minutes(&make_entry(None, Some("16:00"), 0)), 0);
    }

    #[test]
    fn test_daily_overtime_may_be_negative() {
        let short = make_entry(Some("09:00"), Some("15:00"), 0); // 6h
        assert!((daily_overtime_hours(&short) + 2.0).abs() < f64::EPSILON);

        let long = make_entry(Some("08:00"), Some("18:00"), 60); // 9h
        assert!((daily_overtime_hours(&long) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vacation_balance_fold() {
        let txs = vec![
            make_tx(VacationKind::Grant, 80.0),
            make_tx(VacationKind::Usage, -16.0),
            make_tx(VacationKind::Purchase, 8.0),
            make_tx(VacationKind::Adjustment, -2.0),
        ];
        assert!((vacation_balance(&txs) - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vacation_usage_subtracts_by_magnitude() {
        // A Usage row recorded with a positive sign still reduces balance
        let txs = vec![
            make_tx(VacationKind::Grant, 40.0),
            make_tx(VacationKind::Usage, 8.0),
        ];
        assert!((vacation_balance(&txs) - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vacation_balance_empty() {
        assert_eq!(vacation_balance(&[]), 0.0);
    }
}
