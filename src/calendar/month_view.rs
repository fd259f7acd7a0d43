//! Month-view grid generation.
//!
//! The month grid is a Monday-aligned 7-column range covering the whole
//! month: it starts at the Monday on/before the 1st and ends at the Sunday
//! on/after the last day. Cells bucket items by exact local date key only —
//! no spanning or overlap semantics, unlike the day view.

use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

use super::clock::same_day;
use crate::types::{Action, Meeting, VacationTransaction, WorkEntry};

/// First and last date of the display range for a month, inclusive.
pub fn month_grid_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month.pred_opt()?;

    let start = first - Duration::days(first.weekday().num_days_from_monday() as i64);
    let end = last + Duration::days(6 - last.weekday().num_days_from_monday() as i64);
    Some((start, end))
}

/// Enumerate every date of the display range, inclusive.
pub fn month_grid_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some((start, end)) = month_grid_range(year, month) else {
        return Vec::new();
    };
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// One cell of the month grid with its exact-date buckets.
#[derive(Debug, Clone)]
pub struct MonthCell {
    pub date: NaiveDate,
    /// False for the leading/trailing padding days of adjacent months.
    pub in_month: bool,
    pub meetings: Vec<Meeting>,
    pub actions: Vec<Action>,
    pub work_entries: Vec<WorkEntry>,
    pub vacation: Vec<VacationTransaction>,
}

/// Build the full month grid. Bucketing keys: meeting `date_time`, action
/// `due_date`, work-entry `date`, vacation `date`.
pub fn build_month_grid(
    year: i32,
    month: u32,
    meetings: &[Meeting],
    actions: &[Action],
    work_entries: &[WorkEntry],
    vacation: &[VacationTransaction],
    tz: &Tz,
) -> Vec<MonthCell> {
    month_grid_days(year, month)
        .into_iter()
        .map(|date| MonthCell {
            date,
            in_month: date.month() == month && date.year() == year,
            meetings: meetings
                .iter()
                .filter(|m| same_day(Some(m.date_time), Some(date), tz))
                .cloned()
                .collect(),
            actions: actions
                .iter()
                .filter(|a| same_day(a.due_date, Some(date), tz))
                .cloned()
                .collect(),
            work_entries: work_entries
                .iter()
                .filter(|w| same_day(Some(w.date), Some(date), tz))
                .cloned()
                .collect(),
            vacation: vacation
                .iter()
                .filter(|v| same_day(Some(v.date), Some(date), tz))
                .cloned()
                .collect(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc, Weekday};
    use uuid::Uuid;

    fn berlin() -> Tz {
        "Europe/Berlin".parse().unwrap()
    }

    #[test]
    fn test_wednesday_start_pads_back_to_monday() {
        // May 2024 starts on a Wednesday and ends on a Friday.
        let (start, end) = month_grid_range(2024, 5).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 4, 29).unwrap()); // Monday
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()); // Sunday
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(end.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_grid_is_whole_weeks() {
        for (year, month) in [(2024, 2), (2024, 5), (2024, 12), (2025, 1)] {
            let days = month_grid_days(year, month);
            assert_eq!(days.len() % 7, 0, "{year}-{month} not whole weeks");
            assert_eq!(days.first().unwrap().weekday(), Weekday::Mon);
            assert_eq!(days.last().unwrap().weekday(), Weekday::Sun);
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_pad() {
        // April 2024 starts on a Monday.
        let (start, _) = month_grid_range(2024, 4).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_exact_date_bucketing() {
        let tz = berlin();
        let meeting_instant = tz.with_ymd_and_hms(2024, 5, 7, 14, 0, 0).unwrap().to_utc();
        let meeting = Meeting {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Review".to_string(),
            date_time: meeting_instant,
            location: None,
            participants: None,
            notes: None,
            decisions: None,
            grid_area: None,
            tags: vec![],
            created_at: None,
            updated_at: None,
        };
        let vacation = VacationTransaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
            kind: crate::types::VacationKind::Usage,
            hours: -8.0,
            notes: None,
            created_at: None,
        };

        let grid = build_month_grid(2024, 5, &[meeting], &[], &[], &[vacation], &tz);
        let cell = grid
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 5, 7).unwrap())
            .unwrap();
        assert!(cell.in_month);
        assert_eq!(cell.meetings.len(), 1);
        assert_eq!(cell.vacation.len(), 1);

        // The padding cell from April carries nothing and is flagged
        let pad = grid
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 4, 29).unwrap())
            .unwrap();
        assert!(!pad.in_month);
        assert!(pad.meetings.is_empty());
    }

    #[test]
    fn test_action_bucketed_by_due_date_only() {
        let tz = berlin();
        let start = Utc.with_ymd_and_hms(2024, 5, 6, 9, 0, 0).unwrap();
        let due = tz.with_ymd_and_hms(2024, 5, 8, 17, 0, 0).unwrap().to_utc();
        let action = crate::types::Action {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Ship it".to_string(),
            status: crate::types::ActionStatus::Open,
            priority: crate::types::Priority::High,
            start_date: Some(start),
            due_date: Some(due),
            description: None,
            grid_area: None,
            tags: vec![],
            focus: false,
            created_at: None,
            updated_at: None,
        };

        let grid = build_month_grid(2024, 5, &[], &[action], &[], &[], &tz);
        let due_cell = grid
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 5, 8).unwrap())
            .unwrap();
        let start_cell = grid
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 5, 6).unwrap())
            .unwrap();
        assert_eq!(due_cell.actions.len(), 1);
        // No spanning in month view: the start day does not bucket it
        assert!(start_cell.actions.is_empty());
    }
}
