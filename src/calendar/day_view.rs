//! Day-view membership and placement.
//!
//! An action qualifies for a day when its effective interval overlaps the
//! day's inclusive [00:00:00.000, 23:59:59.999] window, or when it is
//! overdue relative to that day (effective end before day start, status
//! not Done) and carries forward. Placement clamps to the visible
//! 06:00–21:00 sub-window; items entirely outside it go to an off-grid
//! list instead of the timed grid.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use uuid::Uuid;

use super::clock::{self, GridPosition};
use super::constants::{
    DEFAULT_MEETING_MINUTES, GRID_END_HOUR, GRID_START_HOUR, MIN_BLOCK_UNITS, OVERDUE_BLOCK_UNITS,
};
use crate::types::{Action, ActionStatus, Meeting, WorkEntry};

/// The effective [start, end] instant pair of an action: each bound falls
/// back to the other when absent. `None` when the action has no dates.
pub fn effective_interval(action: &Action) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = action.start_date.or(action.due_date)?;
    let end = action.due_date.or(action.start_date)?;
    Some((start, end))
}

/// UTC instants bounding the day's inclusive membership window in `tz`.
pub fn day_bounds(day: NaiveDate, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz
        .from_local_datetime(&day.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let end = tz
        .from_local_datetime(&day.and_hms_milli_opt(23, 59, 59, 999)?)
        .latest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

fn visible_bounds(day: NaiveDate, tz: &Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = tz
        .from_local_datetime(&day.and_hms_opt(GRID_START_HOUR, 0, 0)?)
        .earliest()?;
    let end = tz
        .from_local_datetime(&day.and_hms_opt(GRID_END_HOUR, 0, 0)?)
        .earliest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// How an action relates to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMembership {
    /// The effective interval overlaps the day.
    Scheduled,
    /// Effective end precedes the day start and the action is not Done.
    Overdue,
}

/// Membership test for the day view. Overlap wins over overdue: an action
/// whose effective end lies inside the day (for example due at 00:30) is
/// Scheduled for that day, never Overdue.
pub fn day_membership(action: &Action, day: NaiveDate, tz: &Tz) -> Option<DayMembership> {
    let (start, end) = effective_interval(action)?;
    let (day_start, day_end) = day_bounds(day, tz)?;
    if start <= day_end && end >= day_start {
        return Some(DayMembership::Scheduled);
    }
    if end < day_start && action.status != ActionStatus::Done {
        return Some(DayMembership::Overdue);
    }
    None
}

/// True iff the action's effective end precedes the start of `today` and
/// its status is not Done.
pub fn is_overdue(action: &Action, today: NaiveDate, tz: &Tz) -> bool {
    matches!(
        day_membership(action, today, tz),
        Some(DayMembership::Overdue)
    )
}

/// Visual placement of an action on a day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionPlacement {
    /// Pinned small block at the top of the grid.
    Overdue(GridPosition),
    /// Positioned on the timed grid, clamped to visible hours.
    Timed(GridPosition),
    /// Member of the day but entirely outside 06:00–21:00.
    OutsideHours,
}

/// Compute the placement of an action for a day, or `None` when the
/// action does not qualify for that day at all.
pub fn place_action(action: &Action, day: NaiveDate, tz: &Tz) -> Option<ActionPlacement> {
    match day_membership(action, day, tz)? {
        DayMembership::Overdue => Some(ActionPlacement::Overdue(GridPosition {
            top: 0.0,
            height: OVERDUE_BLOCK_UNITS,
        })),
        DayMembership::Scheduled => {
            let (start, end) = effective_interval(action)?;
            let (visible_start, visible_end) = visible_bounds(day, tz)?;
            let clamped_start = start.max(visible_start);
            let clamped_end = end.min(visible_end);
            if clamped_end <= clamped_start {
                return Some(ActionPlacement::OutsideHours);
            }
            let minutes = (clamped_end - clamped_start).num_minutes();
            let local_start = clamped_start.with_timezone(tz).time();
            let mut position = clock::grid_position_local(local_start, minutes)?;
            position.top = position.top.max(0.0);
            position.height = position.height.max(MIN_BLOCK_UNITS);
            Some(ActionPlacement::Timed(position))
        }
    }
}

/// Place a meeting using the fixed default duration. Meetings have exactly
/// one instant; pre-06:00 meetings yield `None` and are listed off-grid.
pub fn place_meeting(meeting: &Meeting, tz: &Tz) -> Option<GridPosition> {
    clock::grid_position(meeting.date_time, DEFAULT_MEETING_MINUTES, tz)
}

/// Translucent band for a work entry, on the same scale as timed items and
/// independent of the stacking above it. A start before 06:00 clamps to
/// the grid origin; the band only disappears when it ends before 06:00.
pub fn work_band(entry: &WorkEntry) -> Option<GridPosition> {
    let start = clock::parse_hhmm(entry.start_time.as_deref()?)?;
    let end = clock::parse_hhmm(entry.end_time.as_deref()?)?;
    let grid_start = NaiveTime::from_hms_opt(GRID_START_HOUR, 0, 0)?;
    let start = start.max(grid_start);
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return None;
    }
    clock::grid_position_local(start, minutes)
}

// ============================================================================
// Day schedule assembly
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayItemKind {
    Meeting,
    Action,
}

/// A record reference prepared for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct DayItem {
    pub kind: DayItemKind,
    pub id: Uuid,
    pub title: String,
    /// Local `HH:MM` label for meetings; actions carry no single instant.
    pub time_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub item: DayItem,
    pub position: GridPosition,
}

/// Everything the day screen renders for one date.
#[derive(Debug, Clone, Default)]
pub struct DaySchedule {
    /// Items on the timed grid, sorted by vertical position.
    pub timed: Vec<PlacedItem>,
    /// Overdue carry-forward actions, pinned at the top.
    pub overdue: Vec<PlacedItem>,
    /// Members of the day that fall outside visible hours.
    pub off_grid: Vec<DayItem>,
    pub work_band: Option<GridPosition>,
}

/// Assemble the day view from the raw per-entity fetches. Meetings not on
/// `day` are ignored, so callers may pass a wider window.
pub fn build_day_schedule(
    day: NaiveDate,
    meetings: &[Meeting],
    actions: &[Action],
    work: Option<&WorkEntry>,
    tz: &Tz,
) -> DaySchedule {
    let mut schedule = DaySchedule::default();

    for meeting in meetings {
        if !clock::same_day(Some(meeting.date_time), Some(day), tz) {
            continue;
        }
        let item = DayItem {
            kind: DayItemKind::Meeting,
            id: meeting.id,
            title: meeting.title.clone(),
            time_label: Some(clock::format_time(meeting.date_time, tz)),
        };
        match place_meeting(meeting, tz) {
            Some(position) => schedule.timed.push(PlacedItem { item, position }),
            None => schedule.off_grid.push(item),
        }
    }

    for action in actions {
        let Some(placement) = place_action(action, day, tz) else {
            continue;
        };
        let item = DayItem {
            kind: DayItemKind::Action,
            id: action.id,
            title: action.title.clone(),
            time_label: None,
        };
        match placement {
            ActionPlacement::Timed(position) => {
                schedule.timed.push(PlacedItem { item, position });
            }
            ActionPlacement::Overdue(position) => {
                schedule.overdue.push(PlacedItem { item, position });
            }
            ActionPlacement::OutsideHours => schedule.off_grid.push(item),
        }
    }

    schedule.timed.sort_by(|a, b| {
        a.position
            .top
            .partial_cmp(&b.position.top)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    schedule.work_band = work.and_then(work_band);

    schedule
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;

    fn berlin() -> Tz {
        "Europe/Berlin".parse().unwrap()
    }

    fn local(tz: &Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        tz.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap().to_utc()
    }

    fn make_action(
        start: Option<DateTime<Utc>>,
        due: Option<DateTime<Utc>>,
        status: ActionStatus,
    ) -> Action {
        Action {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Test action".to_string(),
            status,
            priority: Priority::Medium,
            start_date: start,
            due_date: due,
            description: None,
            grid_area: None,
            tags: vec![],
            focus: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn make_meeting(date_time: DateTime<Utc>) -> Meeting {
        Meeting {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Standup".to_string(),
            date_time,
            location: None,
            participants: None,
            notes: None,
            decisions: None,
            grid_area: None,
            tags: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn make_work_entry(start: Option<&str>, end: Option<&str>) -> WorkEntry {
        WorkEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            start_time: start.map(|s| s.to_string()),
            end_time: end.map(|s| s.to_string()),
            break_minutes: 0,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_effective_interval_fallbacks() {
        let tz = berlin();
        let instant = local(&tz, 2024, 3, 5, 9, 0);

        let due_only = make_action(None, Some(instant), ActionStatus::Open);
        assert_eq!(effective_interval(&due_only), Some((instant, instant)));

        let start_only = make_action(Some(instant), None, ActionStatus::Open);
        assert_eq!(effective_interval(&start_only), Some((instant, instant)));

        let dateless = make_action(None, None, ActionStatus::Open);
        assert!(effective_interval(&dateless).is_none());
    }

    #[test]
    fn test_overdue_yesterday_open() {
        let tz = berlin();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let yesterday = local(&tz, 2024, 3, 4, 9, 0);

        let action = make_action(None, Some(yesterday), ActionStatus::Open);
        assert!(is_overdue(&action, today, &tz));
        assert_eq!(
            day_membership(&action, today, &tz),
            Some(DayMembership::Overdue)
        );
        match place_action(&action, today, &tz) {
            Some(ActionPlacement::Overdue(pos)) => {
                assert_eq!(pos.top, 0.0);
                assert_eq!(pos.height, OVERDUE_BLOCK_UNITS);
            }
            other => panic!("expected overdue placement, got {other:?}"),
        }
    }

    #[test]
    fn test_done_is_never_overdue() {
        let tz = berlin();
        let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let yesterday = local(&tz, 2024, 3, 4, 9, 0);

        let action = make_action(None, Some(yesterday), ActionStatus::Done);
        assert!(!is_overdue(&action, today, &tz));
        assert!(day_membership(&action, today, &tz).is_none());
        assert!(place_action(&action, today, &tz).is_none());
    }

    #[test]
    fn test_spanning_action_covers_middle_day() {
        let tz = berlin();
        // start day-2 09:00, due day+1 09:00; middle day is the 5th
        let start = local(&tz, 2024, 3, 3, 9, 0);
        let due = local(&tz, 2024, 3, 6, 9, 0);
        let middle = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let action = make_action(Some(start), Some(due), ActionStatus::Doing);
        assert_eq!(
            day_membership(&action, middle, &tz),
            Some(DayMembership::Scheduled)
        );

        // Clamps to the full 06:00–21:00 visible window: 15h tall from top 0
        match place_action(&action, middle, &tz) {
            Some(ActionPlacement::Timed(pos)) => {
                assert_eq!(pos.top, 0.0);
                assert_eq!(pos.height, 15.0 * 64.0);
            }
            other => panic!("expected timed placement, got {other:?}"),
        }
    }

    #[test]
    fn test_due_just_after_midnight_is_scheduled_off_grid() {
        // Design choice: overlap wins over overdue near the midnight
        // boundary, and the pre-06:00 interval routes off-grid.
        let tz = berlin();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let half_past_midnight = local(&tz, 2024, 3, 5, 0, 30);

        let action = make_action(None, Some(half_past_midnight), ActionStatus::Open);
        assert_eq!(
            day_membership(&action, day, &tz),
            Some(DayMembership::Scheduled)
        );
        assert_eq!(
            place_action(&action, day, &tz),
            Some(ActionPlacement::OutsideHours)
        );
    }

    #[test]
    fn test_short_action_gets_min_height() {
        let tz = berlin();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let start = local(&tz, 2024, 3, 5, 10, 0);
        let due = local(&tz, 2024, 3, 5, 10, 10);

        let action = make_action(Some(start), Some(due), ActionStatus::Open);
        match place_action(&action, day, &tz) {
            Some(ActionPlacement::Timed(pos)) => {
                assert_eq!(pos.top, 4.0 * 64.0);
                assert_eq!(pos.height, MIN_BLOCK_UNITS);
            }
            other => panic!("expected timed placement, got {other:?}"),
        }
    }

    #[test]
    fn test_evening_action_clamps_to_window_end() {
        let tz = berlin();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let start = local(&tz, 2024, 3, 5, 20, 0);
        let due = local(&tz, 2024, 3, 5, 23, 0);

        let action = make_action(Some(start), Some(due), ActionStatus::Open);
        match place_action(&action, day, &tz) {
            Some(ActionPlacement::Timed(pos)) => {
                assert_eq!(pos.top, 14.0 * 64.0);
                assert_eq!(pos.height, 64.0); // 20:00–21:00 after clamping
            }
            other => panic!("expected timed placement, got {other:?}"),
        }
    }

    #[test]
    fn test_work_band() {
        let band = work_band(&make_work_entry(Some("08:00"), Some("16:30"))).unwrap();
        assert_eq!(band.top, 2.0 * 64.0);
        assert_eq!(band.height, 8.5 * 64.0);

        assert!(work_band(&make_work_entry(None, Some("16:00"))).is_none());
        assert!(work_band(&make_work_entry(Some("16:00"), Some("08:00"))).is_none());
    }

    #[test]
    fn test_work_band_clamps_early_start() {
        // 05:00 start clamps to the 06:00 origin; only the visible span counts
        let band = work_band(&make_work_entry(Some("05:00"), Some("14:00"))).unwrap();
        assert_eq!(band.top, 0.0);
        assert_eq!(band.height, 8.0 * 64.0);

        // Entirely before the grid: nothing to draw
        assert!(work_band(&make_work_entry(Some("04:00"), Some("05:30"))).is_none());
    }

    #[test]
    fn test_build_day_schedule_sorts_and_routes() {
        let tz = berlin();
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let meetings = vec![
            make_meeting(local(&tz, 2024, 3, 5, 14, 0)),
            make_meeting(local(&tz, 2024, 3, 5, 9, 0)),
            make_meeting(local(&tz, 2024, 3, 5, 5, 30)), // pre-grid
            make_meeting(local(&tz, 2024, 3, 6, 9, 0)),  // other day
        ];
        let actions = vec![
            make_action(
                Some(local(&tz, 2024, 3, 5, 11, 0)),
                Some(local(&tz, 2024, 3, 5, 12, 0)),
                ActionStatus::Open,
            ),
            make_action(None, Some(local(&tz, 2024, 3, 1, 9, 0)), ActionStatus::Open),
        ];
        let work = make_work_entry(Some("08:00"), Some("17:00"));

        let schedule = build_day_schedule(day, &meetings, &actions, Some(&work), &tz);

        // 9:00 meeting, 11:00 action, 14:00 meeting — in that order
        assert_eq!(schedule.timed.len(), 3);
        assert_eq!(schedule.timed[0].item.time_label.as_deref(), Some("09:00"));
        assert_eq!(schedule.timed[1].item.kind, DayItemKind::Action);
        assert_eq!(schedule.timed[2].item.time_label.as_deref(), Some("14:00"));

        assert_eq!(schedule.overdue.len(), 1);
        assert_eq!(schedule.off_grid.len(), 1); // the 05:30 meeting
        assert!(schedule.work_band.is_some());
    }
}
