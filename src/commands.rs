//! Command layer: one async function per screen load or mutation.
//!
//! Commands return `Result<T, String>` with user-facing messages; the
//! structured error is logged here before being flattened. Day loads
//! fail as a batch, month loads degrade per source.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::day_view::{self, DaySchedule};
use crate::calendar::month_view::{self, MonthCell};
use crate::error::StoreError;
use crate::metrics;
use crate::records::{actions, journal, meetings, vacation, work};
use crate::state::AppContext;
use crate::types::{
    Action, JournalEntry, Meeting, OvertimeAdjustment, VacationKind, VacationTransaction,
    WorkEntry,
};

fn flatten<E: std::fmt::Display>(context: &str) -> impl Fn(E) -> String + '_ {
    move |e| {
        log::error!("{context}: {e}");
        e.to_string()
    }
}

// ============================================================================
// Day view
// ============================================================================

#[derive(Debug, Clone)]
pub struct DayData {
    pub date: NaiveDate,
    pub schedule: DaySchedule,
    pub meetings: Vec<Meeting>,
    pub actions: Vec<Action>,
    pub work_entry: Option<WorkEntry>,
}

/// Load everything the day screen needs. The three fetches run in
/// parallel and the load fails as a unit if any of them fails.
pub async fn load_day(ctx: &AppContext, date: NaiveDate) -> Result<DayData, String> {
    let (day_start, day_end) =
        day_view::day_bounds(date, &ctx.tz).ok_or_else(|| format!("invalid day: {date}"))?;

    let (meetings, actions, work_entry) = tokio::try_join!(
        meetings::list_between(&ctx.store, &ctx.session, day_start, day_end),
        actions::list(&ctx.store, &ctx.session, None, false),
        work::entry_for_date(&ctx.store, &ctx.session, date),
    )
    .map_err(flatten("day load"))?;

    let schedule =
        day_view::build_day_schedule(date, &meetings, &actions, work_entry.as_ref(), &ctx.tz);

    Ok(DayData {
        date,
        schedule,
        meetings,
        actions,
        work_entry,
    })
}

// ============================================================================
// Month view
// ============================================================================

#[derive(Debug, Clone)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<MonthCell>,
}

/// Load the month grid. The four sources are independent: a failed
/// source logs a warning and contributes an empty bucket rather than
/// failing the whole screen.
pub async fn load_month(ctx: &AppContext, year: i32, month: u32) -> Result<MonthData, String> {
    let (grid_start, grid_end) = month_view::month_grid_range(year, month)
        .ok_or_else(|| format!("invalid month: {year}-{month:02}"))?;
    let (range_start, _) = day_view::day_bounds(grid_start, &ctx.tz)
        .ok_or_else(|| format!("invalid day: {grid_start}"))?;
    let (_, range_end) = day_view::day_bounds(grid_end, &ctx.tz)
        .ok_or_else(|| format!("invalid day: {grid_end}"))?;

    let (meetings, actions, work_entries, vacation) = tokio::join!(
        meetings::list_between(&ctx.store, &ctx.session, range_start, range_end),
        actions::list(&ctx.store, &ctx.session, None, false),
        work::list_between(&ctx.store, &ctx.session, grid_start, grid_end),
        vacation::list(&ctx.store, &ctx.session),
    );

    fn or_empty<T>(source: &str, result: Result<Vec<T>, StoreError>) -> Vec<T> {
        result.unwrap_or_else(|e| {
            log::warn!("month load: {source} fetch failed: {e}");
            Vec::new()
        })
    }

    let meetings = or_empty("meetings", meetings);
    let actions = or_empty("actions", actions);
    let work_entries = or_empty("work entries", work_entries);
    let vacation = or_empty("vacation", vacation);

    let cells = month_view::build_month_grid(
        year,
        month,
        &meetings,
        &actions,
        &work_entries,
        &vacation,
        &ctx.tz,
    );

    Ok(MonthData { year, month, cells })
}

// ============================================================================
// Time tracking
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DayWorkSummary {
    pub date: NaiveDate,
    pub worked_hours: f64,
    pub overtime_hours: f64,
}

#[derive(Debug, Clone)]
pub struct TimeOverview {
    pub entries: Vec<WorkEntry>,
    pub days: Vec<DayWorkSummary>,
    pub adjustments: Vec<OvertimeAdjustment>,
    /// Running balance in minutes from the store's aggregate; `None`
    /// when that fetch failed.
    pub balance_minutes: Option<f64>,
}

pub(crate) fn summarize_work_days(entries: &[WorkEntry]) -> Vec<DayWorkSummary> {
    entries
        .iter()
        .map(|entry| DayWorkSummary {
            date: entry.date,
            worked_hours: metrics::worked_hours(entry),
            overtime_hours: metrics::daily_overtime_hours(entry),
        })
        .collect()
}

fn assemble_time_overview(
    entries: Result<Vec<WorkEntry>, StoreError>,
    adjustments: Result<Vec<OvertimeAdjustment>, StoreError>,
    balance: Result<f64, StoreError>,
) -> TimeOverview {
    let entries = entries.unwrap_or_else(|e| {
        log::warn!("time overview: work entries fetch failed: {e}");
        Vec::new()
    });
    let adjustments = adjustments.unwrap_or_else(|e| {
        log::warn!("time overview: adjustments fetch failed: {e}");
        Vec::new()
    });
    let balance_minutes = match balance {
        Ok(minutes) => Some(minutes),
        Err(e) => {
            log::warn!("time overview: balance fetch failed: {e}");
            None
        }
    };
    let days = summarize_work_days(&entries);
    TimeOverview {
        entries,
        days,
        adjustments,
        balance_minutes,
    }
}

/// Load the time screen. The three sources are independent: a failed
/// source degrades to empty (or an unavailable balance) rather than
/// blocking the others.
pub async fn load_time_overview(
    ctx: &AppContext,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<TimeOverview, String> {
    let (entries, adjustments, balance) = tokio::join!(
        work::list_between(&ctx.store, &ctx.session, from, to),
        work::list_adjustments(&ctx.store, &ctx.session),
        work::overtime_balance(&ctx.store, &ctx.session),
    );
    Ok(assemble_time_overview(entries, adjustments, balance))
}

pub async fn save_work_entry(
    ctx: &AppContext,
    draft: &work::WorkEntryDraft,
) -> Result<WorkEntry, String> {
    work::upsert(&ctx.store, &ctx.session, draft)
        .await
        .map_err(flatten("work entry save"))
}

pub async fn add_overtime_adjustment(
    ctx: &AppContext,
    date: NaiveDate,
    minutes: i64,
    reason: Option<&str>,
) -> Result<OvertimeAdjustment, String> {
    work::add_adjustment(&ctx.store, &ctx.session, date, minutes, reason)
        .await
        .map_err(flatten("overtime adjustment"))
}

// ============================================================================
// Vacation
// ============================================================================

#[derive(Debug, Clone)]
pub struct VacationOverview {
    pub transactions: Vec<VacationTransaction>,
    pub balance_hours: f64,
}

pub async fn load_vacation(ctx: &AppContext) -> Result<VacationOverview, String> {
    let transactions = vacation::list(&ctx.store, &ctx.session)
        .await
        .map_err(flatten("vacation load"))?;
    let balance_hours = metrics::vacation_balance(&transactions);
    Ok(VacationOverview {
        transactions,
        balance_hours,
    })
}

pub async fn add_vacation_transaction(
    ctx: &AppContext,
    date: NaiveDate,
    kind: VacationKind,
    hours: f64,
    notes: Option<&str>,
) -> Result<VacationTransaction, String> {
    vacation::append(&ctx.store, &ctx.session, date, kind, hours, notes)
        .await
        .map_err(flatten("vacation append"))
}

// ============================================================================
// Journal
// ============================================================================

pub async fn load_journal(
    ctx: &AppContext,
    date: NaiveDate,
) -> Result<Option<JournalEntry>, String> {
    journal::entry_for_date(&ctx.store, &ctx.session, date)
        .await
        .map_err(flatten("journal load"))
}

pub async fn save_journal(
    ctx: &AppContext,
    draft: &journal::JournalDraft,
) -> Result<JournalEntry, String> {
    journal::upsert(&ctx.store, &ctx.session, draft)
        .await
        .map_err(flatten("journal save"))
}

// ============================================================================
// Deletes
// ============================================================================

// Deletes are immediate and unrecoverable; the caller is responsible for
// confirming with the user first.

pub async fn delete_meeting(ctx: &AppContext, id: Uuid) -> Result<(), String> {
    meetings::delete(&ctx.store, &ctx.session, id)
        .await
        .map_err(flatten("meeting delete"))
}

pub async fn delete_action(ctx: &AppContext, id: Uuid) -> Result<(), String> {
    actions::delete(&ctx.store, &ctx.session, id)
        .await
        .map_err(flatten("action delete"))
}

pub async fn delete_work_entry(ctx: &AppContext, id: Uuid) -> Result<(), String> {
    work::delete(&ctx.store, &ctx.session, id)
        .await
        .map_err(flatten("work entry delete"))
}

pub async fn delete_vacation_transaction(ctx: &AppContext, id: Uuid) -> Result<(), String> {
    vacation::delete(&ctx.store, &ctx.session, id)
        .await
        .map_err(flatten("vacation delete"))
}

// ============================================================================
// Tests
// ============================================================================
