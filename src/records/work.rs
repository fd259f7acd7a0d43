//! Work entries and the overtime ledger.
//!
//! Work entries are per-day-unique via the store's `(user_id, date)`
//! upsert target. The running overtime balance is a server-side aggregate
//! and is authoritative; client-side derivations (`metrics`) only cover
//! single days.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::draft_row;
use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::{OvertimeAdjustment, WorkEntry};

const TABLE: &str = "work_entries";
const ADJUSTMENTS: &str = "overtime_adjustments";
const CONFLICT_TARGET: &str = "user_id,date";

#[derive(Debug, Clone, Serialize)]
pub struct WorkEntryDraft {
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub break_minutes: i64,
    pub notes: Option<String>,
}

pub async fn entry_for_date(
    store: &StoreClient,
    session: &Session,
    date: NaiveDate,
) -> Result<Option<WorkEntry>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .eq("date", date)
        .maybe_single(session)
        .await
}

pub async fn list_between(
    store: &StoreClient,
    session: &Session,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<WorkEntry>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .gte("date", from)
        .lte("date", to)
        .order("date", Order::Asc)
        .fetch(session)
        .await
}

/// Insert-or-replace the entry for the draft's date.
pub async fn upsert(
    store: &StoreClient,
    session: &Session,
    draft: &WorkEntryDraft,
) -> Result<WorkEntry, StoreError> {
    store
        .upsert(TABLE, draft_row(draft, session)?, CONFLICT_TARGET, session)
        .await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}

/// Append a signed manual adjustment to the overtime ledger.
pub async fn add_adjustment(
    store: &StoreClient,
    session: &Session,
    date: NaiveDate,
    minutes: i64,
    reason: Option<&str>,
) -> Result<OvertimeAdjustment, StoreError> {
    let row = serde_json::json!({
        "user_id": session.user_id,
        "date": date,
        "minutes": minutes,
        "reason": reason,
    });
    store.insert(ADJUSTMENTS, row, session).await
}

pub async fn list_adjustments(
    store: &StoreClient,
    session: &Session,
) -> Result<Vec<OvertimeAdjustment>, StoreError> {
    store
        .table(ADJUSTMENTS)
        .eq("user_id", session.user_id)
        .order("date", Order::Desc)
        .fetch(session)
        .await
}

/// The precomputed running overtime balance in minutes, from the store's
/// aggregate function. Authoritative — not derived client-side.
pub async fn overtime_balance(store: &StoreClient, session: &Session) -> Result<f64, StoreError> {
    store
        .rpc(
            "overtime_balance",
            serde_json::json!({ "uid": session.user_id }),
            session,
        )
        .await
}
