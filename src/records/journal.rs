//! Journal queries. One entry per user per date; writes go through the
//! store's atomic upsert on `(user_id, date)`.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::draft_row;
use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::JournalEntry;

const TABLE: &str = "journal_entries";
const CONFLICT_TARGET: &str = "user_id,date";

#[derive(Debug, Clone, Serialize)]
pub struct JournalDraft {
    pub date: NaiveDate,
    pub content: String,
    pub meeting_ids: Vec<Uuid>,
    pub action_ids: Vec<Uuid>,
    pub knowledge_ids: Vec<Uuid>,
    pub tags: Vec<String>,
}

/// The entry for a date, if one exists.
pub async fn entry_for_date(
    store: &StoreClient,
    session: &Session,
    date: NaiveDate,
) -> Result<Option<JournalEntry>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .eq("date", date)
        .maybe_single(session)
        .await
}

/// Insert-or-replace the entry for the draft's date.
pub async fn upsert(
    store: &StoreClient,
    session: &Session,
    draft: &JournalDraft,
) -> Result<JournalEntry, StoreError> {
    store
        .upsert(TABLE, draft_row(draft, session)?, CONFLICT_TARGET, session)
        .await
}

pub async fn list_recent(
    store: &StoreClient,
    session: &Session,
    limit: u32,
) -> Result<Vec<JournalEntry>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .order("date", Order::Desc)
        .limit(limit)
        .fetch(session)
        .await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}
