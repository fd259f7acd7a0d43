//! Meeting queries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::draft_row;
use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::Meeting;

const TABLE: &str = "meetings";

/// User-editable meeting fields, used for create and full-record update.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingDraft {
    pub title: String,
    pub date_time: DateTime<Utc>,
    pub location: Option<String>,
    pub participants: Option<String>,
    pub notes: Option<String>,
    pub decisions: Option<String>,
    pub grid_area: Option<String>,
    pub tags: Vec<String>,
}

pub async fn list(store: &StoreClient, session: &Session) -> Result<Vec<Meeting>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .order("date_time", Order::Asc)
        .fetch(session)
        .await
}

/// Meetings whose instant falls inside [from, to], ascending.
pub async fn list_between(
    store: &StoreClient,
    session: &Session,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<Meeting>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .gte("date_time", from.to_rfc3339())
        .lte("date_time", to.to_rfc3339())
        .order("date_time", Order::Asc)
        .fetch(session)
        .await
}

pub async fn get(store: &StoreClient, session: &Session, id: Uuid) -> Result<Meeting, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .eq("id", id)
        .single(session)
        .await
}

pub async fn create(
    store: &StoreClient,
    session: &Session,
    draft: &MeetingDraft,
) -> Result<Meeting, StoreError> {
    store.insert(TABLE, draft_row(draft, session)?, session).await
}

pub async fn update(
    store: &StoreClient,
    session: &Session,
    id: Uuid,
    draft: &MeetingDraft,
) -> Result<Meeting, StoreError> {
    store
        .update(TABLE, id, serde_json::to_value(draft)?, session)
        .await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}
