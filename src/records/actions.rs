//! Action queries and board ordering.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::draft_row;
use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::{Action, ActionStatus, Priority};

const TABLE: &str = "actions";

#[derive(Debug, Clone, Serialize)]
pub struct ActionDraft {
    pub title: String,
    pub status: ActionStatus,
    pub priority: Priority,
    pub start_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub grid_area: Option<String>,
    pub tags: Vec<String>,
    pub focus: bool,
}

fn status_value(status: ActionStatus) -> &'static str {
    match status {
        ActionStatus::Open => "open",
        ActionStatus::Doing => "doing",
        ActionStatus::Waiting => "waiting",
        ActionStatus::Done => "done",
        ActionStatus::Archived => "archived",
    }
}

/// List actions, optionally narrowed by status or the focus flag. Ordered
/// by due date store-side; board ordering is applied by `sort_for_board`.
pub async fn list(
    store: &StoreClient,
    session: &Session,
    status: Option<ActionStatus>,
    focus_only: bool,
) -> Result<Vec<Action>, StoreError> {
    let mut query = store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .order("due_date", Order::Asc);
    if let Some(status) = status {
        query = query.eq("status", status_value(status));
    }
    if focus_only {
        query = query.eq("focus", "true");
    }
    query.fetch(session).await
}

pub async fn get(store: &StoreClient, session: &Session, id: Uuid) -> Result<Action, StoreError> {
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
    draft: &ActionDraft,
) -> Result<Action, StoreError> {
    store.insert(TABLE, draft_row(draft, session)?, session).await
}

pub async fn update(
    store: &StoreClient,
    session: &Session,
    id: Uuid,
    draft: &ActionDraft,
) -> Result<Action, StoreError> {
    store
        .update(TABLE, id, serde_json::to_value(draft)?, session)
        .await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}

/// Board ordering: priority high-first, then due date ascending with
/// dateless actions last.
pub fn sort_for_board(actions: &mut [Action]) {
    actions.sort_by(|a, b| {
        b.priority.cmp(&a.priority).then_with(|| {
            match (a.due_date, b.due_date) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        })
    });
}
