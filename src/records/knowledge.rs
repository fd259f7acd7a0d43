//! Knowledge base queries.

use serde::Serialize;
use uuid::Uuid;

use super::draft_row;
use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::KnowledgePage;

const TABLE: &str = "knowledge_pages";

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeDraft {
    pub title: String,
    pub content: String,
    pub grid_area: Option<String>,
    pub tags: Vec<String>,
    pub pinned: bool,
}

/// All pages, pinned first, then by title.
pub async fn list(store: &StoreClient, session: &Session) -> Result<Vec<KnowledgePage>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .order("pinned", Order::Desc)
        .order("title", Order::Asc)
        .fetch(session)
        .await
}

pub async fn list_by_grid_area(
    store: &StoreClient,
    session: &Session,
    grid_area: &str,
) -> Result<Vec<KnowledgePage>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .eq("grid_area", grid_area)
        .order("title", Order::Asc)
        .fetch(session)
        .await
}

pub async fn list_by_tag(
    store: &StoreClient,
    session: &Session,
    tag: &str,
) -> Result<Vec<KnowledgePage>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .contains("tags", tag)
        .order("title", Order::Asc)
        .fetch(session)
        .await
}

pub async fn create(
    store: &StoreClient,
    session: &Session,
    draft: &KnowledgeDraft,
) -> Result<KnowledgePage, StoreError> {
    store.insert(TABLE, draft_row(draft, session)?, session).await
}

pub async fn update(
    store: &StoreClient,
    session: &Session,
    id: Uuid,
    draft: &KnowledgeDraft,
) -> Result<KnowledgePage, StoreError> {
    store
        .update(TABLE, id, serde_json::to_value(draft)?, session)
        .await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}
