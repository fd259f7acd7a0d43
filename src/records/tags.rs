//! Tag and grid-area label queries.

use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::{GridArea, Tag};

const TAGS: &str = "tags";
const GRIDS: &str = "grids";

pub async fn list_tags(store: &StoreClient, session: &Session) -> Result<Vec<Tag>, StoreError> {
    store
        .table(TAGS)
        .eq("user_id", session.user_id)
        .order("name", Order::Asc)
        .fetch(session)
        .await
}

pub async fn create_tag(
    store: &StoreClient,
    session: &Session,
    name: &str,
    color: Option<&str>,
) -> Result<Tag, StoreError> {
    let row = serde_json::json!({
        "user_id": session.user_id,
        "name": name,
        "color": color,
    });
    store.insert(TAGS, row, session).await
}

pub async fn delete_tag(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TAGS, id, session).await
}

pub async fn list_grid_areas(
    store: &StoreClient,
    session: &Session,
) -> Result<Vec<GridArea>, StoreError> {
    store
        .table(GRIDS)
        .eq("user_id", session.user_id)
        .order("name", Order::Asc)
        .fetch(session)
        .await
}

pub async fn create_grid_area(
    store: &StoreClient,
    session: &Session,
    name: &str,
) -> Result<GridArea, StoreError> {
    let row = serde_json::json!({
        "user_id": session.user_id,
        "name": name,
    });
    store.insert(GRIDS, row, session).await
}

pub async fn delete_grid_area(
    store: &StoreClient,
    session: &Session,
    id: Uuid,
) -> Result<(), StoreError> {
    store.delete(GRIDS, id, session).await
}
