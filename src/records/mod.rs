//! Record access layer: thin per-entity query wrappers over the store.
//!
//! Every query is scoped to the signed-in user's rows. Writes go through
//! drafts (the user-editable fields); the store assigns ids and
//! timestamps. Nothing here caches — screens hold the only in-memory
//! state.

pub mod actions;
pub mod journal;
pub mod knowledge;
pub mod meetings;
pub mod tags;
pub mod vacation;
pub mod work;

use serde::Serialize;

use crate::error::StoreError;
use crate::store::Session;

/// Serialize a draft and stamp the owning user id onto the row.
pub(crate) fn draft_row<T: Serialize>(
    draft: &T,
    session: &Session,
) -> Result<serde_json::Value, StoreError> {
    let mut row = serde_json::to_value(draft)?;
    row["user_id"] = serde_json::json!(session.user_id);
    Ok(row)
}
