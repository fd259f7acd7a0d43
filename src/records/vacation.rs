//! Vacation ledger queries. Append-only; the balance is derived on read
//! via `metrics::vacation_balance`.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{Order, Session, StoreClient};
use crate::types::{VacationKind, VacationTransaction};

const TABLE: &str = "vacation_transactions";

pub async fn list(
    store: &StoreClient,
    session: &Session,
) -> Result<Vec<VacationTransaction>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .order("date", Order::Desc)
        .fetch(session)
        .await
}

pub async fn list_for_year(
    store: &StoreClient,
    session: &Session,
    year: i32,
) -> Result<Vec<VacationTransaction>, StoreError> {
    store
        .table(TABLE)
        .eq("user_id", session.user_id)
        .gte("date", format!("{year}-01-01"))
        .lte("date", format!("{year}-12-31"))
        .order("date", Order::Desc)
        .fetch(session)
        .await
}

pub async fn append(
    store: &StoreClient,
    session: &Session,
    date: NaiveDate,
    kind: VacationKind,
    hours: f64,
    notes: Option<&str>,
) -> Result<VacationTransaction, StoreError> {
    let row = serde_json::json!({
        "user_id": session.user_id,
        "date": date,
        "type": kind,
        "hours": hours,
        "notes": notes,
    });
    store.insert(TABLE, row, session).await
}

pub async fn delete(store: &StoreClient, session: &Session, id: Uuid) -> Result<(), StoreError> {
    store.delete(TABLE, id, session).await
}
