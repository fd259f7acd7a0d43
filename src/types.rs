//! Domain entities as they cross the wire to the managed record store.
//!
//! Column names are the store's snake_case names. Timestamps are ISO-8601;
//! per-day ledger entities (journal, work, overtime, vacation) carry a
//! date-only `YYYY-MM-DD` column. `id`, `created_at` and `updated_at` are
//! assigned by the store on insert.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Enums
// ============================================================================

/// Action lifecycle status. `Archived` is a terminal state chosen by the
/// user; there is no soft-delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Open,
    Doing,
    Waiting,
    Done,
    Archived,
}

/// Action priority. Ordered so `High > Medium > Low` for board sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Kind of a vacation ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationKind {
    Grant,
    Purchase,
    Usage,
    Adjustment,
}

// ============================================================================
// Entities
// ============================================================================

/// A meeting: a single point in time, no modeled duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub participants: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub decisions: Option<String>,
    /// Free-text project/area label, unrelated to the visual grid.
    #[serde(default)]
    pub grid_area: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A task. Either of `start_date`/`due_date` may be absent; the effective
/// interval falls back from one to the other (see `calendar::day_view`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub status: ActionStatus,
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub grid_area: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub focus: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One journal entry per user per date. Uniqueness is enforced store-side
/// via the upsert conflict target `(user_id, date)`, not by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub content: String,
    /// Referential links; not enforced as foreign keys at this layer.
    #[serde(default)]
    pub meeting_ids: Vec<Uuid>,
    #[serde(default)]
    pub action_ids: Vec<Uuid>,
    #[serde(default)]
    pub knowledge_ids: Vec<Uuid>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A knowledge base page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgePage {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub grid_area: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A tag. Name uniqueness per user is convention, not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A grid-area label (project/area grouping).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridArea {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One work entry per user per date (store-enforced via upsert target).
/// Start/end are local time-of-day strings like "08:30".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Append-only overtime ledger entry: a signed minute delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeAdjustment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub minutes: i64,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Append-only vacation ledger entry. The balance is always derived
/// (`metrics::vacation_balance`), never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: VacationKind,
    pub hours: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ActionStatus::Waiting).unwrap(),
            "\"waiting\""
        );
        let parsed: ActionStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, ActionStatus::Archived);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_action_row_from_store_json() {
        // Shape as the store returns it: nulls for absent optionals,
        // timestamptz with offset.
        let row = r#"{
            "id": "8f9f4a80-3a2e-4a15-9f48-111111111111",
            "user_id": "8f9f4a80-3a2e-4a15-9f48-222222222222",
            "title": "Renew passport",
            "status": "open",
            "priority": "high",
            "start_date": null,
            "due_date": "2024-03-05T09:00:00+00:00",
            "description": null,
            "grid_area": "Admin",
            "tags": ["errand"],
            "focus": true,
            "created_at": "2024-02-01T08:00:00+00:00",
            "updated_at": "2024-02-20T08:00:00+00:00"
        }"#;
        let action: Action = serde_json::from_str(row).unwrap();
        assert_eq!(action.status, ActionStatus::Open);
        assert!(action.start_date.is_none());
        assert!(action.due_date.is_some());
        assert!(action.focus);
        assert_eq!(action.tags, vec!["errand"]);
    }

    #[test]
    fn test_vacation_kind_uses_type_column() {
        let row = r#"{
            "id": "8f9f4a80-3a2e-4a15-9f48-333333333333",
            "user_id": "8f9f4a80-3a2e-4a15-9f48-222222222222",
            "date": "2024-01-01",
            "type": "grant",
            "hours": 80.0
        }"#;
        let tx: VacationTransaction = serde_json::from_str(row).unwrap();
        assert_eq!(tx.kind, VacationKind::Grant);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "grant");
    }

    #[test]
    fn test_work_entry_defaults() {
        let row = r#"{
            "id": "8f9f4a80-3a2e-4a15-9f48-444444444444",
            "user_id": "8f9f4a80-3a2e-4a15-9f48-222222222222",
            "date": "2024-03-05"
        }"#;
        let entry: WorkEntry = serde_json::from_str(row).unwrap();
        assert!(entry.start_time.is_none());
        assert_eq!(entry.break_minutes, 0);
    }
}
