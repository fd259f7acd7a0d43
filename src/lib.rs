//! Daybook: a personal operating layer for the working day.
//!
//! Meetings, actions, journal entries, knowledge pages and time tracking
//! live in a managed record store; this crate owns the calendar and
//! placement logic, the derived metrics and the typed client for that
//! store. All local-day semantics go through an explicit timezone held
//! in [`state::AppContext`].

pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod records;
pub mod screen;
pub mod state;
pub mod store;
pub mod types;
