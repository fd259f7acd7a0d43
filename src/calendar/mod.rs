//! Calendar core: date/time utilities, day-view placement and month-grid
//! generation.
//!
//! All "local" semantics are relative to an explicit `chrono_tz::Tz`
//! threaded through by the caller — never a process-global timezone.

pub mod clock;
pub mod constants;
pub mod day_view;
pub mod month_view;
