//! Fixed parameters of the visual day grid and the workday.

/// First hour shown on the timed grid. Items starting earlier are routed
/// to the off-grid list, never dropped.
pub const GRID_START_HOUR: u32 = 6;

/// Last hour of the visible day window (exclusive end at 21:00).
pub const GRID_END_HOUR: u32 = 21;

/// Vertical pixel-equivalent units per hour.
pub const UNITS_PER_HOUR: f64 = 64.0;

/// Minimum rendered height so short items stay clickable.
pub const MIN_BLOCK_UNITS: f64 = 24.0;

/// Height of the fixed overdue block pinned at the top of the grid.
pub const OVERDUE_BLOCK_UNITS: f64 = 32.0;

/// Meetings have no modeled duration; placement assumes one hour.
pub const DEFAULT_MEETING_MINUTES: i64 = 60;

/// Standard workday length used for daily overtime.
pub const STANDARD_WORKDAY_MINUTES: i64 = 480;
