//! Calculation logic for Xtrack.
//!
//! This module contains the pure derivations over the store: month calendar
//! composition (Sundays, non-working Saturdays, holidays, working days),
//! paid/unpaid leave partitioning, the monthly salary aggregator, the
//! calendar projection and the leave history summary.

mod calendar_projection;
mod leave_history;
mod leave_partition;
mod month_calendar;
mod salary;

pub use calendar_projection::{MAX_PROJECTION_DAYS, month_view_range, project_calendar};
pub use leave_history::summarize_leave_history;
pub use leave_partition::{LeavePartition, leave_days_between, partition_leave_days};
pub use month_calendar::{
    MonthCalendar, compose_month, count_weekday, days_in_month, is_working_day, month_bounds,
    month_key, parse_month_key,
};
pub use salary::{calculate_payroll, calculate_salary, round_money};
