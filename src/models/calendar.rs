//! Per-day calendar view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Holiday, LeaveRequest};

/// Everything happening on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The day.
    pub date: NaiveDate,
    /// Holidays falling on the day.
    pub holidays: Vec<Holiday>,
    /// Approved leaves covering the day.
    pub leaves: Vec<LeaveRequest>,
}

impl CalendarDay {
    /// Returns true when nothing is scheduled on the day.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty() && self.leaves.is_empty()
    }
}
