//! Holiday calendar entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::HolidayId;

/// The category tag of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HolidayCategory {
    /// A public holiday.
    #[default]
    Public,
    /// An optional holiday employees may take.
    Optional,
    /// A company-wide event.
    #[serde(rename = "Company Event")]
    CompanyEvent,
}

/// A named date in the holiday registry.
///
/// Several holidays may share a date; each is an independent entry.
///
/// # Example
///
/// ```
/// use xtrack::models::{Holiday, HolidayCategory};
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     id: 1,
///     name: "New Year".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     category: HolidayCategory::Public,
/// };
/// assert!(holiday.falls_on(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Registry-assigned identifier.
    pub id: HolidayId,
    /// Display name.
    pub name: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// Category tag.
    #[serde(default)]
    pub category: HolidayCategory,
}

impl Holiday {
    /// Returns true if the holiday falls on `date`.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}
