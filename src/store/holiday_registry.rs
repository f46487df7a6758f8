//! The holiday registry.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{XtrackError, XtrackResult};
use crate::models::{Holiday, HolidayCategory, HolidayId};

/// Named dates keyed by id. Several entries may share a date.
#[derive(Debug, Clone, Default)]
pub struct HolidayRegistry {
    holidays: BTreeMap<HolidayId, Holiday>,
    last_id: HolidayId,
}

impl HolidayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a holiday.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::Validation`] if the name is blank.
    pub fn create(
        &mut self,
        name: &str,
        date: NaiveDate,
        category: HolidayCategory,
    ) -> XtrackResult<Holiday> {
        let name = name.trim();
        if name.is_empty() {
            return Err(XtrackError::validation("name", "must not be blank"));
        }

        self.last_id += 1;
        let holiday = Holiday {
            id: self.last_id,
            name: name.to_string(),
            date,
            category,
        };
        debug!(holiday_id = holiday.id, date = %date, "Holiday created");
        self.holidays.insert(holiday.id, holiday.clone());
        Ok(holiday)
    }

    /// Removes a holiday.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::NotFound`] if `id` is unknown.
    pub fn delete(&mut self, id: HolidayId) -> XtrackResult<Holiday> {
        self.holidays
            .remove(&id)
            .ok_or_else(|| XtrackError::not_found("holiday", id))
    }

    /// Every holiday, ordered by date then id.
    pub fn list(&self) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self.holidays.values().cloned().collect();
        holidays.sort_by_key(|h| (h.date, h.id));
        holidays
    }

    /// Holidays between `start` and `end`, both inclusive, ordered by date.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        self.list()
            .into_iter()
            .filter(|h| h.date >= start && h.date <= end)
            .collect()
    }
}
