//! The employee directory.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{XtrackError, XtrackResult};
use crate::models::{Employee, EmployeeId};

/// Employees keyed by id.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDirectory {
    employees: BTreeMap<EmployeeId, Employee>,
}

impl EmployeeDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `employees`; later entries win on id clashes.
    pub fn seeded(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: employees.into_iter().map(|e| (e.id, e)).collect(),
        }
    }

    /// Adds an employee with the next free id.
    ///
    /// # Errors
    ///
    /// Returns [`XtrackError::Validation`] for a blank name or a negative salary.
    pub fn create(
        &mut self,
        name: &str,
        base_salary: Decimal,
        joined_on: Option<NaiveDate>,
    ) -> XtrackResult<Employee> {
        let name = name.trim();
        if name.is_empty() {
            return Err(XtrackError::validation("name", "must not be blank"));
        }
        if base_salary.is_sign_negative() {
            return Err(XtrackError::validation("salary", "must not be negative"));
        }

        let id = self.employees.keys().next_back().map_or(1, |last| last + 1);
        let employee = Employee {
            id,
            name: name.to_string(),
            base_salary,
            joined_on,
        };
        debug!(employee_id = id, "Employee created");
        self.employees.insert(id, employee.clone());
        Ok(employee)
    }

    /// Returns an employee by id.
    pub fn get(&self, id: EmployeeId) -> XtrackResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or_else(|| XtrackError::not_found("employee", id))
    }

    /// Every employee, ordered by id.
    pub fn list(&self) -> Vec<Employee> {
        self.employees.values().cloned().collect()
    }

    /// Display name of an employee, if known.
    pub fn name_of(&self, id: EmployeeId) -> Option<&str> {
        self.employees.get(&id).map(|e| e.name.as_str())
    }
}
