//! Configuration types for the Xtrack service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use crate::models::{Employee, EmployeeId, LeaveType};

/// Application metadata and server settings from `app.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppMetadata {
    /// Human-readable name of the deployment.
    pub name: String,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4000,
        }
    }
}

/// Which Saturdays of a month are non-working days.
///
/// The historical payroll always treated exactly one Saturday per month as
/// non-working without saying which; `Fixed { count: 1 }` keeps that.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum NonWorkingSaturdays {
    /// A fixed number of unidentified Saturdays, capped by the Saturdays in the month.
    Fixed {
        /// Number of non-working Saturdays per month.
        count: u32,
    },
    /// The n-th Saturdays of the month (1-based, e.g. `[2, 4]`).
    NthOfMonth {
        /// Which Saturdays are off.
        weeks: Vec<u32>,
    },
    /// Every Saturday is off.
    All,
    /// Every Saturday is a working day.
    None,
}

impl Default for NonWorkingSaturdays {
    fn default() -> Self {
        NonWorkingSaturdays::Fixed { count: 1 }
    }
}

/// The divisor used to derive the per-day rate from the base salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerDayDivisor {
    /// Divide by the number of calendar days in the month.
    #[default]
    CalendarDays,
    /// Divide by the number of working days in the month.
    WorkingDays,
}

/// Payroll policy from `payroll.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollPolicy {
    /// Non-working Saturday rule.
    #[serde(default)]
    pub non_working_saturdays: NonWorkingSaturdays,
    /// Per-day rate divisor.
    #[serde(default)]
    pub per_day_divisor: PerDayDivisor,
    /// Paid leave days allowed per month, by leave type. Types not listed are unpaid.
    #[serde(default)]
    pub paid_leave_days_per_month: HashMap<LeaveType, Decimal>,
    /// Decimal places for money outputs.
    #[serde(default = "default_money_decimal_places")]
    pub money_decimal_places: u32,
}

fn default_money_decimal_places() -> u32 {
    2
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            non_working_saturdays: NonWorkingSaturdays::default(),
            per_day_divisor: PerDayDivisor::default(),
            paid_leave_days_per_month: HashMap::new(),
            money_decimal_places: default_money_decimal_places(),
        }
    }
}

impl PayrollPolicy {
    /// Returns the monthly paid-day allowance for a leave type.
    pub fn paid_allowance(&self, leave_type: LeaveType) -> Decimal {
        self.paid_leave_days_per_month
            .get(&leave_type)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the monthly paid-day allowance summed over every leave type.
    pub fn total_paid_allowance(&self) -> Decimal {
        self.paid_leave_days_per_month.values().copied().sum()
    }
}

/// The role a bearer token grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// HR administrator.
    Admin,
    /// Regular employee.
    Employee,
}

/// One entry of the static token table.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    /// The bearer token value.
    pub token: String,
    /// The granted role.
    pub role: Role,
    /// The employee the token acts for.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

/// Token table from `access.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Known tokens.
    #[serde(default)]
    pub tokens: Vec<AccessToken>,
}

/// Seed employees from the optional `directory.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// Employees present at start-up.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a configuration directory.
#[derive(Debug, Clone)]
pub struct XtrackConfig {
    /// Application metadata.
    metadata: AppMetadata,
    /// Payroll policy.
    payroll: PayrollPolicy,
    /// Bearer token table.
    access: AccessConfig,
    /// Seed employees (sorted by id).
    directory: DirectoryConfig,
}

impl XtrackConfig {
    /// Creates a new XtrackConfig from its component parts.
    pub fn new(
        metadata: AppMetadata,
        payroll: PayrollPolicy,
        access: AccessConfig,
        directory: DirectoryConfig,
    ) -> Self {
        let mut directory = directory;
        directory.employees.sort_by_key(|e| e.id);
        Self {
            metadata,
            payroll,
            access,
            directory,
        }
    }

    /// Returns the application metadata.
    pub fn app(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Returns the payroll policy.
    pub fn payroll(&self) -> &PayrollPolicy {
        &self.payroll
    }

    /// Returns the token table.
    pub fn access(&self) -> &AccessConfig {
        &self.access
    }

    /// Returns the seed employees.
    pub fn seed_employees(&self) -> &[Employee] {
        &self.directory.employees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nth_of_month_policy() {
        let yaml = "policy: nth_of_month\nweeks: [2, 4]\n";
        let policy: NonWorkingSaturdays = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy, NonWorkingSaturdays::NthOfMonth { weeks: vec![2, 4] });
    }

    #[test]
    fn test_payroll_policy_defaults() {
        let policy: PayrollPolicy = serde_yaml::from_str("{}").unwrap();
        assert_eq!(policy.non_working_saturdays, NonWorkingSaturdays::Fixed { count: 1 });
        assert_eq!(policy.per_day_divisor, PerDayDivisor::CalendarDays);
        assert_eq!(policy.money_decimal_places, 2);
        assert_eq!(policy.paid_allowance(LeaveType::Sick), Decimal::ZERO);
    }

    #[test]
    fn test_paid_allowance_by_leave_type() {
        let yaml = "paid_leave_days_per_month:\n  vacation: 1.5\n  sick: 1\n";
        let policy: PayrollPolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.paid_allowance(LeaveType::Vacation), Decimal::new(15, 1));
        assert_eq!(policy.paid_allowance(LeaveType::Sick), Decimal::ONE);
        assert_eq!(policy.paid_allowance(LeaveType::Urgent), Decimal::ZERO);
    }
}
