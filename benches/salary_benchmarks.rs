//! Performance benchmarks for Xtrack salary aggregation.
//!
//! Covers the pure aggregator over growing directories and the
//! `/api/salary/calculate` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;

use chrono::{Duration, NaiveDate, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

use xtrack::api::{AppState, create_router};
use xtrack::calculation::calculate_payroll;
use xtrack::config::{ConfigLoader, PayrollPolicy};
use xtrack::models::{
    DayType, Employee, Holiday, HolidayCategory, LeaveRequest, LeaveStatus, LeaveType,
};
use xtrack::store::Store;

fn employees(count: u64) -> Vec<Employee> {
    (1..=count)
        .map(|id| Employee {
            id,
            name: format!("Employee {}", id),
            base_salary: Decimal::from(20000 + id * 100),
            joined_on: None,
        })
        .collect()
}

/// Two approved leaves per employee spread over March 2025.
fn leaves(count: u64) -> Vec<LeaveRequest> {
    let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    let types = [LeaveType::Vacation, LeaveType::Sick, LeaveType::Personal, LeaveType::Urgent];
    (1..=count)
        .flat_map(|employee_id| {
            (0..2u64).map(move |n| {
                let start = first + Duration::days(((employee_id * 3 + n * 11) % 27) as i64);
                let end = start + Duration::days((n % 3) as i64);
                LeaveRequest {
                    id: employee_id * 2 + n,
                    employee_id,
                    leave_type: types[((employee_id + n) % 4) as usize],
                    start_date: start,
                    end_date: end,
                    day_type: DayType::Full,
                    start_time: None,
                    end_time: None,
                    total_days: Decimal::from((end - start).num_days() + 1),
                    reason: "Benchmark".to_string(),
                    status: LeaveStatus::Approved,
                    created_at: Utc::now(),
                }
            })
        })
        .collect()
}

fn holidays() -> Vec<Holiday> {
    [(3, 14, "Holi"), (3, 31, "Eid")]
        .iter()
        .enumerate()
        .map(|(i, (m, d, name))| Holiday {
            id: i as u64 + 1,
            name: name.to_string(),
            date: NaiveDate::from_ymd_opt(2025, *m, *d).unwrap(),
            category: HolidayCategory::Public,
        })
        .collect()
}

/// Benchmark: aggregator over 10, 100 and 1000 employees.
fn bench_payroll(c: &mut Criterion) {
    let policy = ConfigLoader::load("./config/xtrack")
        .map(|loader| loader.payroll().clone())
        .unwrap_or_else(|_| PayrollPolicy::default());
    let holidays = holidays();

    let mut group = c.benchmark_group("payroll");
    for count in [10u64, 100, 1000] {
        let employees = employees(count);
        let leaves = leaves(count);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                calculate_payroll(
                    black_box(&employees),
                    2025,
                    3,
                    black_box(&holidays),
                    black_box(&leaves),
                    &policy,
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

/// Benchmark: `/api/salary/calculate` for 100 employees.
fn bench_salary_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/xtrack").expect("Failed to load config");

    let mut store = Store::with_employees(employees(100));
    for holiday in holidays() {
        store
            .holidays
            .create(&holiday.name, holiday.date, holiday.category)
            .unwrap();
    }
    let router = create_router(AppState::with_store(config, store));

    c.bench_function("salary_endpoint_100", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/api/salary/calculate?year=2025&month=3")
                        .header("Authorization", "Bearer dev-admin-token")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, bench_payroll, bench_salary_endpoint);
criterion_main!(benches);
