use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Datelike;
use crates::domain::{
    entities::appointments::AppointmentEntity,
    repositories::appointments::AppointmentRepository,
    value_objects::{
        finance::{
            CalendarYearBucket, FinancialReport, FinancialReportQuery, FinancialYearBucket,
            GroupYearBucket, LocationBucket, MonthlyTotals, ServiceNameBucket,
            ServiceTypeBucket, minor_to_pounds,
        },
        tax_year::{financial_year_label, financial_year_start},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

/// Builds the on-demand financial report for a user. Read-only: loads the
/// appointment snapshot and aggregates it, mutating nothing.
pub struct FinancialReportUseCase<A>
where
    A: AppointmentRepository + Send + Sync + 'static,
{
    appointment_repo: Arc<A>,
}

impl<A> FinancialReportUseCase<A>
where
    A: AppointmentRepository + Send + Sync + 'static,
{
    pub fn new(appointment_repo: Arc<A>) -> Self {
        Self { appointment_repo }
    }

    pub async fn build_report(
        &self,
        user_id: Uuid,
        query: FinancialReportQuery,
    ) -> Result<FinancialReport> {
        info!(
            %user_id,
            include_paid = query.include_paid,
            include_unpaid = query.include_unpaid,
            "financial_reports: building report"
        );

        let appointments = self.appointment_repo.list_for_user(user_id).await?;
        let report = aggregate(&appointments, query.include_paid, query.include_unpaid);

        info!(
            %user_id,
            appointment_count = appointments.len(),
            grand_total = report.grand_total,
            "financial_reports: report built"
        );
        Ok(report)
    }
}

#[derive(Default)]
struct BucketAcc {
    total: i64,
    months: MonthlyTotals,
}

impl BucketAcc {
    fn add(&mut self, month0: usize, price_minor: i64) {
        self.total += price_minor;
        self.months.add(month0, price_minor);
    }
}

#[derive(Default)]
struct GroupAcc {
    total: i64,
    years: BTreeMap<i32, BucketAcc>,
}

impl GroupAcc {
    fn add(&mut self, year: i32, month0: usize, price_minor: i64) {
        self.total += price_minor;
        self.years.entry(year).or_default().add(month0, price_minor);
    }
}

fn group_years(years: BTreeMap<i32, BucketAcc>) -> Vec<GroupYearBucket> {
    years
        .into_iter()
        .map(|(year, acc)| GroupYearBucket {
            year,
            total: minor_to_pounds(acc.total),
            months: acc.months,
        })
        .collect()
}

/// Buckets appointment revenue by UK financial year, calendar year,
/// location, service type and service name, each with month-level detail,
/// plus a single grand total all five breakdowns agree with.
///
/// Rows failing the paid/unpaid filter are dropped. Rows without a date
/// cannot be placed in any bucket and are excluded everywhere, including
/// the grand total, with a warning. A missing price contributes zero.
pub fn aggregate(
    appointments: &[AppointmentEntity],
    include_paid: bool,
    include_unpaid: bool,
) -> FinancialReport {
    let mut financial_years: BTreeMap<i32, BucketAcc> = BTreeMap::new();
    let mut calendar_years: BTreeMap<i32, BucketAcc> = BTreeMap::new();
    let mut by_location: BTreeMap<String, GroupAcc> = BTreeMap::new();
    let mut by_service_type: BTreeMap<String, GroupAcc> = BTreeMap::new();
    let mut by_service_name: BTreeMap<String, GroupAcc> = BTreeMap::new();
    let mut grand_total: i64 = 0;

    for appointment in appointments {
        let retained = (include_paid && appointment.paid)
            || (include_unpaid && !appointment.paid);
        if !retained {
            continue;
        }

        let Some(date) = appointment.scheduled_on else {
            warn!(
                appointment_id = %appointment.id,
                "financial_reports: appointment has no date, excluded from report"
            );
            continue;
        };

        let price_minor = i64::from(appointment.price_minor.unwrap_or(0));
        let month0 = date.month0() as usize;
        let year = date.year();

        grand_total += price_minor;

        financial_years
            .entry(financial_year_start(date))
            .or_default()
            .add(month0, price_minor);
        calendar_years
            .entry(year)
            .or_default()
            .add(month0, price_minor);
        by_location
            .entry(appointment.location.clone())
            .or_default()
            .add(year, month0, price_minor);
        by_service_type
            .entry(appointment.service_type.clone())
            .or_default()
            .add(year, month0, price_minor);
        by_service_name
            .entry(appointment.service_name.clone())
            .or_default()
            .add(year, month0, price_minor);
    }

    FinancialReport {
        financial_year: financial_years
            .into_iter()
            .map(|(start, acc)| FinancialYearBucket {
                key: financial_year_label(start),
                total: minor_to_pounds(acc.total),
                months: acc.months,
            })
            .collect(),
        calendar_year: calendar_years
            .into_iter()
            .map(|(year, acc)| CalendarYearBucket {
                key: year,
                total: minor_to_pounds(acc.total),
                months: acc.months,
            })
            .collect(),
        by_location: by_location
            .into_iter()
            .map(|(location, acc)| LocationBucket {
                location,
                total: minor_to_pounds(acc.total),
                years: group_years(acc.years),
            })
            .collect(),
        by_service_type: by_service_type
            .into_iter()
            .map(|(service_type, acc)| ServiceTypeBucket {
                service_type,
                total: minor_to_pounds(acc.total),
                years: group_years(acc.years),
            })
            .collect(),
        by_service_name: by_service_name
            .into_iter()
            .map(|(name, acc)| ServiceNameBucket {
                name,
                total: minor_to_pounds(acc.total),
                years: group_years(acc.years),
            })
            .collect(),
        grand_total: minor_to_pounds(grand_total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn appointment(
        date: Option<(i32, u32, u32)>,
        price_minor: Option<i32>,
        paid: bool,
        location: &str,
        service_type: &str,
        service_name: &str,
    ) -> AppointmentEntity {
        let now = Utc::now();
        AppointmentEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            scheduled_on: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            client_name: "Client".to_string(),
            location: location.to_string(),
            service_type: service_type.to_string(),
            service_name: service_name.to_string(),
            price_minor,
            paid,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_data() -> Vec<AppointmentEntity> {
        vec![
            appointment(Some((2024, 4, 10)), Some(10_000), true, "A", "Cut", "Dry cut"),
            appointment(Some((2023, 12, 1)), Some(5_000), true, "A", "Colour", "Full head"),
            appointment(Some((2024, 2, 14)), Some(7_500), false, "B", "Cut", "Wet cut"),
            appointment(Some((2024, 4, 5)), Some(2_000), true, "B", "Cut", "Dry cut"),
        ]
    }

    fn breakdown_sums(report: &FinancialReport) -> Vec<f64> {
        vec![
            report.financial_year.iter().map(|b| b.total).sum(),
            report.calendar_year.iter().map(|b| b.total).sum(),
            report.by_location.iter().map(|b| b.total).sum(),
            report.by_service_type.iter().map(|b| b.total).sum(),
            report.by_service_name.iter().map(|b| b.total).sum(),
        ]
    }

    #[test]
    fn worked_example_from_the_booking_history() {
        let data = vec![
            appointment(Some((2024, 4, 10)), Some(10_000), true, "A", "Cut", "Dry cut"),
            appointment(Some((2023, 12, 1)), Some(5_000), true, "A", "Cut", "Dry cut"),
        ];

        let report = aggregate(&data, true, false);

        assert_eq!(report.grand_total, 150.0);
        assert_eq!(report.financial_year.len(), 2);
        // Ascending financial-year order: earliest first.
        assert_eq!(report.financial_year[0].key, "2023-24");
        assert_eq!(report.financial_year[0].total, 50.0);
        assert_eq!(report.financial_year[1].key, "2024-25");
        assert_eq!(report.financial_year[1].total, 100.0);
    }

    #[test]
    fn april_boundary_splits_financial_years_but_not_calendar_years() {
        let data = vec![
            appointment(Some((2024, 4, 5)), Some(2_000), true, "A", "Cut", "Dry cut"),
            appointment(Some((2024, 4, 6)), Some(3_000), true, "A", "Cut", "Dry cut"),
        ];

        let report = aggregate(&data, true, false);

        let fy_keys: Vec<&str> = report.financial_year.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(fy_keys, vec!["2023-24", "2024-25"]);

        assert_eq!(report.calendar_year.len(), 1);
        assert_eq!(report.calendar_year[0].key, 2024);
        assert_eq!(report.calendar_year[0].total, 50.0);
    }

    #[test]
    fn all_five_breakdowns_agree_with_the_grand_total() {
        let report = aggregate(&sample_data(), true, true);

        assert_eq!(report.grand_total, 245.0);
        for sum in breakdown_sums(&report) {
            assert!((sum - report.grand_total).abs() < 1e-9);
        }
    }

    #[test]
    fn paid_filter_equals_prefiltered_input() {
        let data = sample_data();
        let paid_only: Vec<AppointmentEntity> =
            data.iter().filter(|a| a.paid).cloned().collect();

        assert_eq!(aggregate(&data, true, false), aggregate(&paid_only, true, true));
    }

    #[test]
    fn unpaid_filter_keeps_only_unpaid_rows() {
        let report = aggregate(&sample_data(), false, true);

        assert_eq!(report.grand_total, 75.0);
        assert_eq!(report.by_location.len(), 1);
        assert_eq!(report.by_location[0].location, "B");
    }

    #[test]
    fn both_flags_false_yields_an_empty_report() {
        let report = aggregate(&sample_data(), false, false);

        assert_eq!(report, FinancialReport::empty());
    }

    #[test]
    fn aggregation_is_idempotent() {
        let data = sample_data();

        assert_eq!(aggregate(&data, true, true), aggregate(&data, true, true));
    }

    #[test]
    fn missing_price_contributes_zero() {
        let data = vec![
            appointment(Some((2024, 5, 1)), None, true, "A", "Cut", "Dry cut"),
            appointment(Some((2024, 5, 2)), Some(4_000), true, "A", "Cut", "Dry cut"),
        ];

        let report = aggregate(&data, true, false);

        assert_eq!(report.grand_total, 40.0);
        assert_eq!(report.financial_year[0].months.get(4), Some(4_000));
    }

    #[test]
    fn dateless_rows_are_excluded_everywhere() {
        let data = vec![
            appointment(None, Some(9_900), true, "A", "Cut", "Dry cut"),
            appointment(Some((2024, 5, 2)), Some(4_000), true, "A", "Cut", "Dry cut"),
        ];

        let report = aggregate(&data, true, false);

        assert_eq!(report.grand_total, 40.0);
        for sum in breakdown_sums(&report) {
            assert!((sum - 40.0).abs() < 1e-9);
        }
    }

    #[test]
    fn group_buckets_emit_in_lexical_key_order() {
        let data = vec![
            appointment(Some((2024, 5, 1)), Some(1_000), true, "Leeds", "Colour", "Full head"),
            appointment(Some((2024, 5, 2)), Some(1_000), true, "Bradford", "Cut", "Dry cut"),
            appointment(Some((2024, 5, 3)), Some(1_000), true, "York", "Beauty", "Manicure"),
        ];

        let report = aggregate(&data, true, false);

        let locations: Vec<&str> = report.by_location.iter().map(|b| b.location.as_str()).collect();
        assert_eq!(locations, vec!["Bradford", "Leeds", "York"]);

        let types: Vec<&str> = report
            .by_service_type
            .iter()
            .map(|b| b.service_type.as_str())
            .collect();
        assert_eq!(types, vec!["Beauty", "Colour", "Cut"]);
    }

    #[test]
    fn month_totals_accumulate_within_a_year() {
        let data = vec![
            appointment(Some((2024, 7, 1)), Some(2_000), true, "A", "Cut", "Dry cut"),
            appointment(Some((2024, 7, 20)), Some(3_000), true, "A", "Cut", "Dry cut"),
            appointment(Some((2024, 8, 2)), Some(1_000), true, "A", "Cut", "Dry cut"),
        ];

        let report = aggregate(&data, true, false);
        let months = &report.by_location[0].years[0].months;

        assert_eq!(months.get(6), Some(5_000));
        assert_eq!(months.get(7), Some(1_000));
        assert_eq!(months.get(8), None);
    }

    #[tokio::test]
    async fn usecase_loads_the_snapshot_and_delegates() {
        use crates::domain::repositories::appointments::MockAppointmentRepository;
        use mockall::predicate::eq;

        let user_id = Uuid::new_v4();
        let data = sample_data();
        let expected = aggregate(&data, true, false);

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_list_for_user()
            .with(eq(user_id))
            .returning(move |_| {
                let data = data.clone();
                Box::pin(async move { Ok(data) })
            });

        let usecase = FinancialReportUseCase::new(Arc::new(appointment_repo));
        let report = usecase
            .build_report(
                user_id,
                FinancialReportQuery {
                    include_paid: true,
                    include_unpaid: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(report, expected);
    }
}
