use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::value_objects::tax_year::MONTH_LABELS;

/// Converts an integer pence sum into pounds for the JSON payload.
/// Money is accumulated in minor units and only becomes floating point here.
pub fn minor_to_pounds(minor: i64) -> f64 {
    minor as f64 / 100.0
}

fn default_true() -> bool {
    true
}

/// Query parameters of the financial report endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FinancialReportQuery {
    #[serde(rename = "includePaid", default = "default_true")]
    pub include_paid: bool,
    #[serde(rename = "includeUnpaid", default)]
    pub include_unpaid: bool,
}

/// Pence totals per calendar month. Serializes as `{"Jan": 100.0, ...}`
/// in calendar order, emitting only months that received data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    months: [Option<i64>; 12],
}

impl MonthlyTotals {
    pub fn add(&mut self, month0: usize, price_minor: i64) {
        self.months[month0] = Some(self.months[month0].unwrap_or(0) + price_minor);
    }

    pub fn get(&self, month0: usize) -> Option<i64> {
        self.months[month0]
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let present = self.months.iter().filter(|m| m.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (month0, total) in self.months.iter().enumerate() {
            if let Some(minor) = total {
                map.serialize_entry(MONTH_LABELS[month0], &minor_to_pounds(*minor))?;
            }
        }
        map.end()
    }
}

/// One financial-year bucket, keyed like "2024-25".
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialYearBucket {
    pub key: String,
    pub total: f64,
    pub months: MonthlyTotals,
}

/// One calendar-year bucket, keyed by the plain year.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarYearBucket {
    pub key: i32,
    pub total: f64,
    pub months: MonthlyTotals,
}

/// Calendar-year slice inside a location/type/name bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GroupYearBucket {
    pub year: i32,
    pub total: f64,
    pub months: MonthlyTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationBucket {
    pub location: String,
    pub total: f64,
    pub years: Vec<GroupYearBucket>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceTypeBucket {
    #[serde(rename = "type")]
    pub service_type: String,
    pub total: f64,
    pub years: Vec<GroupYearBucket>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceNameBucket {
    pub name: String,
    pub total: f64,
    pub years: Vec<GroupYearBucket>,
}

/// External JSON contract of the financial report endpoint. Field names
/// are binding for existing consumers; bucket ordering is ascending for
/// the year breakdowns and lexical for location/type/name.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialReport {
    #[serde(rename = "financialYear")]
    pub financial_year: Vec<FinancialYearBucket>,
    #[serde(rename = "calendarYear")]
    pub calendar_year: Vec<CalendarYearBucket>,
    #[serde(rename = "byLocation")]
    pub by_location: Vec<LocationBucket>,
    #[serde(rename = "byServiceType")]
    pub by_service_type: Vec<ServiceTypeBucket>,
    #[serde(rename = "byServiceName")]
    pub by_service_name: Vec<ServiceNameBucket>,
    #[serde(rename = "grandTotal")]
    pub grand_total: f64,
}

impl FinancialReport {
    pub fn empty() -> Self {
        Self {
            financial_year: Vec::new(),
            calendar_year: Vec::new(),
            by_location: Vec::new(),
            by_service_type: Vec::new(),
            by_service_name: Vec::new(),
            grand_total: 0.0,
        }
    }
}
