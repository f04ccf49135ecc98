use chrono::{Datelike, NaiveDate};

/// English month abbreviations used as keys in report month maps.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Year in which the UK financial year containing `date` starts. The tax
/// year boundary falls on 6 April, not 1 January.
pub fn financial_year_start(date: NaiveDate) -> i32 {
    let boundary = NaiveDate::from_ymd_opt(date.year(), 4, 6)
        .unwrap_or(date);
    if date >= boundary {
        date.year()
    } else {
        date.year() - 1
    }
}

/// Label for a financial year starting in `start`, e.g. 2023 -> "2023-24".
pub fn financial_year_label(start: i32) -> String {
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}
