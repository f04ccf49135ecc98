use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::appointments;

/// A booked appointment. The financial aggregator treats these rows as a
/// read-only snapshot; `scheduled_on` and `price_minor` are nullable in the
/// store and handled defensively on the way into a report.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = appointments)]
pub struct AppointmentEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub scheduled_on: Option<NaiveDate>,
    pub client_name: String,
    pub location: String,
    pub service_type: String,
    pub service_name: String,
    pub price_minor: Option<i32>,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub struct InsertAppointmentEntity {
    pub user_id: Uuid,
    pub scheduled_on: Option<NaiveDate>,
    pub client_name: String,
    pub location: String,
    pub service_type: String,
    pub service_name: String,
    pub price_minor: Option<i32>,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = appointments)]
pub struct UpdateAppointmentEntity {
    pub scheduled_on: Option<Option<NaiveDate>>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub service_name: Option<String>,
    pub price_minor: Option<Option<i32>>,
    pub paid: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}
