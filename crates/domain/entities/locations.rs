use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::address_data;

/// A saved working location. The table keeps its legacy `address_data` name.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = address_data)]
pub struct LocationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub address: String,
    pub postcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = address_data)]
pub struct InsertLocationEntity {
    pub user_id: Uuid,
    pub name: String,
    pub address: String,
    pub postcode: Option<String>,
    pub created_at: DateTime<Utc>,
}
