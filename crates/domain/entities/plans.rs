use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    domain::value_objects::plans::PlanLimits, infra::db::postgres::schema::plans,
};

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = plans)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i32,
    pub duration_days: i32,
    pub max_appointments: i32,
    pub max_locations: i32,
    pub max_services: i32,
    pub is_active: bool,
}

impl PlanEntity {
    pub fn limits(&self) -> PlanLimits {
        PlanLimits {
            max_appointments: self.max_appointments,
            max_locations: self.max_locations,
            max_services: self.max_services,
        }
    }
}
