use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::appointments::{
    AppointmentEntity, InsertAppointmentEntity, UpdateAppointmentEntity,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentModel {
    pub id: Uuid,
    pub scheduled_on: Option<NaiveDate>,
    pub client_name: String,
    pub location: String,
    pub service_type: String,
    pub service_name: String,
    pub price_minor: Option<i32>,
    pub paid: bool,
}

impl From<AppointmentEntity> for AppointmentModel {
    fn from(entity: AppointmentEntity) -> Self {
        Self {
            id: entity.id,
            scheduled_on: entity.scheduled_on,
            client_name: entity.client_name,
            location: entity.location,
            service_type: entity.service_type,
            service_name: entity.service_name,
            price_minor: entity.price_minor,
            paid: entity.paid,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertAppointmentModel {
    pub scheduled_on: Option<NaiveDate>,
    pub client_name: String,
    pub location: String,
    pub service_type: String,
    pub service_name: String,
    pub price_minor: Option<i32>,
    #[serde(default)]
    pub paid: bool,
}

impl InsertAppointmentModel {
    pub fn to_entity(&self, user_id: Uuid) -> InsertAppointmentEntity {
        let now = Utc::now();
        InsertAppointmentEntity {
            user_id,
            scheduled_on: self.scheduled_on,
            client_name: self.client_name.clone(),
            location: self.location.clone(),
            service_type: self.service_type.clone(),
            service_name: self.service_name.clone(),
            price_minor: self.price_minor,
            paid: self.paid,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAppointmentModel {
    pub scheduled_on: Option<Option<NaiveDate>>,
    pub client_name: Option<String>,
    pub location: Option<String>,
    pub service_type: Option<String>,
    pub service_name: Option<String>,
    pub price_minor: Option<Option<i32>>,
    pub paid: Option<bool>,
}

impl UpdateAppointmentModel {
    pub fn to_entity(&self) -> UpdateAppointmentEntity {
        UpdateAppointmentEntity {
            scheduled_on: self.scheduled_on,
            client_name: self.client_name.clone(),
            location: self.location.clone(),
            service_type: self.service_type.clone(),
            service_name: self.service_name.clone(),
            price_minor: self.price_minor,
            paid: self.paid,
            updated_at: Some(Utc::now()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPaidModel {
    pub paid: bool,
}
