use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::services::{InsertServiceEntity, ServiceEntity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceModel {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price_minor: i32,
    pub duration_minutes: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceEntity> for ServiceModel {
    fn from(entity: ServiceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            category: entity.category,
            price_minor: entity.price_minor,
            duration_minutes: entity.duration_minutes,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertServiceModel {
    pub name: String,
    pub category: String,
    pub price_minor: i32,
    pub duration_minutes: i32,
}

impl InsertServiceModel {
    pub fn to_entity(&self, user_id: Uuid) -> InsertServiceEntity {
        InsertServiceEntity {
            user_id,
            name: self.name.clone(),
            category: self.category.clone(),
            price_minor: self.price_minor,
            duration_minutes: self.duration_minutes,
            created_at: Utc::now(),
        }
    }
}
