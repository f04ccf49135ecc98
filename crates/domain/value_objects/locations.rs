use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::locations::{InsertLocationEntity, LocationEntity};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationModel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub postcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LocationEntity> for LocationModel {
    fn from(entity: LocationEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            postcode: entity.postcode,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertLocationModel {
    pub name: String,
    pub address: String,
    pub postcode: Option<String>,
}

impl InsertLocationModel {
    pub fn to_entity(&self, user_id: Uuid) -> InsertLocationEntity {
        InsertLocationEntity {
            user_id,
            name: self.name.clone(),
            address: self.address.clone(),
            postcode: self.postcode.clone(),
            created_at: Utc::now(),
        }
    }
}
