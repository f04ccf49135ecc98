use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::locations::{InsertLocationEntity, LocationEntity};

#[async_trait]
#[automock]
pub trait LocationRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<LocationEntity>>;
    async fn create(&self, insert_location_entity: InsertLocationEntity) -> Result<Uuid>;
    async fn delete(&self, location_id: Uuid, user_id: Uuid) -> Result<()>;
}
