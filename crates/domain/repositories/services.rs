use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::services::{InsertServiceEntity, ServiceEntity};

#[async_trait]
#[automock]
pub trait ServiceRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ServiceEntity>>;
    async fn create(&self, insert_service_entity: InsertServiceEntity) -> Result<Uuid>;
    async fn delete(&self, service_id: Uuid, user_id: Uuid) -> Result<()>;
}
