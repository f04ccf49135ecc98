use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::appointments::{
    AppointmentEntity, InsertAppointmentEntity, UpdateAppointmentEntity,
};

#[async_trait]
#[automock]
pub trait AppointmentRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AppointmentEntity>>;

    async fn find_by_id(&self, appointment_id: Uuid, user_id: Uuid)
    -> Result<AppointmentEntity>;

    async fn create(&self, insert_appointment_entity: InsertAppointmentEntity) -> Result<Uuid>;

    async fn update(
        &self,
        appointment_id: Uuid,
        user_id: Uuid,
        update_appointment_entity: UpdateAppointmentEntity,
    ) -> Result<()>;

    async fn set_paid(&self, appointment_id: Uuid, user_id: Uuid, paid: bool) -> Result<()>;

    async fn delete(&self, appointment_id: Uuid, user_id: Uuid) -> Result<()>;
}
