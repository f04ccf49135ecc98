use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::appointments},
};
use domain::{
    entities::appointments::{
        AppointmentEntity, InsertAppointmentEntity, UpdateAppointmentEntity,
    },
    repositories::appointments::AppointmentRepository,
};

pub struct AppointmentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl AppointmentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentPostgres {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<AppointmentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = appointments::table
            .filter(appointments::user_id.eq(user_id))
            .order(appointments::scheduled_on.asc())
            .select(AppointmentEntity::as_select())
            .load::<AppointmentEntity>(&mut conn)?;

        Ok(results)
    }

    async fn find_by_id(
        &self,
        appointment_id: Uuid,
        user_id: Uuid,
    ) -> Result<AppointmentEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let appointment = appointments::table
            .filter(appointments::id.eq(appointment_id))
            .filter(appointments::user_id.eq(user_id))
            .select(AppointmentEntity::as_select())
            .first::<AppointmentEntity>(&mut conn)?;

        Ok(appointment)
    }

    async fn create(&self, insert_appointment_entity: InsertAppointmentEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(appointments::table)
            .values(&insert_appointment_entity)
            .returning(appointments::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn update(
        &self,
        appointment_id: Uuid,
        user_id: Uuid,
        update_appointment_entity: UpdateAppointmentEntity,
    ) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(appointments::table)
            .filter(appointments::id.eq(appointment_id))
            .filter(appointments::user_id.eq(user_id))
            .set(&update_appointment_entity)
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(anyhow!("appointment not found"));
        }

        Ok(())
    }

    async fn set_paid(&self, appointment_id: Uuid, user_id: Uuid, paid: bool) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = update(appointments::table)
            .filter(appointments::id.eq(appointment_id))
            .filter(appointments::user_id.eq(user_id))
            .set((
                appointments::paid.eq(paid),
                appointments::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(anyhow!("appointment not found"));
        }

        Ok(())
    }

    async fn delete(&self, appointment_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(appointments::table)
            .filter(appointments::id.eq(appointment_id))
            .filter(appointments::user_id.eq(user_id))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(anyhow!("appointment not found"));
        }

        Ok(())
    }
}
