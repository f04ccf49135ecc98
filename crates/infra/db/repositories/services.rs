use anyhow::{Result, anyhow};
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::services},
};
use domain::{
    entities::services::{InsertServiceEntity, ServiceEntity},
    repositories::services::ServiceRepository,
};

pub struct ServicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ServicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ServiceRepository for ServicePostgres {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ServiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = services::table
            .filter(services::user_id.eq(user_id))
            .order(services::name.asc())
            .select(ServiceEntity::as_select())
            .load::<ServiceEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_service_entity: InsertServiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(services::table)
            .values(&insert_service_entity)
            .returning(services::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, service_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(services::table)
            .filter(services::id.eq(service_id))
            .filter(services::user_id.eq(user_id))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(anyhow!("service not found"));
        }

        Ok(())
    }
}
