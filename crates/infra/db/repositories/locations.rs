use anyhow::{Result, anyhow};
use async_trait::async_trait;
use diesel::{RunQueryDsl, delete, insert_into, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::address_data},
};
use domain::{
    entities::locations::{InsertLocationEntity, LocationEntity},
    repositories::locations::LocationRepository,
};

pub struct LocationPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl LocationPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl LocationRepository for LocationPostgres {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<LocationEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = address_data::table
            .filter(address_data::user_id.eq(user_id))
            .order(address_data::name.asc())
            .select(LocationEntity::as_select())
            .load::<LocationEntity>(&mut conn)?;

        Ok(results)
    }

    async fn create(&self, insert_location_entity: InsertLocationEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = insert_into(address_data::table)
            .values(&insert_location_entity)
            .returning(address_data::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(result)
    }

    async fn delete(&self, location_id: Uuid, user_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = delete(address_data::table)
            .filter(address_data::id.eq(location_id))
            .filter(address_data::user_id.eq(user_id))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(anyhow!("location not found"));
        }

        Ok(())
    }
}
