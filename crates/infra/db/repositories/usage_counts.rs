use anyhow::Result;
use async_trait::async_trait;
use diesel::{RunQueryDsl, prelude::*};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{address_data, appointments, services},
    },
};
use domain::{
    repositories::usage_counts::UsageCountRepository,
    value_objects::enums::resource_kinds::ResourceKind,
};

/// Live row counts per resource table. One count query per gate check;
/// nothing is cached between requests.
pub struct UsageCountPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UsageCountPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UsageCountRepository for UsageCountPostgres {
    async fn count_for_user(&self, resource: ResourceKind, user_id: Uuid) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = match resource {
            ResourceKind::Appointments => appointments::table
                .filter(appointments::user_id.eq(user_id))
                .count()
                .get_result::<i64>(&mut conn)?,
            ResourceKind::Locations => address_data::table
                .filter(address_data::user_id.eq(user_id))
                .count()
                .get_result::<i64>(&mut conn)?,
            ResourceKind::Services => services::table
                .filter(services::user_id.eq(user_id))
                .count()
                .get_result::<i64>(&mut conn)?,
        };

        Ok(count)
    }
}
