use crates::domain::{
    repositories::{
        locations::LocationRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
    },
    value_objects::{
        enums::resource_kinds::ResourceKind,
        iam::Principal,
        limits::{LimitDecision, LimitInfo},
        locations::{InsertLocationModel, LocationModel},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::limit_gate::{LimitGate, log_usage};

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("{}", .0.message())]
    LimitExceeded(LimitInfo),
    #[error("location not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl LocationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LocationError::LimitExceeded(_) => StatusCode::FORBIDDEN,
            LocationError::NotFound => StatusCode::NOT_FOUND,
            LocationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_db(err: anyhow::Error) -> Self {
        if err.to_string().contains("not found") {
            LocationError::NotFound
        } else {
            LocationError::Internal(err)
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, LocationError>;

pub struct LocationUseCase<L, P, S, U>
where
    L: LocationRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    location_repo: Arc<L>,
    limit_gate: Arc<LimitGate<P, S, U>>,
}

impl<L, P, S, U> LocationUseCase<L, P, S, U>
where
    L: LocationRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    pub fn new(location_repo: Arc<L>, limit_gate: Arc<LimitGate<P, S, U>>) -> Self {
        Self {
            location_repo,
            limit_gate,
        }
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<LocationModel>> {
        let locations = self
            .location_repo
            .list_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "locations: failed to list");
                LocationError::Internal(err)
            })?;

        Ok(locations.into_iter().map(LocationModel::from).collect())
    }

    pub async fn create(
        &self,
        principal: Principal,
        insert_location_model: InsertLocationModel,
    ) -> UseCaseResult<Uuid> {
        let user_id = principal.user_id;
        info!(%user_id, "locations: create requested");

        match self
            .limit_gate
            .check(principal, ResourceKind::Locations)
            .await?
        {
            LimitDecision::Deny(info) => {
                warn!(
                    %user_id,
                    limit = info.limit,
                    current = info.current,
                    "locations: create denied by limit gate"
                );
                return Err(LocationError::LimitExceeded(info));
            }
            LimitDecision::Allow { usage } => log_usage(ResourceKind::Locations, usage),
        }

        let location_id = self
            .location_repo
            .create(insert_location_model.to_entity(user_id))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "locations: failed to create");
                LocationError::Internal(err)
            })?;

        info!(%user_id, %location_id, "locations: created");
        Ok(location_id)
    }

    pub async fn delete(&self, user_id: Uuid, location_id: Uuid) -> UseCaseResult<()> {
        self.location_repo
            .delete(location_id, user_id)
            .await
            .map_err(|err| {
                error!(%user_id, %location_id, db_error = ?err, "locations: failed to delete");
                LocationError::from_db(err)
            })?;

        info!(%user_id, %location_id, "locations: deleted");
        Ok(())
    }
}
