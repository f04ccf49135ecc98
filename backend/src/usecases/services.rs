use crates::domain::{
    repositories::{
        plans::PlanRepository, services::ServiceRepository,
        subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
    },
    value_objects::{
        enums::resource_kinds::ResourceKind,
        iam::Principal,
        limits::{LimitDecision, LimitInfo},
        services::{InsertServiceModel, ServiceModel},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::limit_gate::{LimitGate, log_usage};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{}", .0.message())]
    LimitExceeded(LimitInfo),
    #[error("service not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ServiceError::LimitExceeded(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_db(err: anyhow::Error) -> Self {
        if err.to_string().contains("not found") {
            ServiceError::NotFound
        } else {
            ServiceError::Internal(err)
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ServiceError>;

pub struct ServiceUseCase<Sv, P, S, U>
where
    Sv: ServiceRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    service_repo: Arc<Sv>,
    limit_gate: Arc<LimitGate<P, S, U>>,
}

impl<Sv, P, S, U> ServiceUseCase<Sv, P, S, U>
where
    Sv: ServiceRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    pub fn new(service_repo: Arc<Sv>, limit_gate: Arc<LimitGate<P, S, U>>) -> Self {
        Self {
            service_repo,
            limit_gate,
        }
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<ServiceModel>> {
        let services = self
            .service_repo
            .list_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "services: failed to list");
                ServiceError::Internal(err)
            })?;

        Ok(services.into_iter().map(ServiceModel::from).collect())
    }

    pub async fn create(
        &self,
        principal: Principal,
        insert_service_model: InsertServiceModel,
    ) -> UseCaseResult<Uuid> {
        let user_id = principal.user_id;
        info!(%user_id, "services: create requested");

        match self
            .limit_gate
            .check(principal, ResourceKind::Services)
            .await?
        {
            LimitDecision::Deny(info) => {
                warn!(
                    %user_id,
                    limit = info.limit,
                    current = info.current,
                    "services: create denied by limit gate"
                );
                return Err(ServiceError::LimitExceeded(info));
            }
            LimitDecision::Allow { usage } => log_usage(ResourceKind::Services, usage),
        }

        let service_id = self
            .service_repo
            .create(insert_service_model.to_entity(user_id))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "services: failed to create");
                ServiceError::Internal(err)
            })?;

        info!(%user_id, %service_id, "services: created");
        Ok(service_id)
    }

    pub async fn delete(&self, user_id: Uuid, service_id: Uuid) -> UseCaseResult<()> {
        self.service_repo
            .delete(service_id, user_id)
            .await
            .map_err(|err| {
                error!(%user_id, %service_id, db_error = ?err, "services: failed to delete");
                ServiceError::from_db(err)
            })?;

        info!(%user_id, %service_id, "services: deleted");
        Ok(())
    }
}
