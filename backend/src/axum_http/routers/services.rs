use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use crates::{
    domain::{
        repositories::{
            plans::PlanRepository, services::ServiceRepository,
            subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
        },
        value_objects::services::InsertServiceModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            plans::PlanPostgres, services::ServicePostgres,
            subscriptions::SubscriptionPostgres, usage_counts::UsageCountPostgres,
        },
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    axum_http::error_responses::AppError,
    usecases::{
        limit_gate::{LimitGate, OnLookupError},
        plan_resolver::PlanResolver,
        services::ServiceUseCase,
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let plan_resolver = PlanResolver::new(
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
        Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
    );
    let limit_gate = LimitGate::new(
        Arc::new(plan_resolver),
        Arc::new(UsageCountPostgres::new(Arc::clone(&db_pool))),
        OnLookupError::default(),
    );
    let services_usecase = ServiceUseCase::new(
        Arc::new(ServicePostgres::new(Arc::clone(&db_pool))),
        Arc::new(limit_gate),
    );

    Router::new()
        .route("/", get(list))
        .route("/", post(create))
        .route("/:service_id", delete(remove))
        .with_state(Arc::new(services_usecase))
}

pub async fn list<Sv, P, S, U>(
    State(services_usecase): State<Arc<ServiceUseCase<Sv, P, S, U>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    Sv: ServiceRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let services = services_usecase.list(auth.user_id).await?;
    Ok(Json(services))
}

pub async fn create<Sv, P, S, U>(
    State(services_usecase): State<Arc<ServiceUseCase<Sv, P, S, U>>>,
    auth: AuthUser,
    Json(insert_service_model): Json<InsertServiceModel>,
) -> Result<impl IntoResponse, AppError>
where
    Sv: ServiceRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let service_id = services_usecase
        .create(auth.principal(), insert_service_model)
        .await?;

    Ok((StatusCode::CREATED, Json(service_id)))
}

pub async fn remove<Sv, P, S, U>(
    State(services_usecase): State<Arc<ServiceUseCase<Sv, P, S, U>>>,
    auth: AuthUser,
    Path(service_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    Sv: ServiceRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    services_usecase.delete(auth.user_id, service_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
