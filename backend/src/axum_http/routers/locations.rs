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
            locations::LocationRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
        },
        value_objects::locations::InsertLocationModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            locations::LocationPostgres, plans::PlanPostgres,
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
        locations::LocationUseCase,
        plan_resolver::PlanResolver,
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
    let locations_usecase = LocationUseCase::new(
        Arc::new(LocationPostgres::new(Arc::clone(&db_pool))),
        Arc::new(limit_gate),
    );

    Router::new()
        .route("/", get(list))
        .route("/", post(create))
        .route("/:location_id", delete(remove))
        .with_state(Arc::new(locations_usecase))
}

pub async fn list<L, P, S, U>(
    State(locations_usecase): State<Arc<LocationUseCase<L, P, S, U>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    L: LocationRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let locations = locations_usecase.list(auth.user_id).await?;
    Ok(Json(locations))
}

pub async fn create<L, P, S, U>(
    State(locations_usecase): State<Arc<LocationUseCase<L, P, S, U>>>,
    auth: AuthUser,
    Json(insert_location_model): Json<InsertLocationModel>,
) -> Result<impl IntoResponse, AppError>
where
    L: LocationRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let location_id = locations_usecase
        .create(auth.principal(), insert_location_model)
        .await?;

    Ok((StatusCode::CREATED, Json(location_id)))
}

pub async fn remove<L, P, S, U>(
    State(locations_usecase): State<Arc<LocationUseCase<L, P, S, U>>>,
    auth: AuthUser,
    Path(location_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    L: LocationRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    locations_usecase.delete(auth.user_id, location_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
