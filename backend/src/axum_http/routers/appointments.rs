use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use crates::{
    domain::{
        repositories::{
            appointments::AppointmentRepository, plans::PlanRepository,
            subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
        },
        value_objects::appointments::{
            InsertAppointmentModel, SetPaidModel, UpdateAppointmentModel,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{
            appointments::AppointmentPostgres, plans::PlanPostgres,
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
        appointments::AppointmentUseCase,
        limit_gate::{LimitGate, OnLookupError},
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
    let appointments_usecase = AppointmentUseCase::new(
        Arc::new(AppointmentPostgres::new(Arc::clone(&db_pool))),
        Arc::new(limit_gate),
    );

    Router::new()
        .route("/", get(list))
        .route("/", post(create))
        .route("/:appointment_id", put(update))
        .route("/:appointment_id/paid", patch(set_paid))
        .route("/:appointment_id", delete(remove))
        .with_state(Arc::new(appointments_usecase))
}

pub async fn list<A, P, S, U>(
    State(appointments_usecase): State<Arc<AppointmentUseCase<A, P, S, U>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let appointments = appointments_usecase.list(auth.user_id).await?;
    Ok(Json(appointments))
}

pub async fn create<A, P, S, U>(
    State(appointments_usecase): State<Arc<AppointmentUseCase<A, P, S, U>>>,
    auth: AuthUser,
    Json(insert_appointment_model): Json<InsertAppointmentModel>,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    let appointment_id = appointments_usecase
        .create(auth.principal(), insert_appointment_model)
        .await?;

    Ok((StatusCode::CREATED, Json(appointment_id)))
}

pub async fn update<A, P, S, U>(
    State(appointments_usecase): State<Arc<AppointmentUseCase<A, P, S, U>>>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    Json(update_appointment_model): Json<UpdateAppointmentModel>,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    appointments_usecase
        .update(auth.user_id, appointment_id, update_appointment_model)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn set_paid<A, P, S, U>(
    State(appointments_usecase): State<Arc<AppointmentUseCase<A, P, S, U>>>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
    Json(set_paid_model): Json<SetPaidModel>,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    appointments_usecase
        .set_paid(auth.user_id, appointment_id, set_paid_model.paid)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove<A, P, S, U>(
    State(appointments_usecase): State<Arc<AppointmentUseCase<A, P, S, U>>>,
    auth: AuthUser,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    appointments_usecase.delete(auth.user_id, appointment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
