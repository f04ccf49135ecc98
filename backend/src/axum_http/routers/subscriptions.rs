use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use crates::{
    domain::{
        repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
        value_objects::subscriptions::InsertSubscriptionModel,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{plans::PlanPostgres, subscriptions::SubscriptionPostgres},
    },
};
use std::sync::Arc;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError,
    usecases::subscriptions::SubscriptionUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let subscriptions_usecase = SubscriptionUseCase::new(
        Arc::new(PlanPostgres::new(Arc::clone(&db_pool))),
        Arc::new(SubscriptionPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/plans", get(list_plans))
        .route("/current", get(check_current_user_subscription))
        .route("/subscribe", post(subscribe))
        .route("/cancel", post(cancel_subscription))
        .with_state(Arc::new(subscriptions_usecase))
}

pub async fn list_plans<P, S>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    _auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    let plans = subscriptions_usecase.list_plans().await?;
    Ok(Json(plans))
}

pub async fn check_current_user_subscription<P, S>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    let current = subscriptions_usecase
        .get_current_subscription(auth.user_id)
        .await?;

    Ok(Json(current))
}

pub async fn subscribe<P, S>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    auth: AuthUser,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    let subscription_id = subscriptions_usecase
        .subscribe(auth.user_id, insert_subscription_model.plan_id)
        .await?;

    Ok((StatusCode::CREATED, Json(subscription_id)))
}

pub async fn cancel_subscription<P, S>(
    State(subscriptions_usecase): State<Arc<SubscriptionUseCase<P, S>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    subscriptions_usecase.cancel(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
