use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use crates::{
    domain::{
        repositories::appointments::AppointmentRepository,
        value_objects::finance::FinancialReportQuery,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::appointments::AppointmentPostgres,
    },
};
use std::sync::Arc;

use crate::{
    auth::AuthUser, axum_http::error_responses::AppError,
    usecases::financial_reports::FinancialReportUseCase,
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let financial_reports_usecase =
        FinancialReportUseCase::new(Arc::new(AppointmentPostgres::new(Arc::clone(&db_pool))));

    Router::new()
        .route("/financial", get(financial_report))
        .with_state(Arc::new(financial_reports_usecase))
}

pub async fn financial_report<A>(
    State(financial_reports_usecase): State<Arc<FinancialReportUseCase<A>>>,
    auth: AuthUser,
    Query(query): Query<FinancialReportQuery>,
) -> Result<impl IntoResponse, AppError>
where
    A: AppointmentRepository + Send + Sync + 'static,
{
    let report = financial_reports_usecase
        .build_report(auth.user_id, query)
        .await?;

    Ok(Json(report))
}
