use crates::domain::{
    repositories::{
        appointments::AppointmentRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository, usage_counts::UsageCountRepository,
    },
    value_objects::{
        appointments::{AppointmentModel, InsertAppointmentModel, UpdateAppointmentModel},
        enums::resource_kinds::ResourceKind,
        iam::Principal,
        limits::{LimitDecision, LimitInfo},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::limit_gate::{LimitGate, log_usage};

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("{}", .0.message())]
    LimitExceeded(LimitInfo),
    #[error("appointment not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppointmentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            AppointmentError::LimitExceeded(_) => StatusCode::FORBIDDEN,
            AppointmentError::NotFound => StatusCode::NOT_FOUND,
            AppointmentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn from_db(err: anyhow::Error) -> Self {
        if err.to_string().contains("not found") {
            AppointmentError::NotFound
        } else {
            AppointmentError::Internal(err)
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, AppointmentError>;

pub struct AppointmentUseCase<A, P, S, U>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    appointment_repo: Arc<A>,
    limit_gate: Arc<LimitGate<P, S, U>>,
}

impl<A, P, S, U> AppointmentUseCase<A, P, S, U>
where
    A: AppointmentRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    pub fn new(appointment_repo: Arc<A>, limit_gate: Arc<LimitGate<P, S, U>>) -> Self {
        Self {
            appointment_repo,
            limit_gate,
        }
    }

    pub async fn list(&self, user_id: Uuid) -> UseCaseResult<Vec<AppointmentModel>> {
        let appointments = self
            .appointment_repo
            .list_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "appointments: failed to list");
                AppointmentError::Internal(err)
            })?;

        Ok(appointments.into_iter().map(AppointmentModel::from).collect())
    }

    pub async fn create(
        &self,
        principal: Principal,
        insert_appointment_model: InsertAppointmentModel,
    ) -> UseCaseResult<Uuid> {
        let user_id = principal.user_id;
        info!(%user_id, "appointments: create requested");

        match self
            .limit_gate
            .check(principal, ResourceKind::Appointments)
            .await?
        {
            LimitDecision::Deny(info) => {
                warn!(
                    %user_id,
                    limit = info.limit,
                    current = info.current,
                    "appointments: create denied by limit gate"
                );
                return Err(AppointmentError::LimitExceeded(info));
            }
            LimitDecision::Allow { usage } => log_usage(ResourceKind::Appointments, usage),
        }

        let appointment_id = self
            .appointment_repo
            .create(insert_appointment_model.to_entity(user_id))
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "appointments: failed to create");
                AppointmentError::Internal(err)
            })?;

        info!(%user_id, %appointment_id, "appointments: created");
        Ok(appointment_id)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
        update_appointment_model: UpdateAppointmentModel,
    ) -> UseCaseResult<()> {
        self.appointment_repo
            .update(appointment_id, user_id, update_appointment_model.to_entity())
            .await
            .map_err(|err| {
                error!(%user_id, %appointment_id, db_error = ?err, "appointments: failed to update");
                AppointmentError::from_db(err)
            })?;

        info!(%user_id, %appointment_id, "appointments: updated");
        Ok(())
    }

    pub async fn set_paid(
        &self,
        user_id: Uuid,
        appointment_id: Uuid,
        paid: bool,
    ) -> UseCaseResult<()> {
        self.appointment_repo
            .set_paid(appointment_id, user_id, paid)
            .await
            .map_err(|err| {
                error!(%user_id, %appointment_id, db_error = ?err, "appointments: failed to toggle paid");
                AppointmentError::from_db(err)
            })?;

        info!(%user_id, %appointment_id, paid, "appointments: paid flag set");
        Ok(())
    }

    pub async fn delete(&self, user_id: Uuid, appointment_id: Uuid) -> UseCaseResult<()> {
        self.appointment_repo
            .delete(appointment_id, user_id)
            .await
            .map_err(|err| {
                error!(%user_id, %appointment_id, db_error = ?err, "appointments: failed to delete");
                AppointmentError::from_db(err)
            })?;

        info!(%user_id, %appointment_id, "appointments: deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::repositories::{
        appointments::MockAppointmentRepository, plans::MockPlanRepository,
        subscriptions::MockSubscriptionRepository, usage_counts::MockUsageCountRepository,
    };
    use crates::domain::value_objects::appointments::InsertAppointmentModel;
    use mockall::predicate::eq;

    use crate::usecases::limit_gate::OnLookupError;
    use crate::usecases::plan_resolver::PlanResolver;

    fn insert_model() -> InsertAppointmentModel {
        InsertAppointmentModel {
            scheduled_on: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
            client_name: "Client".to_string(),
            location: "Leeds".to_string(),
            service_type: "Cut".to_string(),
            service_name: "Dry cut".to_string(),
            price_minor: Some(3_500),
            paid: false,
        }
    }

    fn gate_on_free_plan(
        count: i64,
    ) -> LimitGate<MockPlanRepository, MockSubscriptionRepository, MockUsageCountRepository> {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .returning(|_| Box::pin(async { Ok(None) }));

        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo
            .expect_count_for_user()
            .returning(move |_, _| Box::pin(async move { Ok(count) }));

        LimitGate::new(
            Arc::new(PlanResolver::new(
                Arc::new(MockPlanRepository::new()),
                Arc::new(subscription_repo),
            )),
            Arc::new(usage_repo),
            OnLookupError::default(),
        )
    }

    #[tokio::test]
    async fn create_passes_the_gate_and_inserts() {
        let user_id = Uuid::new_v4();
        let appointment_id = Uuid::new_v4();

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_create()
            .returning(move |_| Box::pin(async move { Ok(appointment_id) }));

        let usecase =
            AppointmentUseCase::new(Arc::new(appointment_repo), Arc::new(gate_on_free_plan(3)));

        let created = usecase
            .create(Principal::user(user_id), insert_model())
            .await
            .unwrap();

        assert_eq!(created, appointment_id);
    }

    #[tokio::test]
    async fn create_at_the_free_cap_is_denied_and_nothing_is_inserted() {
        let user_id = Uuid::new_v4();

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo.expect_create().never();

        let usecase =
            AppointmentUseCase::new(Arc::new(appointment_repo), Arc::new(gate_on_free_plan(50)));

        let err = usecase
            .create(Principal::user(user_id), insert_model())
            .await
            .unwrap_err();

        match err {
            AppointmentError::LimitExceeded(info) => {
                assert_eq!(info.limit, 50);
                assert_eq!(info.current, 50);
            }
            other => panic!("expected limit error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_rows_map_to_not_found() {
        let user_id = Uuid::new_v4();
        let appointment_id = Uuid::new_v4();

        let mut appointment_repo = MockAppointmentRepository::new();
        appointment_repo
            .expect_delete()
            .with(eq(appointment_id), eq(user_id))
            .returning(|_, _| Box::pin(async { Err(anyhow::anyhow!("appointment not found")) }));

        let usecase =
            AppointmentUseCase::new(Arc::new(appointment_repo), Arc::new(gate_on_free_plan(0)));

        let err = usecase.delete(user_id, appointment_id).await.unwrap_err();
        assert!(matches!(err, AppointmentError::NotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }
}
