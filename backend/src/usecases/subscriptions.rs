use chrono::{Duration, Utc};
use crates::domain::{
    entities::subscriptions::InsertSubscriptionEntity,
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::{
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CurrentSubscriptionDto, PlanDto},
    },
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("no active subscription to cancel")]
    SubscriptionNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SubscriptionError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            SubscriptionError::PlanNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::SubscriptionNotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, SubscriptionError>;

pub struct SubscriptionUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
}

impl<P, S> SubscriptionUseCase<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, subscription_repo: Arc<S>) -> Self {
        Self {
            plan_repo,
            subscription_repo,
        }
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        info!("subscriptions: listing active plans");
        let plans = self.plan_repo.list_active_plans().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list active plans");
            SubscriptionError::Internal(err)
        })?;

        let plan_count = plans.len();
        info!(plan_count, "subscriptions: active plans loaded");
        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    pub async fn get_current_subscription(
        &self,
        user_id: Uuid,
    ) -> UseCaseResult<Option<CurrentSubscriptionDto>> {
        info!(%user_id, "subscriptions: loading current subscription");
        let subscription = match self
            .subscription_repo
            .find_current_active_subscription(user_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load current subscription"
                );
                SubscriptionError::Internal(err)
            })? {
            Some(subscription) => subscription,
            None => {
                info!(%user_id, "subscriptions: no active subscription");
                return Ok(None);
            }
        };

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    plan_id = %subscription.plan_id,
                    db_error = ?err,
                    "subscriptions: failed to load active plan"
                );
                SubscriptionError::Internal(err)
            })?;

        Ok(Some(CurrentSubscriptionDto {
            plan_id: plan.id,
            plan_name: plan.name.clone(),
            status: SubscriptionStatus::from_str(&subscription.status),
            starts_at: subscription.starts_at,
            ends_at: subscription.ends_at,
            limits: plan.limits(),
        }))
    }

    /// Subscribes the user to `plan_id`, replacing any current active
    /// subscription. The period length comes from the plan.
    pub async fn subscribe(&self, user_id: Uuid, plan_id: Uuid) -> UseCaseResult<Uuid> {
        info!(%user_id, %plan_id, "subscriptions: subscribe requested");

        let plan = self.plan_repo.find_by_id(plan_id).await.map_err(|err| {
            error!(%user_id, %plan_id, db_error = ?err, "subscriptions: plan lookup failed");
            SubscriptionError::PlanNotFound
        })?;

        if let Some(current) = self
            .subscription_repo
            .find_current_active_subscription(user_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load current subscription before subscribe"
                );
                SubscriptionError::Internal(err)
            })?
        {
            info!(
                %user_id,
                replaced_subscription_id = %current.id,
                "subscriptions: canceling current subscription before subscribe"
            );
            self.subscription_repo
                .cancel_subscription(current.id)
                .await
                .map_err(|err| {
                    error!(
                        %user_id,
                        subscription_id = %current.id,
                        db_error = ?err,
                        "subscriptions: failed to cancel current subscription"
                    );
                    SubscriptionError::Internal(err)
                })?;
        }

        let now = Utc::now();
        let subscription_id = self
            .subscription_repo
            .subscribe(InsertSubscriptionEntity {
                user_id,
                plan_id,
                starts_at: now,
                ends_at: now + Duration::days(i64::from(plan.duration_days)),
                canceled_at: None,
                status: SubscriptionStatus::Active.to_string(),
            })
            .await
            .map_err(|err| {
                error!(%user_id, %plan_id, db_error = ?err, "subscriptions: failed to subscribe");
                SubscriptionError::Internal(err)
            })?;

        info!(%user_id, %subscription_id, "subscriptions: subscribed");
        Ok(subscription_id)
    }

    pub async fn cancel(&self, user_id: Uuid) -> UseCaseResult<()> {
        info!(%user_id, "subscriptions: cancel requested");

        let current = self
            .subscription_repo
            .find_current_active_subscription(user_id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    db_error = ?err,
                    "subscriptions: failed to load current subscription before cancel"
                );
                SubscriptionError::Internal(err)
            })?
            .ok_or(SubscriptionError::SubscriptionNotFound)?;

        self.subscription_repo
            .cancel_subscription(current.id)
            .await
            .map_err(|err| {
                error!(
                    %user_id,
                    subscription_id = %current.id,
                    db_error = ?err,
                    "subscriptions: failed to cancel subscription"
                );
                SubscriptionError::Internal(err)
            })?;

        info!(%user_id, subscription_id = %current.id, "subscriptions: canceled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crates::domain::{
        entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
        repositories::{plans::MockPlanRepository, subscriptions::MockSubscriptionRepository},
    };
    use mockall::predicate::eq;

    fn sample_plan(id: Uuid) -> PlanEntity {
        PlanEntity {
            id,
            name: "standard".to_string(),
            price_minor: 1500,
            duration_days: 30,
            max_appointments: 500,
            max_locations: 10,
            max_services: 50,
            is_active: true,
        }
    }

    fn active_subscription(user_id: Uuid, plan_id: Uuid) -> SubscriptionEntity {
        let now = Utc::now();
        SubscriptionEntity {
            id: Uuid::new_v4(),
            user_id,
            plan_id,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(29),
            canceled_at: None,
            status: SubscriptionStatus::Active.to_string(),
            created_at: now,
        }
    }

    #[tokio::test]
    async fn subscribing_replaces_the_current_subscription() {
        let user_id = Uuid::new_v4();
        let old_plan_id = Uuid::new_v4();
        let new_plan_id = Uuid::new_v4();
        let new_subscription_id = Uuid::new_v4();

        let current = active_subscription(user_id, old_plan_id);
        let current_id = current.id;

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .with(eq(new_plan_id))
            .returning(move |id| {
                let plan = sample_plan(id);
                Box::pin(async move { Ok(plan) })
            });

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .with(eq(user_id))
            .returning(move |_| {
                let current = current.clone();
                Box::pin(async move { Ok(Some(current)) })
            });
        subscription_repo
            .expect_cancel_subscription()
            .with(eq(current_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        subscription_repo
            .expect_subscribe()
            .withf(move |entity| entity.user_id == user_id && entity.plan_id == new_plan_id)
            .returning(move |_| Box::pin(async move { Ok(new_subscription_id) }));

        let usecase = SubscriptionUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let subscribed = usecase.subscribe(user_id, new_plan_id).await.unwrap();
        assert_eq!(subscribed, new_subscription_id);
    }

    #[tokio::test]
    async fn subscribing_to_an_unknown_plan_fails() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Err(anyhow::anyhow!("no rows")) }));

        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_subscribe().never();

        let usecase = SubscriptionUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let err = usecase.subscribe(user_id, plan_id).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::PlanNotFound));
    }

    #[tokio::test]
    async fn canceling_without_a_subscription_fails() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .returning(|_| Box::pin(async { Ok(None) }));
        subscription_repo.expect_cancel_subscription().never();

        let usecase = SubscriptionUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let err = usecase.cancel(user_id).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::SubscriptionNotFound));
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn current_subscription_surfaces_plan_limits() {
        let user_id = Uuid::new_v4();
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .with(eq(plan_id))
            .returning(move |id| {
                let plan = sample_plan(id);
                Box::pin(async move { Ok(plan) })
            });

        let mut subscription_repo = MockSubscriptionRepository::new();
        let subscription = active_subscription(user_id, plan_id);
        subscription_repo
            .expect_find_current_active_subscription()
            .returning(move |_| {
                let subscription = subscription.clone();
                Box::pin(async move { Ok(Some(subscription)) })
            });

        let usecase = SubscriptionUseCase::new(Arc::new(plan_repo), Arc::new(subscription_repo));

        let current = usecase
            .get_current_subscription(user_id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(current.plan_name, "standard");
        assert_eq!(current.limits.max_locations, 10);
    }
}
