use anyhow::Result;
use crates::domain::{
    repositories::{plans::PlanRepository, subscriptions::SubscriptionRepository},
    value_objects::plans::EffectivePlan,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Resolves the effective plan for a user: active subscription plan or the
/// implicit free tier fallback.
pub struct PlanResolver<P, S>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    subscription_repo: Arc<S>,
}

impl<P, S> PlanResolver<P, S>
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

    pub async fn resolve_effective_plan_for_user(&self, user_id: Uuid) -> Result<EffectivePlan> {
        if let Some(subscription) = self
            .subscription_repo
            .find_current_active_subscription(user_id)
            .await?
        {
            debug!(
                %user_id,
                plan_id = %subscription.plan_id,
                "plan_resolver: using active subscription plan"
            );
            let plan = self.plan_repo.find_by_id(subscription.plan_id).await?;
            return Ok(EffectivePlan {
                name: plan.name.clone(),
                limits: plan.limits(),
            });
        }

        debug!(%user_id, "plan_resolver: falling back to free plan");
        Ok(EffectivePlan::free())
    }
}
