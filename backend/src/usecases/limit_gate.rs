use anyhow::Result;
use crates::domain::{
    repositories::{
        plans::PlanRepository, subscriptions::SubscriptionRepository,
        usage_counts::UsageCountRepository,
    },
    value_objects::{
        enums::resource_kinds::ResourceKind,
        iam::Principal,
        limits::{LimitDecision, LimitInfo, ResourceUsage},
        plans::UNLIMITED,
    },
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::usecases::plan_resolver::PlanResolver;

/// Policy applied when resolving the plan or counting usage fails. The
/// default keeps the request flowing and only logs the failure; `Deny`
/// propagates the error to the caller instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnLookupError {
    #[default]
    Allow,
    Deny,
}

/// Admits or rejects a mutating request based on the caller's plan caps and
/// current row counts. Checked on every gated request; the count-then-decide
/// sequence is not transactional, matching the store's single-writer
/// assumption.
pub struct LimitGate<P, S, U>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    plan_resolver: Arc<PlanResolver<P, S>>,
    usage_repo: Arc<U>,
    on_lookup_error: OnLookupError,
}

impl<P, S, U> LimitGate<P, S, U>
where
    P: PlanRepository + Send + Sync + 'static,
    S: SubscriptionRepository + Send + Sync + 'static,
    U: UsageCountRepository + Send + Sync + 'static,
{
    pub fn new(
        plan_resolver: Arc<PlanResolver<P, S>>,
        usage_repo: Arc<U>,
        on_lookup_error: OnLookupError,
    ) -> Self {
        Self {
            plan_resolver,
            usage_repo,
            on_lookup_error,
        }
    }

    /// Decides whether `principal` may create one more row of `resource`.
    /// Super admins bypass the gate entirely; an unlimited cap short-circuits
    /// before counting.
    pub async fn check(
        &self,
        principal: Principal,
        resource: ResourceKind,
    ) -> Result<LimitDecision> {
        let user_id = principal.user_id;

        if principal.super_admin {
            debug!(%user_id, %resource, "limit_gate: super admin bypass");
            return Ok(LimitDecision::Allow { usage: None });
        }

        let plan = match self
            .plan_resolver
            .resolve_effective_plan_for_user(user_id)
            .await
        {
            Ok(plan) => plan,
            Err(err) => return self.apply_lookup_error_policy(user_id, resource, err),
        };

        let cap = plan.limits.cap_for(resource);
        if cap == UNLIMITED {
            debug!(
                %user_id,
                %resource,
                plan_name = plan.name,
                "limit_gate: unlimited cap, skipping count"
            );
            return Ok(LimitDecision::Allow { usage: None });
        }

        let current = match self.usage_repo.count_for_user(resource, user_id).await {
            Ok(count) => count,
            Err(err) => return self.apply_lookup_error_policy(user_id, resource, err),
        };

        let cap = i64::from(cap);
        if current >= cap {
            warn!(
                %user_id,
                %resource,
                plan_name = plan.name,
                cap,
                current,
                status = axum::http::StatusCode::FORBIDDEN.as_u16(),
                "limit_gate: limit reached"
            );
            return Ok(LimitDecision::Deny(LimitInfo {
                resource,
                plan_name: plan.name,
                limit: cap,
                current,
            }));
        }

        debug!(%user_id, %resource, cap, current, "limit_gate: allowed");
        Ok(LimitDecision::Allow {
            usage: Some(ResourceUsage { current, max: cap }),
        })
    }

    fn apply_lookup_error_policy(
        &self,
        user_id: uuid::Uuid,
        resource: ResourceKind,
        err: anyhow::Error,
    ) -> Result<LimitDecision> {
        match self.on_lookup_error {
            OnLookupError::Allow => {
                // Availability over strict enforcement: a store failure must
                // not block the user's workflow.
                error!(
                    %user_id,
                    %resource,
                    db_error = ?err,
                    "limit_gate: lookup failed, failing open"
                );
                Ok(LimitDecision::Allow { usage: None })
            }
            OnLookupError::Deny => {
                error!(
                    %user_id,
                    %resource,
                    db_error = ?err,
                    "limit_gate: lookup failed, failing closed"
                );
                Err(err)
            }
        }
    }
}

/// Logs an allow decision's usage side channel, mirroring what callers show
/// in the UI.
pub fn log_usage(resource: ResourceKind, usage: Option<ResourceUsage>) {
    if let Some(usage) = usage {
        info!(
            %resource,
            current = usage.current,
            max = usage.max,
            "limit_gate: usage after check"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::{Duration, Utc};
    use crates::domain::{
        entities::{plans::PlanEntity, subscriptions::SubscriptionEntity},
        repositories::{
            plans::MockPlanRepository, subscriptions::MockSubscriptionRepository,
            usage_counts::MockUsageCountRepository,
        },
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    };
    use mockall::predicate::eq;
    use uuid::Uuid;

    fn plan_with_caps(appointments: i32, locations: i32, services: i32) -> PlanEntity {
        PlanEntity {
            id: Uuid::new_v4(),
            name: "standard".to_string(),
            price_minor: 1500,
            duration_days: 30,
            max_appointments: appointments,
            max_locations: locations,
            max_services: services,
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

    fn subscribed_repos(
        user_id: Uuid,
        plan: PlanEntity,
    ) -> (MockPlanRepository, MockSubscriptionRepository) {
        let mut plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();

        let subscription = active_subscription(user_id, plan.id);
        subscription_repo
            .expect_find_current_active_subscription()
            .with(eq(user_id))
            .returning(move |_| {
                let subscription = subscription.clone();
                Box::pin(async move { Ok(Some(subscription)) })
            });

        plan_repo
            .expect_find_by_id()
            .with(eq(plan.id))
            .returning(move |_| {
                let plan = plan.clone();
                Box::pin(async move { Ok(plan) })
            });

        (plan_repo, subscription_repo)
    }

    fn usage_returning(count: i64) -> MockUsageCountRepository {
        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo
            .expect_count_for_user()
            .returning(move |_, _| Box::pin(async move { Ok(count) }));
        usage_repo
    }

    fn gate<P, S, U>(plan_repo: P, subscription_repo: S, usage_repo: U) -> LimitGate<P, S, U>
    where
        P: PlanRepository + Send + Sync + 'static,
        S: SubscriptionRepository + Send + Sync + 'static,
        U: UsageCountRepository + Send + Sync + 'static,
    {
        LimitGate::new(
            Arc::new(PlanResolver::new(
                Arc::new(plan_repo),
                Arc::new(subscription_repo),
            )),
            Arc::new(usage_repo),
            OnLookupError::default(),
        )
    }

    #[tokio::test]
    async fn allows_below_the_cap_and_surfaces_usage() {
        let user_id = Uuid::new_v4();
        let (plan_repo, subscription_repo) = subscribed_repos(user_id, plan_with_caps(500, 10, 50));

        let gate = gate(plan_repo, subscription_repo, usage_returning(3));
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Locations)
            .await
            .unwrap();

        assert_eq!(
            decision,
            LimitDecision::Allow {
                usage: Some(ResourceUsage { current: 3, max: 10 })
            }
        );
    }

    #[tokio::test]
    async fn denies_at_the_cap_with_current_and_limit() {
        let user_id = Uuid::new_v4();
        let (plan_repo, subscription_repo) = subscribed_repos(user_id, plan_with_caps(500, 10, 50));

        let gate = gate(plan_repo, subscription_repo, usage_returning(10));
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Locations)
            .await
            .unwrap();

        match decision {
            LimitDecision::Deny(info) => {
                assert_eq!(info.limit, 10);
                assert_eq!(info.current, 10);
                assert_eq!(info.plan_name, "standard");
                assert_eq!(info.resource, ResourceKind::Locations);
            }
            other => panic!("expected deny, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn denies_above_the_cap() {
        let user_id = Uuid::new_v4();
        let (plan_repo, subscription_repo) = subscribed_repos(user_id, plan_with_caps(500, 10, 50));

        let gate = gate(plan_repo, subscription_repo, usage_returning(12));
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Locations)
            .await
            .unwrap();

        match decision {
            LimitDecision::Deny(info) => assert_eq!(info.current, 12),
            other => panic!("expected deny, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unlimited_cap_allows_without_counting() {
        let user_id = Uuid::new_v4();
        let (plan_repo, subscription_repo) = subscribed_repos(user_id, plan_with_caps(-1, -1, -1));

        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo.expect_count_for_user().never();

        let gate = gate(plan_repo, subscription_repo, usage_repo);
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Appointments)
            .await
            .unwrap();

        assert_eq!(decision, LimitDecision::Allow { usage: None });
    }

    #[tokio::test]
    async fn super_admin_bypasses_the_gate_without_queries() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .never();
        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo.expect_count_for_user().never();

        let gate = gate(plan_repo, subscription_repo, usage_repo);
        let decision = gate
            .check(Principal::super_admin(user_id), ResourceKind::Services)
            .await
            .unwrap();

        assert_eq!(decision, LimitDecision::Allow { usage: None });
    }

    #[tokio::test]
    async fn free_plan_fallback_denies_third_location() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let gate = gate(plan_repo, subscription_repo, usage_returning(2));
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Locations)
            .await
            .unwrap();

        match decision {
            LimitDecision::Deny(info) => {
                assert_eq!(info.limit, 2);
                assert_eq!(info.current, 2);
                assert_eq!(info.plan_name, "free");
                assert_eq!(
                    info.message(),
                    "Your free plan allows 2 locations. Please upgrade to add more."
                );
            }
            other => panic!("expected deny, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn free_plan_fallback_allows_after_a_slot_opens() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .with(eq(user_id))
            .returning(|_| Box::pin(async { Ok(None) }));

        let gate = gate(plan_repo, subscription_repo, usage_returning(1));
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Locations)
            .await
            .unwrap();

        assert_eq!(
            decision,
            LimitDecision::Allow {
                usage: Some(ResourceUsage { current: 1, max: 2 })
            }
        );
    }

    #[tokio::test]
    async fn fails_open_when_plan_resolution_fails() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .returning(|_| Box::pin(async { Err(anyhow!("store unavailable")) }));
        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo.expect_count_for_user().never();

        let gate = gate(plan_repo, subscription_repo, usage_repo);
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Appointments)
            .await
            .unwrap();

        assert_eq!(decision, LimitDecision::Allow { usage: None });
    }

    #[tokio::test]
    async fn fails_open_when_counting_fails() {
        let user_id = Uuid::new_v4();
        let (plan_repo, subscription_repo) = subscribed_repos(user_id, plan_with_caps(500, 10, 50));

        let mut usage_repo = MockUsageCountRepository::new();
        usage_repo
            .expect_count_for_user()
            .returning(|_, _| Box::pin(async { Err(anyhow!("store unavailable")) }));

        let gate = gate(plan_repo, subscription_repo, usage_repo);
        let decision = gate
            .check(Principal::user(user_id), ResourceKind::Appointments)
            .await
            .unwrap();

        assert_eq!(decision, LimitDecision::Allow { usage: None });
    }

    #[tokio::test]
    async fn deny_policy_propagates_lookup_errors() {
        let user_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_current_active_subscription()
            .returning(|_| Box::pin(async { Err(anyhow!("store unavailable")) }));

        let gate = LimitGate::new(
            Arc::new(PlanResolver::new(
                Arc::new(plan_repo),
                Arc::new(subscription_repo),
            )),
            Arc::new(MockUsageCountRepository::new()),
            OnLookupError::Deny,
        );

        let result = gate
            .check(Principal::user(user_id), ResourceKind::Appointments)
            .await;

        assert!(result.is_err());
    }
}
