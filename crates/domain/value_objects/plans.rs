use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::resource_kinds::ResourceKind;

/// Cap value meaning "no limit" for a resource kind.
pub const UNLIMITED: i32 = -1;

/// Per-resource caps attached to a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanLimits {
    pub max_appointments: i32,
    pub max_locations: i32,
    pub max_services: i32,
}

impl PlanLimits {
    pub fn cap_for(&self, resource: ResourceKind) -> i32 {
        match resource {
            ResourceKind::Appointments => self.max_appointments,
            ResourceKind::Locations => self.max_locations,
            ResourceKind::Services => self.max_services,
        }
    }
}

/// The plan the limit gate consults for a user: either the plan joined via
/// the active subscription, or the implicit free tier when no such
/// subscription exists. The free tier is not a stored row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EffectivePlan {
    pub name: String,
    pub limits: PlanLimits,
}

impl EffectivePlan {
    pub fn free() -> Self {
        Self {
            name: "free".to_string(),
            limits: PlanLimits {
                max_appointments: 50,
                max_locations: 2,
                max_services: 10,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_carries_default_caps() {
        let plan = EffectivePlan::free();
        assert_eq!(plan.name, "free");
        assert_eq!(plan.limits.cap_for(ResourceKind::Appointments), 50);
        assert_eq!(plan.limits.cap_for(ResourceKind::Locations), 2);
        assert_eq!(plan.limits.cap_for(ResourceKind::Services), 10);
    }
}
