use serde::Serialize;

use crate::domain::value_objects::enums::resource_kinds::ResourceKind;

/// Outcome of a limit-gate check. A deny is a normal decision, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum LimitDecision {
    Allow { usage: Option<ResourceUsage> },
    Deny(LimitInfo),
}

/// Usage side channel surfaced on allow, for display by the caller.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ResourceUsage {
    pub current: i64,
    pub max: i64,
}

/// Structured payload carried by a deny decision.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitInfo {
    pub resource: ResourceKind,
    pub plan_name: String,
    pub limit: i64,
    pub current: i64,
}

impl LimitInfo {
    /// Error label of the external JSON contract, e.g. "Location limit reached".
    pub fn error_label(&self) -> String {
        format!("{} limit reached", self.resource.singular_label())
    }

    /// Actionable upgrade message naming the plan and the cap.
    pub fn message(&self) -> String {
        format!(
            "Your {} plan allows {} {}. Please upgrade to add more.",
            self.plan_name, self.limit, self.resource
        )
    }
}
