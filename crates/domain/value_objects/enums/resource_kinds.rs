use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Resource kinds whose row counts are capped by the active plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Appointments,
    Locations,
    Services,
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ResourceKind::Appointments => "appointments",
            ResourceKind::Locations => "locations",
            ResourceKind::Services => "services",
        };
        write!(f, "{}", kind)
    }
}

impl ResourceKind {
    /// Singular label used in denial errors, e.g. "Appointment limit reached".
    pub fn singular_label(&self) -> &'static str {
        match self {
            ResourceKind::Appointments => "Appointment",
            ResourceKind::Locations => "Location",
            ResourceKind::Services => "Service",
        }
    }
}
