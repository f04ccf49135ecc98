use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller as seen by the usecases. Built by the HTTP layer
/// from the verified JWT; usecases never look at request state directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub super_admin: bool,
}

impl Principal {
    pub fn user(user_id: Uuid) -> Self {
        Self {
            user_id,
            super_admin: false,
        }
    }

    pub fn super_admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            super_admin: true,
        }
    }
}
