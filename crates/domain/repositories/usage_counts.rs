use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::enums::resource_kinds::ResourceKind;

/// Counts a user's current rows in the table backing a resource kind.
/// Invoked on every gated mutation; results are never cached across
/// requests, so a deleted row frees a slot immediately.
#[async_trait]
#[automock]
pub trait UsageCountRepository {
    async fn count_for_user(&self, resource: ResourceKind, user_id: Uuid) -> Result<i64>;
}
