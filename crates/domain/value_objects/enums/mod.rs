pub mod resource_kinds;
pub mod subscription_statuses;
