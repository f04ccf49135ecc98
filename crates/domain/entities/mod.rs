pub mod appointments;
pub mod locations;
pub mod plans;
pub mod services;
pub mod subscriptions;
