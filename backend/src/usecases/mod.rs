pub mod appointments;
pub mod financial_reports;
pub mod limit_gate;
pub mod locations;
pub mod plan_resolver;
pub mod services;
pub mod subscriptions;
