pub mod appointments;
pub mod financial_reports;
pub mod locations;
pub mod services;
pub mod subscriptions;
