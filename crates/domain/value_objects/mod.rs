pub mod appointments;
pub mod enums;
pub mod finance;
pub mod iam;
pub mod limits;
pub mod locations;
pub mod plans;
pub mod services;
pub mod subscriptions;
pub mod tax_year;
