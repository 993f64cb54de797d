pub mod dashboard;
pub mod health;
pub mod projects;
pub mod reports;
pub mod revenue;
pub mod settings;
pub mod webhooks;
