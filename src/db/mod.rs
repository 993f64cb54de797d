pub mod connection;
pub mod schema;
pub mod projects;
pub mod financials;
pub mod invoices;
pub mod settings;
pub mod sync_events;

pub use connection::Database;
