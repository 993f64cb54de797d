pub mod inbound;
pub mod notifier;

pub use inbound::{apply_sync, SyncOutcome, SyncPayload};
pub use notifier::{WebhookEvent, WebhookNotifier};
