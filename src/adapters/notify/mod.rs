//! Notification adapters.
//!
//! - `InAppNotifier` - notices returned with the response plus a per-user inbox
//! - `LoggingAgreementQueue` - `[ADMIN-QUEUE]` log lines for the admin team
//! - `InMemoryAgreementQueue` - recording queue for tests

mod agreement_queue;
mod in_app;

pub use agreement_queue::{InMemoryAgreementQueue, LoggingAgreementQueue};
pub use in_app::InAppNotifier;
