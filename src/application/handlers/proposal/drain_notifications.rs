//! DrainNotificationsHandler - hands a party the notices waiting for them.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::proposal::{Notice, ProposalError};
use crate::ports::NotificationInbox;

pub struct DrainNotificationsHandler {
    inbox: Arc<dyn NotificationInbox>,
}

impl DrainNotificationsHandler {
    pub fn new(inbox: Arc<dyn NotificationInbox>) -> Self {
        Self { inbox }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Notice>, ProposalError> {
        Ok(self.inbox.drain(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPartyDirectory;
    use crate::adapters::notify::InAppNotifier;
    use crate::ports::ProposalNotifier;

    #[tokio::test]
    async fn drains_then_empties() {
        let notifier = Arc::new(InAppNotifier::new(Arc::new(InMemoryPartyDirectory::new())));
        let op = UserId::new("op-1").unwrap();
        notifier
            .deliver(&op, Notice::info("Your offer was declined"))
            .await
            .unwrap();
        let handler = DrainNotificationsHandler::new(notifier);

        assert_eq!(handler.handle(&op).await.unwrap().len(), 1);
        assert!(handler.handle(&op).await.unwrap().is_empty());
    }
}
