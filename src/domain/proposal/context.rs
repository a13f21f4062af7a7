//! Acting-party context passed through every transition.

use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use crate::domain::foundation::UserId;

use super::Notice;

/// Notices collected while handling one request.
///
/// Clones share the same buffer, so a notifier adapter and the HTTP layer
/// see the same messages.
#[derive(Debug, Clone, Default)]
pub struct NoticeBuffer(Arc<Mutex<Vec<Notice>>>);

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notice: Notice) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    /// Copy of the notices collected so far, in push order.
    pub fn snapshot(&self) -> Vec<Notice> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every collected notice.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Who is acting, plus where their notices go.
#[derive(Debug, Clone)]
pub struct ActingContext {
    /// The party requesting the transition.
    pub actor: UserId,

    /// Links log lines of one request together.
    correlation_id: String,

    /// Messages surfaced back to the acting party.
    pub notices: NoticeBuffer,
}

impl ActingContext {
    /// Creates a context with a fresh correlation id and empty buffer.
    pub fn new(actor: UserId) -> Self {
        Self {
            actor,
            correlation_id: Uuid::new_v4().to_string(),
            notices: NoticeBuffer::new(),
        }
    }

    /// Builder: use a correlation id supplied by the caller.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = id.into();
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Shortcut for `self.notices.push`.
    pub fn notify(&self, notice: Notice) {
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ActingContext {
        ActingContext::new(UserId::new("op-1").unwrap())
    }

    #[test]
    fn clones_share_notice_buffer() {
        let ctx = ctx();
        let clone = ctx.clone();
        clone.notify(Notice::info("hello"));
        assert_eq!(ctx.notices.snapshot(), vec![Notice::info("hello")]);
    }

    #[test]
    fn take_empties_buffer() {
        let ctx = ctx();
        ctx.notify(Notice::success("one"));
        ctx.notify(Notice::warning("two"));
        let taken = ctx.notices.take();
        assert_eq!(taken.len(), 2);
        assert!(ctx.notices.is_empty());
    }

    #[test]
    fn correlation_id_can_be_overridden() {
        let ctx = ctx().with_correlation_id("req-7");
        assert_eq!(ctx.correlation_id(), "req-7");
    }
}
