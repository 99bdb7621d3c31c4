use crate::models::{NotificationItem, NotificationStatus};

/// Issued when a notification fetch starts; newer tickets compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The id sequence changed; the list must be re-rendered
    Render(Vec<NotificationItem>),
    /// Nothing to show; render the empty-state placeholder
    RenderEmpty,
    Unchanged,
    /// A later request has already been applied
    Stale,
    /// Empty fetch ignored until enough consecutive empties arrive
    ClearDeferred,
}

/// Keeps the rendered notification list in step with the server while
/// touching the view only when the ordered id sequence changes.
///
/// Content changes under an unchanged id sequence (e.g. a status flip) are
/// not re-rendered.
#[derive(Debug)]
pub struct Reconciler {
    next_ticket: u64,
    last_applied: Option<RequestTicket>,
    /// `None` until the first render
    rendered_ids: Option<Vec<String>>,
    items: Vec<NotificationItem>,
    empty_streak: u32,
    empty_polls_before_clear: u32,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Reconciler {
    pub fn new(empty_polls_before_clear: u32) -> Self {
        Self {
            next_ticket: 0,
            last_applied: None,
            rendered_ids: None,
            items: Vec::new(),
            empty_streak: 0,
            empty_polls_before_clear: empty_polls_before_clear.max(1),
        }
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.next_ticket += 1;
        RequestTicket(self.next_ticket)
    }

    pub fn reconcile(
        &mut self,
        ticket: RequestTicket,
        fetched: Vec<NotificationItem>,
    ) -> ReconcileOutcome {
        if self.last_applied.is_some_and(|last| ticket < last) {
            tracing::debug!("Discarding stale notification response {:?}", ticket);
            return ReconcileOutcome::Stale;
        }
        self.last_applied = Some(ticket);

        let ids: Vec<String> = fetched.iter().map(|n| n.id.clone()).collect();

        if ids.is_empty() && self.rendered_ids.as_ref().is_some_and(|r| !r.is_empty()) {
            self.empty_streak += 1;
            if self.empty_streak < self.empty_polls_before_clear {
                return ReconcileOutcome::ClearDeferred;
            }
        } else {
            self.empty_streak = 0;
        }

        if self.rendered_ids.as_ref() == Some(&ids) {
            return ReconcileOutcome::Unchanged;
        }

        self.rendered_ids = Some(ids);
        self.empty_streak = 0;
        self.items = fetched;

        if self.items.is_empty() {
            ReconcileOutcome::RenderEmpty
        } else {
            ReconcileOutcome::Render(self.items.clone())
        }
    }

    /// Local optimistic update after a decision; the next poll is authoritative
    pub fn mark_processed(&mut self, notification_id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == notification_id) {
            Some(item) => {
                item.status = NotificationStatus::Processed;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, notification_id: &str) -> Option<&NotificationItem> {
        self.items.iter().find(|n| n.id == notification_id)
    }

    pub fn items(&self) -> &[NotificationItem] {
        &self.items
    }

    pub fn pending_count(&self) -> usize {
        self.items.iter().filter(|n| n.is_pending()).count()
    }
}
