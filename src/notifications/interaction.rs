use crate::models::{NotificationItem, NotificationKind};

/// What clicking a rendered notification leads to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Already handled (or not actionable): show the message only
    Informational(NotificationItem),
    /// Pending file delivery or access request awaiting accept/deny
    Decision(NotificationItem),
}

pub fn classify_click(item: &NotificationItem) -> ClickOutcome {
    match item.kind {
        NotificationKind::Received | NotificationKind::AccessRequest if item.is_pending() => {
            ClickOutcome::Decision(item.clone())
        }
        _ => ClickOutcome::Informational(item.clone()),
    }
}
