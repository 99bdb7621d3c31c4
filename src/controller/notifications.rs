use super::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{FileAction, NotificationItem};
use crate::notifications::{ClickOutcome, ReconcileOutcome, RequestTicket, classify_click};
use crate::view::{DashboardView, Popup, ToastKind};

impl<V: DashboardView> Dashboard<V> {
    pub fn notifications(&self) -> &[NotificationItem] {
        self.reconciler.items()
    }

    pub fn active_decision(&self) -> Option<&NotificationItem> {
        self.active_decision.as_ref()
    }

    /// Takes a sequence ticket for a fetch about to be issued. Split from
    /// [`Self::apply_notification_fetch`] so the request itself can run
    /// without holding the dashboard.
    pub fn begin_notification_fetch(&mut self) -> RequestTicket {
        self.reconciler.begin_request()
    }

    pub fn apply_notification_fetch(
        &mut self,
        ticket: RequestTicket,
        fetched: DashboardResult<Vec<NotificationItem>>,
    ) -> DashboardResult<ReconcileOutcome> {
        let items = match fetched {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Notification fetch failed: {}", e);
                return Err(e);
            }
        };

        let outcome = self.reconciler.reconcile(ticket, items);
        match &outcome {
            ReconcileOutcome::Render(items) => {
                tracing::debug!(
                    "🔔 Rendering {} notifications ({} pending)",
                    items.len(),
                    self.reconciler.pending_count()
                );
                self.view.render_notifications(items);
            }
            ReconcileOutcome::RenderEmpty => {
                tracing::debug!("🔔 No notifications");
                self.view.render_notifications_empty();
            }
            ReconcileOutcome::Unchanged
            | ReconcileOutcome::Stale
            | ReconcileOutcome::ClearDeferred => {}
        }
        Ok(outcome)
    }

    /// One fetch-and-reconcile round
    pub async fn refresh_notifications(&mut self) -> DashboardResult<ReconcileOutcome> {
        let ticket = self.begin_notification_fetch();
        let fetched = self.backend.fetch_notifications().await;
        self.apply_notification_fetch(ticket, fetched)
    }

    /// Click on a rendered notification
    pub async fn open_notification(&mut self, notification_id: &str) -> DashboardResult<ClickOutcome> {
        let Some(item) = self.reconciler.find(notification_id).cloned() else {
            let err = DashboardError::validation("This notification is no longer available.");
            self.report(&err);
            return Err(err);
        };

        let outcome = classify_click(&item);
        match &outcome {
            ClickOutcome::Informational(item) => {
                // A decision left open behind the info dialog must not stay actionable
                self.active_decision = None;
                self.popups.close(&mut self.view, Popup::NotificationDecision);
                self.view.show_notification_message(item);
                self.popups.open(&mut self.view, Popup::NotificationInfo);
            }
            ClickOutcome::Decision(item) => {
                self.active_decision = Some(item.clone());
                self.popups.close(&mut self.view, Popup::NotificationInfo);
                self.view.show_notification_message(item);
                self.popups.open(&mut self.view, Popup::NotificationDecision);

                // The dialog stays usable without a preview
                match self.backend.fetch_file_preview(&item.file_id).await {
                    Ok(preview) => self.view.render_file_preview(&preview.0),
                    Err(e) => self.report(&e),
                }
            }
        }
        Ok(outcome)
    }

    /// Accept or deny the notification open in the decision dialog
    pub async fn decide(&mut self, action: FileAction) -> DashboardResult<()> {
        let Some(item) = self.active_decision.clone() else {
            let err = DashboardError::validation("No notification selected.");
            self.report(&err);
            return Err(err);
        };
        self.submit_decision(&item.id, &item.file_id, action).await
    }

    /// Posts a decision for a notification by id, dialog or not
    pub async fn submit_decision(
        &mut self,
        notification_id: &str,
        file_id: &str,
        action: FileAction,
    ) -> DashboardResult<()> {
        let response = match self
            .backend
            .submit_file_action(notification_id, file_id, action)
            .await
        {
            Ok(response) if response.success => response,
            Ok(response) => {
                let err = DashboardError::Rejected(response.message);
                self.report(&err);
                return Err(err);
            }
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };

        tracing::info!("✅ Notification {} {}", notification_id, action.past_tense());
        if self.reconciler.mark_processed(notification_id) {
            self.view.mark_notification_processed(notification_id);
        }
        let message = if response.message.is_empty() {
            format!("Request {}.", action.past_tense())
        } else {
            response.message
        };
        self.view.toast(ToastKind::Success, &message);
        self.close_notification_dialog();

        // Reconcile with the server right away instead of waiting for the next tick
        if let Err(e) = self.refresh_notifications().await {
            tracing::warn!("Refresh after decision failed: {}", e);
        }
        Ok(())
    }

    pub fn close_notification_dialog(&mut self) {
        self.active_decision = None;
        self.popups.close(&mut self.view, Popup::NotificationDecision);
        self.popups.close(&mut self.view, Popup::NotificationInfo);
    }
}
