//! The dashboard controller: owns all client-side state, talks to the
//! backend and pushes projections of its state into the view.

mod files;
mod notifications;
mod upload;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::models::NotificationItem;
use crate::notifications::Reconciler;
use crate::services::backend::DashboardBackend;
use crate::view::{DashboardView, PopupState, ToastKind};
use crate::wizard::{UploadSession, WizardState};
use std::sync::Arc;

pub use files::FileListState;

pub struct Dashboard<V: DashboardView> {
    backend: Arc<dyn DashboardBackend>,
    view: V,
    config: DashboardConfig,
    popups: PopupState,
    wizard_state: WizardState,
    session: UploadSession,
    reconciler: Reconciler,
    /// Notification currently open in the decision dialog
    active_decision: Option<NotificationItem>,
    file_list: FileListState,
}

impl<V: DashboardView> Dashboard<V> {
    pub fn new(backend: Arc<dyn DashboardBackend>, view: V, config: DashboardConfig) -> Self {
        let reconciler = Reconciler::new(config.empty_polls_before_clear);
        Self {
            backend,
            view,
            config,
            popups: PopupState::default(),
            wizard_state: WizardState::Idle,
            session: UploadSession::default(),
            reconciler,
            active_decision: None,
            file_list: FileListState::default(),
        }
    }

    pub fn backend(&self) -> Arc<dyn DashboardBackend> {
        Arc::clone(&self.backend)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn popups(&self) -> &PopupState {
        &self.popups
    }

    fn report(&mut self, err: &DashboardError) {
        if err.is_validation() {
            tracing::info!("Validation failed: {}", err);
        } else {
            tracing::warn!("Request failed: {}", err);
        }
        let message = err.toast_message();
        self.view.toast(ToastKind::Error, &message);
    }

    fn report_validation(&mut self, message: &str) {
        tracing::info!("Validation failed: {}", message);
        self.view.toast(ToastKind::Error, message);
    }
}
