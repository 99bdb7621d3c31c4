//! Presentation seam of the dashboard.
//!
//! The controller never reads state back from the view: everything shown is
//! a projection of controller-owned state pushed through [`DashboardView`].

use crate::models::{FieldDescriptor, FileEntry, HardcopyRecord, NotificationItem, SubDepartment};

/// Modal overlays the dashboard can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Popup {
    UploadDetails,
    Hardcopy,
    HardcopyLink,
    NotificationInfo,
    NotificationDecision,
    FilePreview,
    SendFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Local message area of the hardcopy step, separate from global toasts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionDisplay {
    Loading,
    Suggested(String),
    Unavailable(String),
}

pub trait DashboardView: Send {
    fn show_popup(&mut self, popup: Popup);
    fn hide_popup(&mut self, popup: Popup);
    fn toast(&mut self, kind: ToastKind, message: &str);

    fn render_document_fields(&mut self, fields: &[FieldDescriptor]);
    fn render_sub_departments(&mut self, sub_departments: &[SubDepartment]);
    fn render_storage_suggestion(&mut self, suggestion: &SuggestionDisplay);
    fn render_hardcopy_options(&mut self, records: &[HardcopyRecord]);

    /// Replaces the whole rendered notification list
    fn render_notifications(&mut self, items: &[NotificationItem]);
    fn render_notifications_empty(&mut self);
    /// Flips a single rendered item to the processed look
    fn mark_notification_processed(&mut self, notification_id: &str);
    fn show_notification_message(&mut self, item: &NotificationItem);

    fn render_file_preview(&mut self, fragment: &str);
    fn render_files(&mut self, files: &[FileEntry]);
    fn navigate(&mut self, location: &str);
}

/// Tracks which popups are currently open so show/hide calls stay idempotent
#[derive(Debug, Default, Clone)]
pub struct PopupState {
    open: Vec<Popup>,
}

impl PopupState {
    pub fn open<V: DashboardView + ?Sized>(&mut self, view: &mut V, popup: Popup) {
        if !self.open.contains(&popup) {
            self.open.push(popup);
            view.show_popup(popup);
        }
    }

    pub fn close<V: DashboardView + ?Sized>(&mut self, view: &mut V, popup: Popup) {
        if let Some(pos) = self.open.iter().position(|p| *p == popup) {
            self.open.remove(pos);
            view.hide_popup(popup);
        }
    }

    pub fn is_open(&self, popup: Popup) -> bool {
        self.open.contains(&popup)
    }

    pub fn top(&self) -> Option<Popup> {
        self.open.last().copied()
    }
}

/// Headless view that reports everything through `tracing`
#[derive(Debug, Default)]
pub struct TerminalView {
    /// Last location the dashboard navigated to
    pub location: Option<String>,
}

impl DashboardView for TerminalView {
    fn show_popup(&mut self, popup: Popup) {
        tracing::debug!("Popup opened: {:?}", popup);
    }

    fn hide_popup(&mut self, popup: Popup) {
        tracing::debug!("Popup closed: {:?}", popup);
    }

    fn toast(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Success => tracing::info!("✅ {}", message),
            ToastKind::Error => tracing::error!("❌ {}", message),
        }
    }

    fn render_document_fields(&mut self, fields: &[FieldDescriptor]) {
        for field in fields {
            tracing::info!(
                "Field {} ({}){}",
                field.label,
                field.field_type,
                if field.required { " *" } else { "" }
            );
        }
    }

    fn render_sub_departments(&mut self, sub_departments: &[SubDepartment]) {
        for sub in sub_departments {
            tracing::info!("Sub-department {}: {}", sub.id, sub.name);
        }
    }

    fn render_storage_suggestion(&mut self, suggestion: &SuggestionDisplay) {
        match suggestion {
            SuggestionDisplay::Loading => tracing::debug!("Fetching storage suggestion..."),
            SuggestionDisplay::Suggested(text) => tracing::info!("📦 Suggested storage: {}", text),
            SuggestionDisplay::Unavailable(text) => tracing::warn!("📦 {}", text),
        }
    }

    fn render_hardcopy_options(&mut self, records: &[HardcopyRecord]) {
        for record in records {
            tracing::info!("Hardcopy {}: {}", record.id, record.file_name);
        }
    }

    fn render_notifications(&mut self, items: &[NotificationItem]) {
        tracing::info!("🔔 {} notification(s)", items.len());
        for item in items {
            tracing::info!(
                "  [{}] {:?}/{:?} {} {}",
                item.id,
                item.kind,
                item.status,
                item.timestamp,
                item.message
            );
        }
    }

    fn render_notifications_empty(&mut self) {
        tracing::info!("🔔 No new notifications");
    }

    fn mark_notification_processed(&mut self, notification_id: &str) {
        tracing::info!("Notification {} processed", notification_id);
    }

    fn show_notification_message(&mut self, item: &NotificationItem) {
        tracing::info!("{}", item.message);
    }

    fn render_file_preview(&mut self, fragment: &str) {
        tracing::info!("Preview: {}", fragment);
    }

    fn render_files(&mut self, files: &[FileEntry]) {
        for file in files {
            tracing::info!(
                "{:>8}  {:<12} {:<20} {:>10}  {}{}",
                file.id,
                file.document_type,
                file.uploaded_at,
                file.size,
                file.name,
                if file.has_hardcopy { "  [hardcopy]" } else { "" }
            );
        }
    }

    fn navigate(&mut self, location: &str) {
        tracing::info!("➡️  Navigating to {}", location);
        self.location = Some(location.to_string());
    }
}
