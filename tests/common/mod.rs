#![allow(dead_code)]

use async_trait::async_trait;
use doc_dashboard::models::{
    ActionResponse, FieldDescriptor, FileAction, FileEntry, FilePreview, HardcopyRecord,
    NotificationItem, NotificationKind, NotificationStatus, SubDepartment, UploadResponse,
    UploadSubmission,
};
use doc_dashboard::services::backend::StorageSuggestion;
use doc_dashboard::view::{Popup, SuggestionDisplay, ToastKind};
use doc_dashboard::{
    Dashboard, DashboardBackend, DashboardConfig, DashboardError, DashboardResult, DashboardView,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum SuggestionMode {
    Suggest(String),
    Unavailable(String),
    Fail,
}

fn server_failure() -> DashboardError {
    DashboardError::Server {
        status: 500,
        message: "internal error".to_string(),
    }
}

/// In-memory backend recording every call it receives
pub struct MockBackend {
    pub calls: Mutex<Vec<String>>,
    pub fields: Mutex<Vec<FieldDescriptor>>,
    pub sub_departments: Mutex<Vec<SubDepartment>>,
    pub suggestion: Mutex<SuggestionMode>,
    pub hardcopies: Mutex<Vec<HardcopyRecord>>,
    pub fail_hardcopies: AtomicBool,
    pub upload_response: Mutex<UploadResponse>,
    pub fail_upload: AtomicBool,
    pub uploads: Mutex<Vec<UploadSubmission>>,
    pub notifications: Mutex<Vec<NotificationItem>>,
    pub fail_notifications: AtomicBool,
    pub action_success: AtomicBool,
    pub actions: Mutex<Vec<(String, String, FileAction)>>,
    pub fail_preview: AtomicBool,
    pub sends: Mutex<Vec<(String, Vec<String>)>>,
    pub files: Mutex<Vec<FileEntry>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fields: Mutex::new(Vec::new()),
            sub_departments: Mutex::new(Vec::new()),
            suggestion: Mutex::new(SuggestionMode::Suggest("Cabinet 3, Shelf B".to_string())),
            hardcopies: Mutex::new(Vec::new()),
            fail_hardcopies: AtomicBool::new(false),
            upload_response: Mutex::new(UploadResponse {
                success: true,
                message: "Upload complete".to_string(),
                redirect: None,
            }),
            fail_upload: AtomicBool::new(false),
            uploads: Mutex::new(Vec::new()),
            notifications: Mutex::new(Vec::new()),
            fail_notifications: AtomicBool::new(false),
            action_success: AtomicBool::new(true),
            actions: Mutex::new(Vec::new()),
            fail_preview: AtomicBool::new(false),
            sends: Mutex::new(Vec::new()),
            files: Mutex::new(Vec::new()),
        }
    }
}

impl MockBackend {
    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn set_notifications(&self, items: Vec<NotificationItem>) {
        *self.notifications.lock().unwrap() = items;
    }
}

#[async_trait]
impl DashboardBackend for MockBackend {
    async fn fetch_document_type_fields(
        &self,
        _document_type: &str,
    ) -> DashboardResult<Vec<FieldDescriptor>> {
        self.record("fetch_document_type_fields");
        Ok(self.fields.lock().unwrap().clone())
    }

    async fn fetch_sub_departments(
        &self,
        _department_id: &str,
    ) -> DashboardResult<Vec<SubDepartment>> {
        self.record("fetch_sub_departments");
        Ok(self.sub_departments.lock().unwrap().clone())
    }

    async fn fetch_storage_suggestion(
        &self,
        _department_id: &str,
        _sub_department_id: Option<&str>,
    ) -> DashboardResult<StorageSuggestion> {
        self.record("fetch_storage_suggestion");
        match self.suggestion.lock().unwrap().clone() {
            SuggestionMode::Suggest(s) => Ok(StorageSuggestion::Suggested(s)),
            SuggestionMode::Unavailable(m) => Ok(StorageSuggestion::Unavailable(m)),
            SuggestionMode::Fail => Err(server_failure()),
        }
    }

    async fn fetch_linkable_hardcopies(&self) -> DashboardResult<Vec<HardcopyRecord>> {
        self.record("fetch_linkable_hardcopies");
        if self.fail_hardcopies.load(Ordering::SeqCst) {
            return Err(server_failure());
        }
        Ok(self.hardcopies.lock().unwrap().clone())
    }

    async fn submit_upload(&self, submission: &UploadSubmission) -> DashboardResult<UploadResponse> {
        self.record("submit_upload");
        self.uploads.lock().unwrap().push(submission.clone());
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(server_failure());
        }
        Ok(self.upload_response.lock().unwrap().clone())
    }

    async fn fetch_notifications(&self) -> DashboardResult<Vec<NotificationItem>> {
        self.record("fetch_notifications");
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(server_failure());
        }
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn submit_file_action(
        &self,
        notification_id: &str,
        file_id: &str,
        action: FileAction,
    ) -> DashboardResult<ActionResponse> {
        self.record("submit_file_action");
        self.actions.lock().unwrap().push((
            notification_id.to_string(),
            file_id.to_string(),
            action,
        ));
        let success = self.action_success.load(Ordering::SeqCst);
        Ok(ActionResponse {
            success,
            message: if success {
                String::new()
            } else {
                "Request already handled".to_string()
            },
        })
    }

    async fn fetch_file_preview(&self, file_id: &str) -> DashboardResult<FilePreview> {
        self.record("fetch_file_preview");
        if self.fail_preview.load(Ordering::SeqCst) {
            return Err(server_failure());
        }
        Ok(FilePreview(format!("<div>preview of {}</div>", file_id)))
    }

    async fn send_file(&self, file_id: &str, recipients: &[String]) -> DashboardResult<ActionResponse> {
        self.record("send_file");
        self.sends
            .lock()
            .unwrap()
            .push((file_id.to_string(), recipients.to_vec()));
        Ok(ActionResponse {
            success: true,
            message: "File sent".to_string(),
        })
    }

    async fn fetch_files(&self) -> DashboardResult<Vec<FileEntry>> {
        self.record("fetch_files");
        Ok(self.files.lock().unwrap().clone())
    }
}

/// View spy counting every projection the dashboard pushes
#[derive(Debug, Default)]
pub struct RecordingView {
    pub shown_popups: Vec<Popup>,
    pub hidden_popups: Vec<Popup>,
    pub toasts: Vec<(ToastKind, String)>,
    pub field_renders: Vec<Vec<FieldDescriptor>>,
    pub sub_department_renders: Vec<Vec<SubDepartment>>,
    pub suggestions: Vec<SuggestionDisplay>,
    pub hardcopy_renders: Vec<Vec<HardcopyRecord>>,
    pub notification_renders: Vec<Vec<NotificationItem>>,
    pub empty_renders: usize,
    pub processed_marks: Vec<String>,
    pub messages: Vec<String>,
    pub previews: Vec<String>,
    pub file_renders: Vec<Vec<FileEntry>>,
    pub navigations: Vec<String>,
}

impl RecordingView {
    /// Total number of times the notification list was replaced
    pub fn list_mutations(&self) -> usize {
        self.notification_renders.len() + self.empty_renders
    }

    pub fn errors(&self) -> Vec<&str> {
        self.toasts
            .iter()
            .filter(|(kind, _)| *kind == ToastKind::Error)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl DashboardView for RecordingView {
    fn show_popup(&mut self, popup: Popup) {
        self.shown_popups.push(popup);
    }

    fn hide_popup(&mut self, popup: Popup) {
        self.hidden_popups.push(popup);
    }

    fn toast(&mut self, kind: ToastKind, message: &str) {
        self.toasts.push((kind, message.to_string()));
    }

    fn render_document_fields(&mut self, fields: &[FieldDescriptor]) {
        self.field_renders.push(fields.to_vec());
    }

    fn render_sub_departments(&mut self, sub_departments: &[SubDepartment]) {
        self.sub_department_renders.push(sub_departments.to_vec());
    }

    fn render_storage_suggestion(&mut self, suggestion: &SuggestionDisplay) {
        self.suggestions.push(suggestion.clone());
    }

    fn render_hardcopy_options(&mut self, records: &[HardcopyRecord]) {
        self.hardcopy_renders.push(records.to_vec());
    }

    fn render_notifications(&mut self, items: &[NotificationItem]) {
        self.notification_renders.push(items.to_vec());
    }

    fn render_notifications_empty(&mut self) {
        self.empty_renders += 1;
    }

    fn mark_notification_processed(&mut self, notification_id: &str) {
        self.processed_marks.push(notification_id.to_string());
    }

    fn show_notification_message(&mut self, item: &NotificationItem) {
        self.messages.push(item.message.clone());
    }

    fn render_file_preview(&mut self, fragment: &str) {
        self.previews.push(fragment.to_string());
    }

    fn render_files(&mut self, files: &[FileEntry]) {
        self.file_renders.push(files.to_vec());
    }

    fn navigate(&mut self, location: &str) {
        self.navigations.push(location.to_string());
    }
}

pub fn setup_dashboard() -> (Arc<MockBackend>, Dashboard<RecordingView>) {
    setup_dashboard_with(DashboardConfig::development())
}

pub fn setup_dashboard_with(config: DashboardConfig) -> (Arc<MockBackend>, Dashboard<RecordingView>) {
    let backend = Arc::new(MockBackend::default());
    let dashboard = Dashboard::new(backend.clone(), RecordingView::default(), config);
    (backend, dashboard)
}

pub fn notification(id: &str, kind: NotificationKind, status: NotificationStatus) -> NotificationItem {
    NotificationItem {
        id: id.to_string(),
        kind,
        status,
        file_id: format!("file-{}", id),
        message: format!("Notification {}", id),
        timestamp: "2024-06-01 12:00:00".to_string(),
    }
}

pub fn pending(id: &str) -> NotificationItem {
    notification(id, NotificationKind::Received, NotificationStatus::Pending)
}
