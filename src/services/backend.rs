use crate::error::DashboardResult;
use crate::models::{
    ActionResponse, FieldDescriptor, FileAction, FileEntry, FilePreview, HardcopyRecord,
    NotificationItem, SubDepartment, UploadResponse, UploadSubmission,
};
use async_trait::async_trait;

/// Storage suggestion outcome for a new hardcopy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSuggestion {
    Suggested(String),
    /// The server answered but could not suggest a location
    Unavailable(String),
}

/// Remote operations the dashboard depends on
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    /// Ordered metadata fields for a document type
    async fn fetch_document_type_fields(
        &self,
        document_type: &str,
    ) -> DashboardResult<Vec<FieldDescriptor>>;

    async fn fetch_sub_departments(&self, department_id: &str)
    -> DashboardResult<Vec<SubDepartment>>;

    async fn fetch_storage_suggestion(
        &self,
        department_id: &str,
        sub_department_id: Option<&str>,
    ) -> DashboardResult<StorageSuggestion>;

    /// Physical records an upload may be linked to
    async fn fetch_linkable_hardcopies(&self) -> DashboardResult<Vec<HardcopyRecord>>;

    async fn submit_upload(&self, submission: &UploadSubmission) -> DashboardResult<UploadResponse>;

    async fn fetch_notifications(&self) -> DashboardResult<Vec<NotificationItem>>;

    async fn submit_file_action(
        &self,
        notification_id: &str,
        file_id: &str,
        action: FileAction,
    ) -> DashboardResult<ActionResponse>;

    async fn fetch_file_preview(&self, file_id: &str) -> DashboardResult<FilePreview>;

    async fn send_file(&self, file_id: &str, recipients: &[String])
    -> DashboardResult<ActionResponse>;

    async fn fetch_files(&self) -> DashboardResult<Vec<FileEntry>>;
}
