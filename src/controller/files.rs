use super::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::files::{FileFilter, SortKey, arrange};
use crate::models::FileEntry;
use crate::view::{DashboardView, Popup, ToastKind};

/// Loaded file rows plus the active sort and filter
#[derive(Debug, Clone, Default)]
pub struct FileListState {
    pub files: Vec<FileEntry>,
    pub filter: FileFilter,
    pub sort: SortKey,
}

impl FileListState {
    pub fn visible(&self) -> Vec<FileEntry> {
        arrange(&self.files, &self.filter, self.sort)
    }
}

impl<V: DashboardView> Dashboard<V> {
    pub fn file_list(&self) -> &FileListState {
        &self.file_list
    }

    pub async fn load_files(&mut self) -> DashboardResult<()> {
        match self.backend.fetch_files().await {
            Ok(files) => {
                tracing::debug!("Loaded {} files", files.len());
                self.file_list.files = files;
                self.render_file_list();
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub fn sort_files_by(&mut self, key: SortKey) {
        self.file_list.sort = key;
        self.render_file_list();
    }

    pub fn filter_files(&mut self, filter: FileFilter) {
        self.file_list.filter = filter;
        self.render_file_list();
    }

    fn render_file_list(&mut self) {
        let visible = self.file_list.visible();
        self.view.render_files(&visible);
    }

    pub async fn preview_file(&mut self, file_id: &str) -> DashboardResult<()> {
        match self.backend.fetch_file_preview(file_id).await {
            Ok(preview) => {
                self.view.render_file_preview(&preview.0);
                self.popups.open(&mut self.view, Popup::FilePreview);
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub fn close_preview(&mut self) {
        self.popups.close(&mut self.view, Popup::FilePreview);
    }

    pub fn open_send_dialog(&mut self) {
        self.popups.open(&mut self.view, Popup::SendFile);
    }

    /// Sends a stored file to one or more recipients
    pub async fn send_file(&mut self, file_id: &str, recipients: &[String]) -> DashboardResult<()> {
        let recipients: Vec<String> = recipients
            .iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();
        if recipients.is_empty() {
            let err = DashboardError::validation("Please select at least one recipient.");
            self.report(&err);
            return Err(err);
        }

        match self.backend.send_file(file_id, &recipients).await {
            Ok(response) if response.success => {
                tracing::info!("📤 Sent file {} to {} recipient(s)", file_id, recipients.len());
                let message = if response.message.is_empty() {
                    "File sent successfully.".to_string()
                } else {
                    response.message
                };
                self.view.toast(ToastKind::Success, &message);
                self.popups.close(&mut self.view, Popup::SendFile);
                Ok(())
            }
            Ok(response) => {
                let err = DashboardError::Rejected(response.message);
                self.report(&err);
                Err(err)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }
}
