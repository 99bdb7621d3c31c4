use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::models::{
    ActionResponse, FieldDescriptor, FileAction, FileActionRequest, FileEntry, FilePreview,
    HardcopyMarker, HardcopyRecord, NotificationItem, SendFileRequest, StorageSuggestionResponse,
    SubDepartment, UploadResponse, UploadSubmission,
};
use crate::services::backend::{DashboardBackend, StorageSuggestion};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// reqwest-backed client for the PHP document API
pub struct HttpBackend {
    client: Client,
    config: DashboardConfig,
}

impl HttpBackend {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        self.config.url_for(path)
    }

    async fn send_text(&self, request: RequestBuilder) -> DashboardResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Request failed with status {}", status);
            return Err(DashboardError::Server {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> DashboardResult<T> {
        let body = self.send_text(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Lists come back either bare or wrapped as `{"<key>": [...]}`; a
    /// `{"success": false}` body is surfaced as a rejection.
    async fn send_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        key: &str,
    ) -> DashboardResult<Vec<T>> {
        let body = self.send_text(request).await?;
        decode_list(&body, key)
    }
}

pub(crate) fn decode_list<T: DeserializeOwned>(body: &str, key: &str) -> DashboardResult<Vec<T>> {
    let value: Value = serde_json::from_str(body)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(mut map) => {
            if let Some(inner) = map.remove(key) {
                return Ok(serde_json::from_value(inner)?);
            }
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = map
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                return Err(DashboardError::Rejected(message));
            }
            Err(DashboardError::Anyhow(anyhow::anyhow!(
                "response is missing the '{}' list",
                key
            )))
        }
        Value::Null => Ok(Vec::new()),
        other => Err(DashboardError::Anyhow(anyhow::anyhow!(
            "unexpected list payload: {}",
            other
        ))),
    }
}

fn upload_form(submission: &UploadSubmission) -> DashboardResult<Form> {
    let content = submission.file.content.clone();
    let length = content.len() as u64;
    let file_part = Part::stream_with_length(content, length)
        .file_name(submission.file.name.clone())
        .mime_str(&submission.file.mime_type)?;

    let mut form = Form::new()
        .part("file", file_part)
        .text("document_type", submission.document_type.clone());

    if let Some(department_id) = &submission.department_id {
        form = form.text("department_id", department_id.clone());
    }
    if let Some(sub_department_id) = &submission.sub_department_id {
        form = form.text("sub_department_id", sub_department_id.clone());
    }
    for (name, value) in &submission.fields {
        form = form.text(name.clone(), value.clone());
    }

    form = match &submission.hardcopy {
        HardcopyMarker::None => form.text("hardcopy_available", "0"),
        HardcopyMarker::New { storage_metadata } => {
            let form = form
                .text("hardcopy_available", "1")
                .text("hardcopy_option", "new");
            match storage_metadata {
                Some(metadata) => form.text("storage_metadata", serde_json::to_string(metadata)?),
                None => form,
            }
        }
        HardcopyMarker::Link { hardcopy_id } => form
            .text("hardcopy_available", "1")
            .text("hardcopy_option", "link")
            .text("link_hardcopy_id", hardcopy_id.clone()),
    };

    Ok(form)
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn fetch_document_type_fields(
        &self,
        document_type: &str,
    ) -> DashboardResult<Vec<FieldDescriptor>> {
        tracing::debug!("Fetching fields for document type {}", document_type);
        let request = self
            .client
            .get(self.url(&self.config.endpoints.document_type_fields))
            .query(&[("document_type", document_type)]);
        self.send_list(request, "fields").await
    }

    async fn fetch_sub_departments(
        &self,
        department_id: &str,
    ) -> DashboardResult<Vec<SubDepartment>> {
        tracing::debug!("Fetching sub-departments of {}", department_id);
        let request = self
            .client
            .get(self.url(&self.config.endpoints.sub_departments))
            .query(&[("department_id", department_id)]);
        self.send_list(request, "sub_departments").await
    }

    async fn fetch_storage_suggestion(
        &self,
        department_id: &str,
        sub_department_id: Option<&str>,
    ) -> DashboardResult<StorageSuggestion> {
        let mut query = vec![("department_id", department_id)];
        if let Some(sub) = sub_department_id {
            query.push(("sub_department_id", sub));
        }
        let request = self
            .client
            .get(self.url(&self.config.endpoints.storage_suggestion))
            .query(&query);
        let response: StorageSuggestionResponse = self.send_json(request).await?;

        Ok(match (response.success, response.suggestion) {
            (true, Some(suggestion)) if !suggestion.is_empty() => {
                StorageSuggestion::Suggested(suggestion)
            }
            _ => StorageSuggestion::Unavailable(
                response
                    .message
                    .unwrap_or_else(|| "No storage suggestion available.".to_string()),
            ),
        })
    }

    async fn fetch_linkable_hardcopies(&self) -> DashboardResult<Vec<HardcopyRecord>> {
        let request = self
            .client
            .get(self.url(&self.config.endpoints.hardcopy_files));
        self.send_list(request, "hardcopies").await
    }

    async fn submit_upload(&self, submission: &UploadSubmission) -> DashboardResult<UploadResponse> {
        tracing::info!(
            "Uploading {} ({} bytes) as {}",
            submission.file.name,
            submission.file.size(),
            submission.document_type
        );
        let request = self
            .client
            .post(self.url(&self.config.endpoints.upload))
            .multipart(upload_form(submission)?);
        self.send_json(request).await
    }

    async fn fetch_notifications(&self) -> DashboardResult<Vec<NotificationItem>> {
        let request = self
            .client
            .get(self.url(&self.config.endpoints.notifications));
        self.send_list(request, "notifications").await
    }

    async fn submit_file_action(
        &self,
        notification_id: &str,
        file_id: &str,
        action: FileAction,
    ) -> DashboardResult<ActionResponse> {
        tracing::info!(
            "Submitting {} for notification {} (file {})",
            action.as_str(),
            notification_id,
            file_id
        );
        let request = self
            .client
            .post(self.url(&self.config.endpoints.file_action))
            .json(&FileActionRequest {
                notification_id: notification_id.to_string(),
                file_id: file_id.to_string(),
                action,
            });
        self.send_json(request).await
    }

    async fn fetch_file_preview(&self, file_id: &str) -> DashboardResult<FilePreview> {
        let request = self
            .client
            .get(self.url(&self.config.endpoints.file_preview))
            .query(&[("file_id", file_id)]);
        Ok(FilePreview(self.send_text(request).await?))
    }

    async fn send_file(
        &self,
        file_id: &str,
        recipients: &[String],
    ) -> DashboardResult<ActionResponse> {
        let request = self
            .client
            .post(self.url(&self.config.endpoints.send_file))
            .json(&SendFileRequest {
                file_id: file_id.to_string(),
                recipients: recipients.to_vec(),
            });
        self.send_json(request).await
    }

    async fn fetch_files(&self) -> DashboardResult<Vec<FileEntry>> {
        let request = self.client.get(self.url(&self.config.endpoints.user_files));
        self.send_list(request, "files").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NotificationStatus;

    #[test]
    fn test_decode_bare_and_wrapped_lists() {
        let bare = r#"[{"id":1,"name":"Archive"}]"#;
        let wrapped = r#"{"success":true,"sub_departments":[{"id":"1","name":"Archive"}]}"#;
        let a: Vec<SubDepartment> = decode_list(bare, "sub_departments").unwrap();
        let b: Vec<SubDepartment> = decode_list(wrapped, "sub_departments").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_rejection() {
        let body = r#"{"success":false,"message":"Session expired"}"#;
        let err = decode_list::<NotificationItem>(body, "notifications").unwrap_err();
        assert!(matches!(err, DashboardError::Rejected(ref m) if m == "Session expired"));
    }

    #[test]
    fn test_decode_notifications() {
        let body = r#"{"notifications":[
            {"id":3,"type":"received","status":"processed","file_id":9,"message":"m","timestamp":"t"}
        ]}"#;
        let items: Vec<NotificationItem> = decode_list(body, "notifications").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].status, NotificationStatus::Processed);
    }
}
