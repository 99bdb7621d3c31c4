use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// PHP endpoints emit ids as either JSON numbers or strings.
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Accepts `true`, `1`, `"1"` and `"true"` as true.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0) != 0,
        serde_json::Value::String(s) => matches!(s.as_str(), "1" | "true" | "yes"),
        _ => false,
    })
}

/// Sizes and counts arrive as numbers or numeric strings; anything else is 0.
fn loose_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// One dynamic metadata field of a document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default = "default_field_type")]
    pub field_type: String,
    #[serde(default, deserialize_with = "loose_bool")]
    pub required: bool,
}

fn default_field_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubDepartment {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSuggestionResponse {
    #[serde(default, deserialize_with = "loose_bool")]
    pub success: bool,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// An existing physical record that an upload can be linked to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardcopyRecord {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "file_name", alias = "fileName")]
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(deserialize_with = "loose_bool")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Received,
    AccessRequest,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Processed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub status: NotificationStatus,
    #[serde(rename = "file_id", alias = "fileId", deserialize_with = "id_string")]
    pub file_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl NotificationItem {
    pub fn is_pending(&self) -> bool {
        self.status == NotificationStatus::Pending
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    Accept,
    Deny,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileAction::Accept => "accept",
            FileAction::Deny => "deny",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            FileAction::Accept => "accepted",
            FileAction::Deny => "denied",
        }
    }
}

impl std::str::FromStr for FileAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" => Ok(FileAction::Accept),
            "deny" => Ok(FileAction::Deny),
            other => Err(format!("unknown action '{}', expected accept or deny", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileActionRequest {
    pub notification_id: String,
    pub file_id: String,
    pub action: FileAction,
}

/// `{success, message}` acknowledgement shared by the action and send endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(deserialize_with = "loose_bool")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendFileRequest {
    pub file_id: String,
    pub recipients: Vec<String>,
}

/// Renderable preview fragment of a stored file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview(pub String);

/// One row of the user's file list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(rename = "document_type", alias = "type", default)]
    pub document_type: String,
    #[serde(rename = "upload_date", alias = "date", default)]
    pub uploaded_at: String,
    #[serde(default, deserialize_with = "loose_u64")]
    pub size: u64,
    #[serde(default, deserialize_with = "loose_bool")]
    pub has_hardcopy: bool,
}

/// A file chosen by the user, held in memory until submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Storage location suggested for a new physical record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageMetadata {
    pub department_id: String,
    pub sub_department_id: Option<String>,
    pub suggestion: String,
}

/// Hardcopy marker sent alongside an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardcopyMarker {
    None,
    New { storage_metadata: Option<StorageMetadata> },
    Link { hardcopy_id: String },
}

/// Everything posted to the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSubmission {
    pub file: SelectedFile,
    pub document_type: String,
    pub department_id: Option<String>,
    pub sub_department_id: Option<String>,
    pub fields: BTreeMap<String, String>,
    pub hardcopy: HardcopyMarker,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_accepts_numeric_ids() {
        let json = r#"{"id": 7, "type": "access_request", "status": "pending",
                       "file_id": 42, "message": "Bob wants access", "timestamp": "2024-03-01 10:00:00"}"#;
        let item: NotificationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.file_id, "42");
        assert_eq!(item.kind, NotificationKind::AccessRequest);
        assert!(item.is_pending());
    }

    #[test]
    fn test_unknown_status_is_not_pending() {
        let json = r#"{"id": "1", "type": "shared", "status": "accepted", "file_id": "3"}"#;
        let item: NotificationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, NotificationKind::Other);
        assert_eq!(item.status, NotificationStatus::Other);
        assert!(!item.is_pending());
    }

    #[test]
    fn test_field_descriptor_loose_required() {
        let json = r#"[{"name":"invoice_no","label":"Invoice No","type":"text","required":"1"},
                       {"name":"notes","label":"Notes","required":0}]"#;
        let fields: Vec<FieldDescriptor> = serde_json::from_str(json).unwrap();
        assert!(fields[0].required);
        assert!(!fields[1].required);
        assert_eq!(fields[1].field_type, "text");
    }

    #[test]
    fn test_file_entry_accepts_string_numbers() {
        let json = r#"[{"id":"1","name":"a.pdf","document_type":"invoice","upload_date":"2024-01-01",
                        "size":"1234","has_hardcopy":"1"},
                       {"id":2,"name":"b.pdf","size":88},
                       {"id":3,"name":"c.pdf","size":"n/a"},
                       {"id":4,"name":"d.pdf","size":null}]"#;
        let files: Vec<FileEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(files[0].size, 1234);
        assert!(files[0].has_hardcopy);
        assert_eq!(files[1].size, 88);
        assert_eq!(files[2].size, 0);
        assert_eq!(files[3].size, 0);
    }

    #[test]
    fn test_file_action_parse() {
        assert_eq!("Accept".parse::<FileAction>().unwrap(), FileAction::Accept);
        assert_eq!("deny".parse::<FileAction>().unwrap(), FileAction::Deny);
        assert!("maybe".parse::<FileAction>().is_err());
        assert_eq!(
            serde_json::to_string(&FileAction::Deny).unwrap(),
            "\"deny\""
        );
    }
}
