use std::env;
use std::time::Duration;

/// Remote endpoint paths, relative to the API base URL
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub document_type_fields: String,
    pub sub_departments: String,
    pub storage_suggestion: String,
    pub hardcopy_files: String,
    pub upload: String,
    pub notifications: String,
    pub file_action: String,
    pub file_preview: String,
    pub send_file: String,
    pub user_files: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            document_type_fields: "get_document_type_fields.php".to_string(),
            sub_departments: "get_sub_departments.php".to_string(),
            storage_suggestion: "get_storage_suggestion.php".to_string(),
            hardcopy_files: "fetch_hardcopy_files.php".to_string(),
            upload: "upload_handler.php".to_string(),
            notifications: "fetch_notifications.php".to_string(),
            file_action: "handle_file_action.php".to_string(),
            file_preview: "get_file_preview.php".to_string(),
            send_file: "send_file_handler.php".to_string(),
            user_files: "fetch_user_files.php".to_string(),
        }
    }
}

/// Dashboard client configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Root URL of the document API (default: "http://localhost/")
    pub base_url: String,

    /// Notification poll period (default: 5 s)
    pub poll_interval: Duration,

    /// Per-request timeout (default: 30 s)
    pub request_timeout: Duration,

    /// Largest file accepted by the upload wizard (default: 256 MB)
    pub max_upload_size: usize,

    /// Where to go after an upload when the server sends no redirect
    pub default_redirect: String,

    /// Consecutive empty fetches required before a rendered list is cleared.
    /// 1 clears on the first empty fetch.
    pub empty_polls_before_clear: u32,

    pub endpoints: Endpoints,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/".to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            default_redirect: "dashboard.php".to_string(),
            empty_polls_before_clear: 1,
            endpoints: Endpoints::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            base_url: env::var("DASHBOARD_BASE_URL")
                .map(|v| normalize_base_url(&v))
                .unwrap_or(default.base_url),

            poll_interval: env::var("NOTIFICATION_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(default.poll_interval),

            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default.request_timeout),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            default_redirect: env::var("DEFAULT_REDIRECT").unwrap_or(default.default_redirect),

            empty_polls_before_clear: env::var("EMPTY_POLLS_BEFORE_CLEAR")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|n: u32| n.max(1))
                .unwrap_or(default.empty_polls_before_clear),

            endpoints: default.endpoints,
        }
    }

    /// Local development profile: fast polling, short timeouts
    pub fn development() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/".to_string(),
            poll_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
            ..Self::default()
        }
    }

    /// Absolute URL for an endpoint path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
