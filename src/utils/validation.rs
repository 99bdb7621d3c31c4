use std::path::Path;

/// Extensions the dashboard refuses to upload
const BLOCKED_EXTENSIONS: &[&str] = &[
    // Executables
    "exe", "dll", "so", "dylib", "bin", "com", "bat", "cmd", "ps1", "sh", "bash", "msi",
    // Scripts/Code
    "js", "py", "rb", "php", "pl", "cgi", "asp", "aspx", "jsp", "vbs", "jar",
    // Web
    "html", "htm", "xhtml", "shtml",
    // Macro-enabled documents
    "docm", "xlsm", "pptm", "dotm", "xltm", "potm",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::error::DashboardError {
    fn from(err: ValidationError) -> Self {
        crate::error::DashboardError::Validation(err.message)
    }
}

/// Rejects empty files and files above the configured limit
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError {
            code: "EMPTY_FILE",
            message: "The selected file is empty.".to_string(),
        });
    }
    if size > max_size {
        return Err(ValidationError {
            code: "FILE_TOO_LARGE",
            message: format!(
                "File size {} bytes exceeds maximum allowed {} bytes ({} MB)",
                size,
                max_size,
                max_size / 1024 / 1024
            ),
        });
    }
    Ok(())
}

/// Strips any path component, replaces reserved characters and rejects
/// hidden files and blocked extensions.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    // Browsers on Windows may hand over backslash paths
    let last = filename.rsplit(['/', '\\']).next().unwrap_or("");
    let name = Path::new(last)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() {
        return Err(ValidationError {
            code: "INVALID_FILENAME",
            message: "Filename cannot be empty".to_string(),
        });
    }

    let sanitized: String = name
        .chars()
        .map(|c| match c {
            c if c.is_control() => '_',
            ':' | '*' | '?' | '"' | '<' | '>' | '|' | ';' => '_',
            c => c,
        })
        .collect();

    let sanitized = if sanitized.len() > 255 {
        let mut end = 255;
        while !sanitized.is_char_boundary(end) {
            end -= 1;
        }
        sanitized[..end].to_string()
    } else {
        sanitized
    };

    if sanitized.starts_with('.') {
        return Err(ValidationError {
            code: "HIDDEN_FILE",
            message: "Hidden files (starting with '.') are not allowed".to_string(),
        });
    }

    if let Some(ext) = Path::new(&sanitized).extension().and_then(|e| e.to_str()) {
        let ext_lower = ext.to_lowercase();
        if BLOCKED_EXTENSIONS.contains(&ext_lower.as_str()) {
            return Err(ValidationError {
                code: "BLOCKED_EXTENSION",
                message: format!("File extension '.{}' is not allowed", ext_lower),
            });
        }
    }

    Ok(sanitized)
}

/// Sniffs the MIME type from content, falling back to the extension
pub fn detect_mime(filename: &str, bytes: &[u8]) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let extension = filename.split('.').next_back().unwrap_or("").to_lowercase();
    match extension.as_str() {
        "pdf" => mime::APPLICATION_PDF.to_string(),
        "txt" => mime::TEXT_PLAIN.to_string(),
        "csv" => mime::TEXT_CSV.to_string(),
        "jpg" | "jpeg" => mime::IMAGE_JPEG.to_string(),
        "png" => mime::IMAGE_PNG.to_string(),
        "doc" => "application/msword".to_string(),
        "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string()
        }
        "xls" => "application/vnd.ms-excel".to_string(),
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
        _ => mime::APPLICATION_OCTET_STREAM.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size(10, 100).is_ok());
        assert_eq!(validate_file_size(0, 100).unwrap_err().code, "EMPTY_FILE");
        assert_eq!(
            validate_file_size(101, 100).unwrap_err().code,
            "FILE_TOO_LARGE"
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("report.pdf").unwrap(), "report.pdf");
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\scan:01.pdf").unwrap(),
            "scan_01.pdf"
        );
        assert_eq!(sanitize_filename("../../etc/invoice.txt").unwrap(), "invoice.txt");
        assert_eq!(sanitize_filename("会議.docx").unwrap(), "会議.docx");

        assert_eq!(
            sanitize_filename("setup.EXE").unwrap_err().code,
            "BLOCKED_EXTENSION"
        );
        assert_eq!(sanitize_filename(".env").unwrap_err().code, "HIDDEN_FILE");
        assert_eq!(sanitize_filename("").unwrap_err().code, "INVALID_FILENAME");
    }

    #[test]
    fn test_detect_mime() {
        assert_eq!(detect_mime("a.bin", b"%PDF-1.7 rest"), "application/pdf");
        assert_eq!(detect_mime("notes.txt", b"hello"), "text/plain");
        assert_eq!(detect_mime("blob", b"hello"), "application/octet-stream");
    }
}
