//! Sorting and filtering of the user's file list.

use crate::models::FileEntry;
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending, case-insensitive
    #[default]
    Name,
    /// Newest first
    Date,
    /// Document type ascending
    Type,
    /// Largest first
    Size,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" => Ok(SortKey::Date),
            "type" => Ok(SortKey::Type),
            "size" => Ok(SortKey::Size),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

/// Combined list filter; every set criterion must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilter {
    pub search: String,
    /// Exact document type, empty for any
    pub document_type: String,
    pub hardcopy_only: bool,
}

impl FileFilter {
    pub fn matches(&self, entry: &FileEntry) -> bool {
        let search = self.search.trim().to_lowercase();
        let name_ok = search.is_empty() || entry.name.to_lowercase().contains(&search);
        let type_ok = self.document_type.is_empty()
            || entry.document_type.eq_ignore_ascii_case(&self.document_type);
        let hardcopy_ok = !self.hardcopy_only || entry.has_hardcopy;
        name_ok && type_ok && hardcopy_ok
    }
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Newest first; unparseable dates sink to the end
fn compare_dates(a: &FileEntry, b: &FileEntry) -> Ordering {
    match (parse_date(&a.uploaded_at), parse_date(&b.uploaded_at)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.uploaded_at.cmp(&a.uploaded_at),
    }
}

pub fn sort_files(files: &mut [FileEntry], key: SortKey) {
    match key {
        SortKey::Name => files.sort_by_key(|f| f.name.to_lowercase()),
        SortKey::Date => files.sort_by(compare_dates),
        SortKey::Type => files.sort_by(|a, b| {
            a.document_type
                .to_lowercase()
                .cmp(&b.document_type.to_lowercase())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }),
        SortKey::Size => files.sort_by(|a, b| b.size.cmp(&a.size)),
    }
}

pub fn filter_files(files: &[FileEntry], filter: &FileFilter) -> Vec<FileEntry> {
    files.iter().filter(|f| filter.matches(f)).cloned().collect()
}

/// Filter then sort, the order the list view applies them in
pub fn arrange(files: &[FileEntry], filter: &FileFilter, key: SortKey) -> Vec<FileEntry> {
    let mut visible = filter_files(files, filter);
    sort_files(&mut visible, key);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, document_type: &str, date: &str, hardcopy: bool) -> FileEntry {
        FileEntry {
            id: name.to_string(),
            name: name.to_string(),
            document_type: document_type.to_string(),
            uploaded_at: date.to_string(),
            size: name.len() as u64,
            has_hardcopy: hardcopy,
        }
    }

    fn names(files: &[FileEntry]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let mut files = vec![entry("b", "", "", false), entry("a", "", "", false)];
        sort_files(&mut files, SortKey::Name);
        assert_eq!(names(&files), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let mut files = vec![
            entry("jan", "", "2024-01-01", false),
            entry("feb", "", "2024-02-01", false),
            entry("broken", "", "not a date", false),
        ];
        sort_files(&mut files, SortKey::Date);
        assert_eq!(names(&files), vec!["feb", "jan", "broken"]);
    }

    #[test]
    fn test_sort_by_date_with_times() {
        let mut files = vec![
            entry("morning", "", "2024-05-01 08:00:00", false),
            entry("evening", "", "2024-05-01 20:00:00", false),
        ];
        sort_files(&mut files, SortKey::Date);
        assert_eq!(names(&files), vec!["evening", "morning"]);
    }

    #[test]
    fn test_filter_is_logical_and() {
        let files = vec![
            entry("Annual report.pdf", "invoice", "2024-01-01", true),
            entry("Annual report copy.pdf", "invoice", "2024-01-01", false),
            entry("Report draft.docx", "memo", "2024-01-01", true),
            entry("Receipt.pdf", "invoice", "2024-01-01", true),
        ];
        let filter = FileFilter {
            search: "report".to_string(),
            document_type: "invoice".to_string(),
            hardcopy_only: true,
        };
        assert_eq!(names(&filter_files(&files, &filter)), vec!["Annual report.pdf"]);
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let files = vec![entry("a", "x", "", false), entry("b", "y", "", true)];
        assert_eq!(filter_files(&files, &FileFilter::default()).len(), 2);
    }

    #[test]
    fn test_arrange() {
        let files = vec![
            entry("c.pdf", "invoice", "", false),
            entry("a.pdf", "invoice", "", false),
            entry("b.pdf", "memo", "", false),
        ];
        let filter = FileFilter {
            document_type: "invoice".to_string(),
            ..FileFilter::default()
        };
        assert_eq!(
            names(&arrange(&files, &filter, SortKey::Name)),
            vec!["a.pdf", "c.pdf"]
        );
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert!("color".parse::<SortKey>().is_err());
    }
}
