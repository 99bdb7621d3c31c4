use crate::models::{
    FieldDescriptor, HardcopyMarker, SelectedFile, StorageMetadata, UploadSubmission,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HardcopyOption {
    #[default]
    None,
    New,
    Link,
}

impl std::str::FromStr for HardcopyOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(HardcopyOption::None),
            "new" => Ok(HardcopyOption::New),
            "link" => Ok(HardcopyOption::Link),
            other => Err(format!(
                "unknown hardcopy option '{}', expected none, new or link",
                other
            )),
        }
    }
}

/// State of one upload flow. Created by selecting a file, reset by a
/// successful upload or a cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSession {
    pub selected_file: Option<SelectedFile>,
    pub document_type: String,
    pub field_descriptors: Vec<FieldDescriptor>,
    pub fields: BTreeMap<String, String>,
    pub department_id: Option<String>,
    pub sub_department_id: Option<String>,
    pub hardcopy_available: bool,
    pub hardcopy_option: HardcopyOption,
    pub selected_hardcopy_id: Option<String>,
    pub storage_metadata: Option<StorageMetadata>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl UploadSession {
    pub fn set_document_type(&mut self, document_type: &str) {
        let document_type = document_type.trim();
        if self.document_type != document_type {
            self.document_type = document_type.to_string();
            self.field_descriptors.clear();
            self.fields.clear();
        }
    }

    /// Changing the department invalidates the sub-department and any suggestion
    pub fn set_department(&mut self, department_id: Option<String>) {
        let department_id = non_empty(department_id);
        if self.department_id != department_id {
            self.department_id = department_id;
            self.sub_department_id = None;
            self.storage_metadata = None;
        }
    }

    pub fn set_sub_department(&mut self, sub_department_id: Option<String>) {
        let sub_department_id = non_empty(sub_department_id);
        if self.sub_department_id != sub_department_id {
            self.sub_department_id = sub_department_id;
            self.storage_metadata = None;
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    pub fn set_hardcopy(&mut self, available: bool, option: HardcopyOption) {
        self.hardcopy_available = available;
        self.hardcopy_option = if available { option } else { HardcopyOption::None };
        if self.hardcopy_option != HardcopyOption::Link {
            self.selected_hardcopy_id = None;
        }
        if self.hardcopy_option != HardcopyOption::New {
            self.storage_metadata = None;
        }
    }

    pub fn select_hardcopy(&mut self, hardcopy_id: Option<String>) {
        self.selected_hardcopy_id = non_empty(hardcopy_id);
    }

    /// True while a "new hardcopy" choice needs a storage suggestion
    pub fn wants_storage_suggestion(&self) -> bool {
        self.hardcopy_available
            && self.hardcopy_option == HardcopyOption::New
            && self.department_id.is_some()
    }

    pub fn effective_hardcopy(&self) -> HardcopyOption {
        if self.hardcopy_available {
            self.hardcopy_option
        } else {
            HardcopyOption::None
        }
    }

    /// Labels of required dynamic fields that are still blank
    pub fn missing_required_fields(&self) -> Vec<String> {
        self.field_descriptors
            .iter()
            .filter(|f| f.required)
            .filter(|f| {
                self.fields
                    .get(&f.name)
                    .map(|v| v.trim().is_empty())
                    .unwrap_or(true)
            })
            .map(|f| f.label.clone())
            .collect()
    }

    /// Builds the upload payload; `None` when no file is selected
    pub fn submission(&self, hardcopy: HardcopyMarker) -> Option<UploadSubmission> {
        let file = self.selected_file.clone()?;
        Some(UploadSubmission {
            file,
            document_type: self.document_type.clone(),
            department_id: self.department_id.clone(),
            sub_department_id: self.sub_department_id.clone(),
            fields: self.fields.clone(),
            hardcopy,
        })
    }
}
