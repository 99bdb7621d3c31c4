use super::Dashboard;
use crate::error::{DashboardError, DashboardResult};
use crate::models::SelectedFile;
use crate::services::backend::StorageSuggestion;
use crate::utils::validation::{detect_mime, sanitize_filename, validate_file_size};
use crate::view::{DashboardView, Popup, SuggestionDisplay, ToastKind};
use crate::wizard::{
    HardcopyOption, UploadSession, WizardEffect, WizardEvent, WizardState, transition,
};
use bytes::Bytes;

const SUGGESTION_FAILED_MESSAGE: &str = "Could not load a storage suggestion.";

impl<V: DashboardView> Dashboard<V> {
    pub fn wizard_state(&self) -> WizardState {
        self.wizard_state
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    /// File picked via drag-drop or the browse dialog
    pub async fn select_file(&mut self, filename: &str, content: Bytes) -> DashboardResult<()> {
        let name = match sanitize_filename(filename) {
            Ok(name) => name,
            Err(e) => {
                self.report_validation(&e.message);
                return Err(e.into());
            }
        };
        if let Err(e) = validate_file_size(content.len(), self.config.max_upload_size) {
            self.report_validation(&e.message);
            return Err(e.into());
        }

        let mime_type = detect_mime(&name, &content);
        tracing::info!("📄 Selected {} ({}, {} bytes)", name, mime_type, content.len());
        self.dispatch(WizardEvent::FileSelected(SelectedFile {
            name,
            mime_type,
            content,
        }))
        .await
    }

    /// Loads the dynamic metadata fields of the chosen document type
    pub async fn select_document_type(&mut self, document_type: &str) -> DashboardResult<()> {
        self.session.set_document_type(document_type);
        if self.session.document_type.is_empty() {
            self.view.render_document_fields(&[]);
            return Ok(());
        }

        let document_type = self.session.document_type.clone();
        match self.backend.fetch_document_type_fields(&document_type).await {
            Ok(fields) => {
                self.view.render_document_fields(&fields);
                self.session.field_descriptors = fields;
                Ok(())
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) {
        self.session.set_field(name, value);
    }

    /// Department cascade: reload sub-departments, then the storage suggestion
    pub async fn select_department(&mut self, department_id: Option<String>) -> DashboardResult<()> {
        self.session.set_department(department_id);

        let result = match self.session.department_id.clone() {
            None => {
                self.view.render_sub_departments(&[]);
                Ok(())
            }
            Some(department_id) => match self.backend.fetch_sub_departments(&department_id).await {
                Ok(subs) => {
                    self.view.render_sub_departments(&subs);
                    Ok(())
                }
                Err(e) => {
                    self.report(&e);
                    Err(e)
                }
            },
        };

        self.refresh_storage_suggestion().await;
        result
    }

    pub async fn select_sub_department(&mut self, sub_department_id: Option<String>) {
        self.session.set_sub_department(sub_department_id);
        self.refresh_storage_suggestion().await;
    }

    pub async fn choose_hardcopy(&mut self, available: bool, option: HardcopyOption) {
        self.session.set_hardcopy(available, option);
        self.refresh_storage_suggestion().await;
    }

    pub fn select_hardcopy(&mut self, hardcopy_id: Option<String>) {
        self.session.select_hardcopy(hardcopy_id);
    }

    /// Fetches where a new physical record should be stored. Only runs while
    /// "new hardcopy" is chosen; failures stay inside the hardcopy step.
    pub async fn refresh_storage_suggestion(&mut self) {
        if !self.session.wants_storage_suggestion() {
            return;
        }
        let Some(department_id) = self.session.department_id.clone() else {
            return;
        };
        let sub_department_id = self.session.sub_department_id.clone();

        self.view.render_storage_suggestion(&SuggestionDisplay::Loading);
        let display = match self
            .backend
            .fetch_storage_suggestion(&department_id, sub_department_id.as_deref())
            .await
        {
            Ok(StorageSuggestion::Suggested(suggestion)) => {
                self.session.storage_metadata = Some(crate::models::StorageMetadata {
                    department_id,
                    sub_department_id,
                    suggestion: suggestion.clone(),
                });
                SuggestionDisplay::Suggested(suggestion)
            }
            Ok(StorageSuggestion::Unavailable(message)) => {
                self.session.storage_metadata = None;
                SuggestionDisplay::Unavailable(message)
            }
            Err(e) => {
                tracing::warn!("Storage suggestion failed: {}", e);
                self.session.storage_metadata = None;
                SuggestionDisplay::Unavailable(SUGGESTION_FAILED_MESSAGE.to_string())
            }
        };
        self.view.render_storage_suggestion(&display);
    }

    pub async fn submit_details(&mut self) -> DashboardResult<()> {
        self.dispatch(WizardEvent::SubmitDetails).await
    }

    pub async fn submit_hardcopy(&mut self) -> DashboardResult<()> {
        self.dispatch(WizardEvent::SubmitHardcopy).await
    }

    pub async fn confirm_link(&mut self) -> DashboardResult<()> {
        self.dispatch(WizardEvent::ConfirmLink).await
    }

    /// Closing any upload popup abandons the flow
    pub async fn cancel_upload(&mut self) {
        // Cancel never fails and carries no effect
        let _ = self.dispatch(WizardEvent::Cancel).await;
    }

    async fn dispatch(&mut self, event: WizardEvent) -> DashboardResult<()> {
        match self.step(event)? {
            None => Ok(()),
            Some(effect) => self.run_effect(effect).await,
        }
    }

    /// Applies one transition and syncs popups; returns the effect to run
    fn step(&mut self, event: WizardEvent) -> DashboardResult<Option<WizardEffect>> {
        let from = self.wizard_state;
        let session = std::mem::take(&mut self.session);
        let next = transition(from, session, event);

        self.wizard_state = next.state;
        self.session = next.session;
        if from != next.state {
            tracing::info!("🧭 Upload wizard: {:?} -> {:?}", from, next.state);
        }
        self.sync_upload_popups();

        if let Some(message) = next.error {
            self.report_validation(&message);
            return Err(DashboardError::Validation(message));
        }
        Ok(next.effect)
    }

    async fn run_effect(&mut self, effect: WizardEffect) -> DashboardResult<()> {
        match effect {
            WizardEffect::FetchLinkableHardcopies => {
                match self.backend.fetch_linkable_hardcopies().await {
                    Ok(records) => {
                        self.view.render_hardcopy_options(&records);
                        Ok(())
                    }
                    Err(e) => {
                        self.report(&e);
                        // Nothing to pick from; go back to the decision step
                        self.wizard_state = WizardState::HardcopyDecision;
                        self.sync_upload_popups();
                        Err(e)
                    }
                }
            }
            WizardEffect::SubmitUpload(submission) => {
                let outcome = match self.backend.submit_upload(&submission).await {
                    Ok(response) if response.success => Ok(response),
                    Ok(response) => Err(DashboardError::Rejected(response.message)),
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(response) => {
                        tracing::info!("✅ Upload of {} accepted", submission.file.name);
                        let message = if response.message.is_empty() {
                            "File uploaded successfully.".to_string()
                        } else {
                            response.message.clone()
                        };
                        self.view.toast(ToastKind::Success, &message);
                        if let Some(WizardEffect::Navigate(redirect)) =
                            self.step(WizardEvent::UploadSucceeded {
                                redirect: response.redirect,
                            })?
                        {
                            self.navigate_after_upload(redirect);
                        }
                        Ok(())
                    }
                    Err(e) => {
                        self.report(&e);
                        self.step(WizardEvent::UploadFailed)?;
                        Err(e)
                    }
                }
            }
            WizardEffect::Navigate(redirect) => {
                self.navigate_after_upload(redirect);
                Ok(())
            }
        }
    }

    fn navigate_after_upload(&mut self, redirect: Option<String>) {
        let location = redirect
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| self.config.default_redirect.clone());
        self.view.navigate(&location);
    }

    fn sync_upload_popups(&mut self) {
        const UPLOAD_POPUPS: [Popup; 3] = [Popup::UploadDetails, Popup::Hardcopy, Popup::HardcopyLink];

        let wanted = match self.wizard_state {
            WizardState::DetailsEntry => Some(Popup::UploadDetails),
            WizardState::HardcopyDecision => Some(Popup::Hardcopy),
            WizardState::HardcopyLinking => Some(Popup::HardcopyLink),
            // Keep whatever step submitted the upload visible until it resolves
            WizardState::Uploading => return,
            WizardState::Idle | WizardState::Done => None,
        };

        for popup in UPLOAD_POPUPS {
            if Some(popup) != wanted {
                self.popups.close(&mut self.view, popup);
            }
        }
        if let Some(popup) = wanted {
            self.popups.open(&mut self.view, popup);
        }
    }
}
