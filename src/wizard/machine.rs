use super::session::{HardcopyOption, UploadSession};
use crate::models::{HardcopyMarker, SelectedFile, UploadSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardState {
    #[default]
    Idle,
    DetailsEntry,
    HardcopyDecision,
    HardcopyLinking,
    Uploading,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    FileSelected(SelectedFile),
    /// "Next" on the details step
    SubmitDetails,
    /// "Next" on the hardcopy step, using the session's hardcopy choice
    SubmitHardcopy,
    ConfirmLink,
    UploadSucceeded { redirect: Option<String> },
    UploadFailed,
    Cancel,
}

/// Work the caller must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    FetchLinkableHardcopies,
    SubmitUpload(Box<UploadSubmission>),
    Navigate(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: WizardState,
    pub session: UploadSession,
    pub effect: Option<WizardEffect>,
    /// Validation message to show; the state is unchanged when set
    pub error: Option<String>,
}

impl Transition {
    fn to(state: WizardState, session: UploadSession) -> Self {
        Self {
            state,
            session,
            effect: None,
            error: None,
        }
    }

    fn with_effect(mut self, effect: WizardEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    fn rejected(state: WizardState, session: UploadSession, message: impl Into<String>) -> Self {
        Self {
            state,
            session,
            effect: None,
            error: Some(message.into()),
        }
    }
}

fn start_upload(session: UploadSession, marker: HardcopyMarker) -> Transition {
    match session.submission(marker) {
        Some(submission) => Transition::to(WizardState::Uploading, session)
            .with_effect(WizardEffect::SubmitUpload(Box::new(submission))),
        None => Transition::rejected(WizardState::Idle, UploadSession::default(), "No file selected."),
    }
}

/// Step the upload flow was submitted from, recovered from the session
fn resume_point(session: &UploadSession) -> WizardState {
    if session.department_id.is_none() {
        WizardState::DetailsEntry
    } else if session.effective_hardcopy() == HardcopyOption::Link {
        WizardState::HardcopyLinking
    } else {
        WizardState::HardcopyDecision
    }
}

/// Advances the upload flow. The session is moved in and handed back so
/// the caller stays the only owner of flow state.
pub fn transition(state: WizardState, session: UploadSession, event: WizardEvent) -> Transition {
    use WizardState::*;

    match (state, event) {
        (_, WizardEvent::Cancel) => Transition::to(Idle, UploadSession::default()),

        (Idle | Done, WizardEvent::FileSelected(file)) => {
            if file.content.is_empty() {
                return Transition::rejected(state, session, "The selected file is empty.");
            }
            let session = UploadSession {
                selected_file: Some(file),
                ..UploadSession::default()
            };
            Transition::to(DetailsEntry, session)
        }

        // Dropping another file while filling in details replaces it
        (DetailsEntry, WizardEvent::FileSelected(file)) => {
            if file.content.is_empty() {
                return Transition::rejected(state, session, "The selected file is empty.");
            }
            let mut session = session;
            session.selected_file = Some(file);
            Transition::to(DetailsEntry, session)
        }

        (DetailsEntry, WizardEvent::SubmitDetails) => {
            if session.document_type.is_empty() {
                return Transition::rejected(state, session, "Please select a document type.");
            }
            let missing = session.missing_required_fields();
            if !missing.is_empty() {
                let message = format!("Please fill in: {}", missing.join(", "));
                return Transition::rejected(state, session, message);
            }
            if session.department_id.is_none() {
                // Without a department there is no location to track a hardcopy in
                return start_upload(session, HardcopyMarker::None);
            }
            Transition::to(HardcopyDecision, session)
        }

        // The department was cleared after the details step; nothing to track a hardcopy in
        (HardcopyDecision, WizardEvent::SubmitHardcopy) if session.department_id.is_none() => {
            start_upload(session, HardcopyMarker::None)
        }

        (HardcopyDecision, WizardEvent::SubmitHardcopy) => match session.effective_hardcopy() {
            HardcopyOption::Link => Transition::to(HardcopyLinking, session)
                .with_effect(WizardEffect::FetchLinkableHardcopies),
            HardcopyOption::New => {
                let storage_metadata = session.storage_metadata.clone();
                start_upload(session, HardcopyMarker::New { storage_metadata })
            }
            HardcopyOption::None => start_upload(session, HardcopyMarker::None),
        },

        (HardcopyLinking, WizardEvent::ConfirmLink) => match session.selected_hardcopy_id.clone() {
            Some(hardcopy_id) => start_upload(session, HardcopyMarker::Link { hardcopy_id }),
            None => Transition::rejected(state, session, "Please select a hardcopy to link."),
        },

        (Uploading, WizardEvent::UploadSucceeded { redirect }) => {
            Transition::to(Done, UploadSession::default())
                .with_effect(WizardEffect::Navigate(redirect))
        }

        (Uploading, WizardEvent::UploadFailed) => {
            let resume = resume_point(&session);
            Transition::to(resume, session)
        }

        (state, event) => {
            tracing::debug!("Ignoring {:?} in state {:?}", event, state);
            Transition::to(state, session)
        }
    }
}
