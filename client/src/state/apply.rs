//! Apply-to-job workflow: panel visibility, draft fields, and submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApplyJobDrawer` keeps one `ApplyWorkflow` in a signal and routes every
//! click, keystroke, and network result through it. Nothing in here knows
//! about Leptos or the DOM, so the whole flow is testable as plain data.
//!
//! STATE MACHINE
//! =============
//! `Closed → OpenIdle` on open (entry control enabled only),
//! `OpenIdle → OpenSubmitting` on submit,
//! `OpenSubmitting → Closed` on success, `OpenSubmitting → OpenIdle` on failure,
//! `OpenIdle → Closed` on cancel.
//!
//! Each submission is tagged with a ticket id. A result is applied only while
//! its ticket is the outstanding one and the workflow has not been disposed.
//! Resume reads are tagged the same way, and submit stays disabled until the
//! latest read lands in the draft.

#[cfg(test)]
#[path = "apply_test.rs"]
mod apply_test;

use crate::net::api::SubmitError;
use crate::net::types::{ApplicationPayload, Education, Job, ResumeFile, User};
use crate::state::toast::Notification;

/// Toast shown after the backend accepts an application.
pub const SUBMITTED_MESSAGE: &str = "Job application submitted !!";

/// Observable phase of the panel and its request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyPhase {
    #[default]
    Closed,
    OpenIdle,
    OpenSubmitting,
}

/// Label and availability of the button that opens the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryControl {
    pub label: &'static str,
    pub enabled: bool,
}

impl EntryControl {
    /// A closed posting wins over an existing application.
    pub fn for_job(job_open: bool, applied: bool) -> Self {
        match (job_open, applied) {
            (false, _) => Self { label: "Hiring Closed", enabled: false },
            (true, true) => Self { label: "Applied", enabled: false },
            (true, false) => Self { label: "Apply", enabled: true },
        }
    }

    pub fn class(self) -> &'static str {
        if self.enabled { "btn btn--lg btn--primary" } else { "btn btn--lg btn--closed" }
    }
}

/// How long a draft survives once the panel closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DraftLifetime {
    /// Start from an empty draft every time the panel opens.
    #[default]
    PerOpen,
    /// Keep whatever was typed until a submission succeeds.
    PerInstance,
}

/// In-progress form values, bound one-to-one to the panel's inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApplicationDraft {
    /// Raw text of the numeric input, kept verbatim so partial input survives re-render.
    pub experience: String,
    pub skills: String,
    pub education: Option<Education>,
    pub resume: Option<ResumeFile>,
}

impl ApplicationDraft {
    /// Parsed years of experience; blank or non-numeric input yields `None`.
    pub fn experience_years(&self) -> Option<f64> {
        self.experience.trim().parse::<f64>().ok().filter(|years| years.is_finite())
    }

    pub fn set_experience(&mut self, raw: &str) {
        raw.clone_into(&mut self.experience);
    }

    pub fn set_skills(&mut self, raw: &str) {
        raw.clone_into(&mut self.skills);
    }

    pub fn set_education(&mut self, level: Education) {
        self.education = Some(level);
    }

    pub fn set_resume(&mut self, resume: Option<ResumeFile>) {
        self.resume = resume;
    }

    /// Combine the draft with job and user identity into the wire payload.
    pub fn to_payload(&self, job: &Job, user: &User) -> ApplicationPayload {
        ApplicationPayload {
            name: user.display_name().to_owned(),
            experience: self.experience_years(),
            skills: self.skills.clone(),
            education: self.education,
            resume: self.resume.clone(),
            job_id: job.id.clone(),
            user_id: user.id().to_owned(),
        }
    }
}

/// Handle for one outstanding submission.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitTicket {
    pub id: u64,
    pub payload: ApplicationPayload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Failed(SubmitError),
}

/// What the view layer must do once a submission settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitEffect {
    pub outcome: SubmitOutcome,
    /// Toast to display, if any. Failures produce none.
    pub notification: Option<Notification>,
    /// Whether the parent's `on_application_submit` should run.
    pub notify_parent: bool,
}

/// Per-instance workflow state for one apply drawer.
#[derive(Clone, Debug, Default)]
pub struct ApplyWorkflow {
    open: bool,
    draft: ApplicationDraft,
    lifetime: DraftLifetime,
    in_flight: Option<u64>,
    last_ticket: u64,
    resume_pending: Option<u64>,
    last_resume_read: u64,
    disposed: bool,
}

impl ApplyWorkflow {
    pub fn new(lifetime: DraftLifetime) -> Self {
        Self { lifetime, ..Self::default() }
    }

    pub fn phase(&self) -> ApplyPhase {
        match (self.open, self.in_flight.is_some()) {
            (false, _) => ApplyPhase::Closed,
            (true, false) => ApplyPhase::OpenIdle,
            (true, true) => ApplyPhase::OpenSubmitting,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Loading flag driving the bar loader and the disabled submit button.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_submit(&self) -> bool {
        self.open && self.in_flight.is_none() && self.resume_pending.is_none() && !self.disposed
    }

    /// A picked resume is still being read into memory.
    pub fn is_reading_resume(&self) -> bool {
        self.resume_pending.is_some()
    }

    pub fn lifetime(&self) -> DraftLifetime {
        self.lifetime
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.draft
    }

    /// Open the panel. Returns `false` when the entry control is disabled.
    pub fn open(&mut self, entry: EntryControl) -> bool {
        if !entry.enabled || self.disposed {
            return false;
        }
        // A draft with a request still out is kept so a failure can be corrected.
        if !self.open && self.lifetime == DraftLifetime::PerOpen && self.in_flight.is_none() {
            self.reset_draft();
        }
        self.open = true;
        true
    }

    /// Close the panel without submitting. The draft is left as-is, and an
    /// outstanding request still settles against this workflow.
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Start a submission, entering `OpenSubmitting`.
    ///
    /// Returns `None` while a request is already in flight or the panel is closed.
    pub fn begin_submit(&mut self, job: &Job, user: &User) -> Option<SubmitTicket> {
        if !self.can_submit() {
            return None;
        }
        self.last_ticket += 1;
        let id = self.last_ticket;
        self.in_flight = Some(id);
        Some(SubmitTicket { id, payload: self.draft.to_payload(job, user) })
    }

    /// Apply the result of a submission.
    ///
    /// Returns `None` when the ticket is stale or the workflow was disposed;
    /// such results must not reach the UI.
    pub fn finish_submit(&mut self, ticket_id: u64, result: Result<(), SubmitError>) -> Option<SubmitEffect> {
        if self.disposed || self.in_flight != Some(ticket_id) {
            return None;
        }
        self.in_flight = None;
        let effect = match result {
            Ok(()) => {
                self.open = false;
                self.reset_draft();
                SubmitEffect {
                    outcome: SubmitOutcome::Submitted,
                    notification: Some(Notification::success(SUBMITTED_MESSAGE)),
                    notify_parent: true,
                }
            }
            Err(err) => SubmitEffect { outcome: SubmitOutcome::Failed(err), notification: None, notify_parent: false },
        };
        Some(effect)
    }

    /// Note that a picked file is being read; returns the read's id.
    pub fn begin_resume_read(&mut self) -> u64 {
        self.last_resume_read += 1;
        self.resume_pending = Some(self.last_resume_read);
        self.last_resume_read
    }

    /// Store the result of a resume read. `None` means the read failed and the
    /// draft keeps no file.
    ///
    /// Returns `false` and changes nothing when a newer read started, the draft
    /// was reset, or the workflow was disposed.
    pub fn finish_resume_read(&mut self, read_id: u64, resume: Option<ResumeFile>) -> bool {
        if self.disposed || self.resume_pending != Some(read_id) {
            return false;
        }
        self.resume_pending = None;
        self.draft.resume = resume;
        true
    }

    /// The file picker was cleared.
    pub fn clear_resume(&mut self) {
        self.resume_pending = None;
        self.draft.resume = None;
    }

    fn reset_draft(&mut self) {
        self.draft = ApplicationDraft::default();
        self.resume_pending = None;
    }

    /// Tear down: any outstanding result is dropped and no further transitions apply.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.in_flight = None;
        self.resume_pending = None;
        self.open = false;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}
