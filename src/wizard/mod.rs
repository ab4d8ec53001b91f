//! Wizard controller: owns the collected form state, the active step, the
//! published validation errors, and the submission status.
//!
//! The controller is a plain state machine with no rendering concerns, so
//! every transition can be unit tested without a terminal. The CLI front-end
//! in [`crate::cli`] drives it through [`advance`](WizardController::advance),
//! [`retreat`](WizardController::retreat) and friends.

pub mod validate;

use chrono::Datelike;

use crate::schema::{self, keys, Step};
use crate::submit::SubmissionClient;

pub use validate::ErrorSet;

/// The complete set of user-entered values for one session.
///
/// Text fields hold raw strings exactly as entered; parsing and range checks
/// belong to the validation engine. The resume is an opaque binary blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    first_name: String,
    last_name: String,
    country_interested: String,
    intake_year: String,
    level_applying: String,
    email: String,
    phone: String,
    notes: String,
    resume: Option<ResumeAttachment>,
}

impl FormState {
    /// Current value of a text field, by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            keys::FIRST_NAME => Some(&self.first_name),
            keys::LAST_NAME => Some(&self.last_name),
            keys::COUNTRY => Some(&self.country_interested),
            keys::INTAKE_YEAR => Some(&self.intake_year),
            keys::LEVEL => Some(&self.level_applying),
            keys::EMAIL => Some(&self.email),
            keys::PHONE => Some(&self.phone),
            keys::NOTES => Some(&self.notes),
            _ => None,
        }
    }

    /// Overwrites a text field. Returns `false` for unknown keys.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match key {
            keys::FIRST_NAME => &mut self.first_name,
            keys::LAST_NAME => &mut self.last_name,
            keys::COUNTRY => &mut self.country_interested,
            keys::INTAKE_YEAR => &mut self.intake_year,
            keys::LEVEL => &mut self.level_applying,
            keys::EMAIL => &mut self.email,
            keys::PHONE => &mut self.phone,
            keys::NOTES => &mut self.notes,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Every text field with its wire name, in wizard order.
    pub fn text_fields(&self) -> [(&'static str, &str); 8] {
        [
            (keys::FIRST_NAME, self.first_name.as_str()),
            (keys::LAST_NAME, self.last_name.as_str()),
            (keys::COUNTRY, self.country_interested.as_str()),
            (keys::INTAKE_YEAR, self.intake_year.as_str()),
            (keys::LEVEL, self.level_applying.as_str()),
            (keys::EMAIL, self.email.as_str()),
            (keys::PHONE, self.phone.as_str()),
            (keys::NOTES, self.notes.as_str()),
        ]
    }

    pub fn resume(&self) -> Option<&ResumeAttachment> {
        self.resume.as_ref()
    }

    pub fn attach_resume(&mut self, attachment: ResumeAttachment) {
        self.resume = Some(attachment);
    }

    pub fn clear_resume(&mut self) {
        self.resume = None;
    }
}

/// An uploaded resume: display name plus opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeAttachment {
    file_name: String,
    bytes: Vec<u8>,
}

impl ResumeAttachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Size and type constraints applied to resume uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePolicy {
    pub max_bytes: u64,
    pub accepted_extensions: Vec<String>,
}

impl Default for ResumePolicy {
    fn default() -> Self {
        Self {
            max_bytes: schema::MAX_RESUME_BYTES,
            accepted_extensions: schema::RESUME_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Where the session stands with respect to the remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    /// No submission attempted since the last reset.
    Idle,
    /// A submission is running; navigation and duplicate submits are refused.
    InFlight,
    /// The last attempt failed; the message is surfaced on the preview step.
    Failed(String),
    /// The lead was accepted. Terminal.
    Submitted,
}

/// Outcome of an [`advance`](WizardController::advance) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved one step forward.
    Moved,
    /// Validation failed on the active step; errors were published.
    Blocked,
    /// The defensive full-form check found an earlier invalid step and
    /// navigated back to it.
    SentBack,
    /// Preview validated clean; the caller may submit.
    ReadyToSubmit,
}

/// Orchestrates step transitions, field updates, and submission.
pub struct WizardController {
    state: FormState,
    active_step: Step,
    errors: ErrorSet,
    status: SubmissionStatus,
    policy: ResumePolicy,
    current_year: i32,
}

impl WizardController {
    pub fn new(policy: ResumePolicy) -> Self {
        Self::with_year(policy, chrono::Local::now().year())
    }

    /// Pins the current year, so intake-year bounds are deterministic in
    /// tests.
    pub fn with_year(policy: ResumePolicy, current_year: i32) -> Self {
        Self {
            state: FormState::default(),
            active_step: Step::Personal,
            errors: ErrorSet::new(),
            status: SubmissionStatus::Idle,
            policy,
            current_year,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn active_step(&self) -> Step {
        self.active_step
    }

    pub fn errors(&self) -> &ErrorSet {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn policy(&self) -> &ResumePolicy {
        &self.policy
    }

    /// Overwrites one field and clears that field's error, leaving the rest
    /// of the error set untouched.
    pub fn update_field(&mut self, key: &str, value: impl Into<String>) {
        if self.state.set_field(key, value) {
            if let Some(descriptor) = schema::descriptor(key) {
                self.errors.remove(descriptor.key);
            }
        }
    }

    /// Validates and stores an attachment. A rejected file leaves any
    /// previously accepted attachment in place and flags the resume field.
    pub fn set_resume(&mut self, attachment: ResumeAttachment) -> bool {
        match validate::check_resume(attachment.file_name(), attachment.size(), &self.policy) {
            Ok(()) => {
                tracing::debug!(file = %attachment.file_name(), size = attachment.size(), "resume attached");
                self.state.attach_resume(attachment);
                self.errors.remove(keys::RESUME);
                true
            }
            Err(message) => {
                self.errors.insert(keys::RESUME, message);
                false
            }
        }
    }

    pub fn clear_resume(&mut self) {
        self.state.clear_resume();
        self.errors.remove(keys::RESUME);
    }

    /// Validates the active step and moves forward when it passes.
    ///
    /// On the preview step this runs the defensive full-form check instead:
    /// steps can be revisited with state retained, so a stale earlier step
    /// must never slip through to submission. When an earlier step is
    /// invalid, the controller navigates back to the first offender.
    pub fn advance(&mut self) -> Advance {
        if self.active_step == Step::Preview {
            return match validate::first_invalid_step(&self.state, self.current_year, &self.policy)
            {
                None => {
                    self.errors.clear();
                    Advance::ReadyToSubmit
                }
                Some(step) => {
                    self.errors =
                        validate::validate_step(step, &self.state, self.current_year, &self.policy);
                    if step == Step::Preview {
                        // Only the attachment can be at fault here; stay put.
                        Advance::Blocked
                    } else {
                        tracing::warn!(step = %step, "submission aborted: earlier step invalid");
                        self.active_step = step;
                        Advance::SentBack
                    }
                }
            };
        }

        let errors =
            validate::validate_step(self.active_step, &self.state, self.current_year, &self.policy);
        if errors.is_empty() {
            if let Some(next) = self.active_step.next() {
                self.active_step = next;
            }
            self.errors.clear();
            Advance::Moved
        } else {
            self.errors = errors;
            Advance::Blocked
        }
    }

    /// Steps back without validating. No-op on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.active_step.prev() {
            Some(prev) => {
                self.active_step = prev;
                self.errors.clear();
                true
            }
            None => false,
        }
    }

    /// Restores the session to its initial state.
    pub fn reset(&mut self) {
        self.state = FormState::default();
        self.active_step = Step::Personal;
        self.errors.clear();
        self.status = SubmissionStatus::Idle;
    }

    /// Runs the submission through `client`, guarding against duplicate
    /// in-flight calls and known-invalid data.
    ///
    /// On success the controller enters the terminal `Submitted` status. On
    /// failure it stays on the preview step with the entered data intact, so
    /// the user may correct and retry.
    pub fn submit(&mut self, client: &dyn SubmissionClient) -> &SubmissionStatus {
        if matches!(
            self.status,
            SubmissionStatus::InFlight | SubmissionStatus::Submitted
        ) {
            return &self.status;
        }

        // Same defensive gate as advance(): never transmit invalid data,
        // even when the caller skipped straight to submit.
        if let Some(step) =
            validate::first_invalid_step(&self.state, self.current_year, &self.policy)
        {
            self.errors =
                validate::validate_step(step, &self.state, self.current_year, &self.policy);
            if step != Step::Preview {
                self.active_step = step;
            }
            return &self.status;
        }

        self.status = SubmissionStatus::InFlight;
        tracing::info!("submitting lead");
        self.status = match client.submit(&self.state) {
            Ok(()) => {
                tracing::info!("lead submitted");
                SubmissionStatus::Submitted
            }
            Err(err) => {
                tracing::warn!(error = %err, "lead submission failed");
                SubmissionStatus::Failed(err.to_string())
            }
        };
        &self.status
    }
}
