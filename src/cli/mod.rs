//! Interactive terminal front-end for the lead wizard.
//!
//! The loop in [`drive`] is pure orchestration over a [`StepPresenter`], so
//! the whole journey can be exercised in tests with scripted answers; only
//! [`TerminalPresenter`] talks to dialoguer.

pub mod io;
pub mod output;
pub mod screens;

use std::fs;
use std::time::Duration;

use dialoguer::theme::ColorfulTheme;

use crate::config::ConfigManager;
use crate::errors::CliError;
use crate::redirect::RedirectTimer;
use crate::schema::{self, keys, FieldDescriptor, FieldRule, Level, Step};
use crate::submit::{HttpSubmissionClient, SubmissionClient};
use crate::wizard::{
    Advance, ResumeAttachment, ResumePolicy, SubmissionStatus, WizardController,
};

/// Navigation choice offered beneath each entry step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Back,
    Reset,
    Quit,
}

/// Choice offered on the preview step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    Submit,
    Back,
    Reset,
    Quit,
}

/// What to do with the resume slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeChoice {
    Keep,
    Attach(ResumeAttachment),
    Remove,
}

/// How the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Submitted,
    Quit,
}

/// Interaction surface the wizard loop is driven through.
pub trait StepPresenter {
    /// Asks for a (possibly corrected) value for one field. `error` carries
    /// the field's message from the latest validation, if any.
    fn edit_field(
        &mut self,
        field: &FieldDescriptor,
        current: &str,
        error: Option<&str>,
    ) -> Result<String, CliError>;

    /// Lets the user attach, replace, or remove the resume.
    fn edit_resume(
        &mut self,
        current: Option<&ResumeAttachment>,
        error: Option<&str>,
    ) -> Result<ResumeChoice, CliError>;

    /// Navigation menu under an entry step.
    fn step_action(&mut self, step: Step) -> Result<StepAction, CliError>;

    /// Menu on the preview step. `failure` is the last submission error, if
    /// one is pending retry.
    fn preview_action(&mut self, failure: Option<&str>) -> Result<PreviewAction, CliError>;
}

/// Entry point used by the binary: loads config, wires the HTTP client, and
/// runs the wizard against the terminal.
pub fn run_cli() -> Result<(), CliError> {
    let config = ConfigManager::new().load()?;
    let policy = ResumePolicy {
        max_bytes: config.max_resume_bytes,
        accepted_extensions: config.accepted_resume_types.clone(),
    };
    let client = HttpSubmissionClient::new(&config.endpoint_url)?;
    let mut controller = WizardController::new(policy);
    let mut presenter = TerminalPresenter::new();

    output::section("Contact Us");
    output::info("Tell us about your study-abroad plans. You can go back at any step.");

    match drive(&mut controller, &mut presenter, &client)? {
        SessionOutcome::Submitted => {
            screens::print_submitted(&config.redirect_url);
            output::info(format!(
                "Taking you to {} in {} seconds...",
                config.redirect_url, config.redirect_delay_secs
            ));
            let url = config.redirect_url.clone();
            let timer = RedirectTimer::schedule(
                Duration::from_secs(config.redirect_delay_secs),
                move || output::info(format!("Redirecting you to {url} now.")),
            );
            timer.wait();
        }
        SessionOutcome::Quit => output::info("Session closed. Nothing was submitted."),
    }
    Ok(())
}

/// Drives the controller until the lead is submitted or the user quits.
pub fn drive<P: StepPresenter>(
    controller: &mut WizardController,
    presenter: &mut P,
    client: &dyn SubmissionClient,
) -> Result<SessionOutcome, CliError> {
    loop {
        let step = controller.active_step();
        if step == Step::Preview {
            screens::print_preview(controller.state());
            let failure = match controller.status() {
                SubmissionStatus::Failed(message) => Some(message.clone()),
                _ => None,
            };
            match presenter.preview_action(failure.as_deref())? {
                PreviewAction::Submit => match controller.advance() {
                    Advance::ReadyToSubmit => {
                        output::info("Submitting your details...");
                        match controller.submit(client) {
                            SubmissionStatus::Submitted => return Ok(SessionOutcome::Submitted),
                            SubmissionStatus::Failed(message) => {
                                output::error(format!("Submission failed: {message}"));
                                output::info("Your details were kept; you can retry.");
                            }
                            _ => {}
                        }
                    }
                    Advance::SentBack | Advance::Blocked => {
                        output::warning("Some details need attention before submitting.");
                        screens::print_errors(controller.errors());
                    }
                    Advance::Moved => {}
                },
                PreviewAction::Back => {
                    controller.retreat();
                }
                PreviewAction::Reset => controller.reset(),
                PreviewAction::Quit => return Ok(SessionOutcome::Quit),
            }
            continue;
        }

        screens::print_step_header(step);
        for field in schema::step_fields(step) {
            let current = controller.state().field(field.key).unwrap_or_default().to_string();
            let error = controller.errors().get(field.key).cloned();
            let value = presenter.edit_field(field, &current, error.as_deref())?;
            controller.update_field(field.key, value);
        }

        if step == Step::Contact {
            let error = controller.errors().get(keys::RESUME).cloned();
            let choice = {
                let current = controller.state().resume();
                presenter.edit_resume(current, error.as_deref())?
            };
            match choice {
                ResumeChoice::Keep => {}
                ResumeChoice::Remove => controller.clear_resume(),
                ResumeChoice::Attach(attachment) => {
                    if !controller.set_resume(attachment) {
                        screens::print_errors(controller.errors());
                    }
                }
            }
        }

        match presenter.step_action(step)? {
            StepAction::Next => {
                if controller.advance() == Advance::Blocked {
                    output::warning("Please fix the highlighted fields.");
                    screens::print_errors(controller.errors());
                }
            }
            StepAction::Back => {
                controller.retreat();
            }
            StepAction::Reset => controller.reset(),
            StepAction::Quit => return Ok(SessionOutcome::Quit),
        }
    }
}

/// Dialoguer-backed presenter used by the binary.
pub struct TerminalPresenter {
    theme: ColorfulTheme,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn edit_level(&mut self, current: &str) -> Result<String, CliError> {
        let labels: Vec<&str> = Level::ALL.iter().map(|level| level.label()).collect();
        let default = Level::parse(current)
            .map(|level| level as usize)
            .unwrap_or(0);
        let picked = io::prompt_select(&self.theme, "Level Applying for", &labels, default)?;
        Ok(labels[picked].to_string())
    }

    fn edit_country(&mut self, current: &str) -> Result<String, CliError> {
        const OTHER: &str = "Other (type a country)";
        let mut options: Vec<&str> = schema::COUNTRY_SUGGESTIONS.to_vec();
        options.push(OTHER);
        let default = options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(current))
            .unwrap_or(0);
        let picked = io::prompt_select(&self.theme, "Country Interested", &options, default)?;
        if options[picked] == OTHER {
            io::prompt_text(&self.theme, "Country Interested", Some(current))
        } else {
            Ok(options[picked].to_string())
        }
    }

    fn read_attachment(&mut self) -> Result<Option<ResumeAttachment>, CliError> {
        let path = io::prompt_text(&self.theme, "Path to resume file", None)?;
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let bytes = match fs::read(trimmed) {
            Ok(bytes) => bytes,
            Err(err) => {
                io::print_error(format!("Could not read `{trimmed}`: {err}"));
                return Ok(None);
            }
        };
        let file_name = std::path::Path::new(trimmed)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| trimmed.to_string());
        Ok(Some(ResumeAttachment::new(file_name, bytes)))
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl StepPresenter for TerminalPresenter {
    fn edit_field(
        &mut self,
        field: &FieldDescriptor,
        current: &str,
        error: Option<&str>,
    ) -> Result<String, CliError> {
        if let Some(message) = error {
            io::print_warning(format!("{}: {message}", field.label));
        }
        match field.rule {
            FieldRule::Level => self.edit_level(current),
            _ if field.key == keys::COUNTRY => self.edit_country(current),
            _ => io::prompt_text(&self.theme, field.label, Some(current)),
        }
    }

    fn edit_resume(
        &mut self,
        current: Option<&ResumeAttachment>,
        error: Option<&str>,
    ) -> Result<ResumeChoice, CliError> {
        if let Some(message) = error {
            io::print_warning(format!("Resume: {message}"));
        }
        match current {
            None => {
                let wants = io::confirm_action(
                    &self.theme,
                    "Attach a resume (PDF/DOC/DOCX, up to 5 MB)?",
                    false,
                )?;
                if !wants {
                    return Ok(ResumeChoice::Keep);
                }
                Ok(self
                    .read_attachment()?
                    .map_or(ResumeChoice::Keep, ResumeChoice::Attach))
            }
            Some(resume) => {
                let prompt = format!("Resume `{}` attached", resume.file_name());
                let picked = io::prompt_select(
                    &self.theme,
                    &prompt,
                    &["Keep it", "Replace it", "Remove it"],
                    0,
                )?;
                match picked {
                    1 => Ok(self
                        .read_attachment()?
                        .map_or(ResumeChoice::Keep, ResumeChoice::Attach)),
                    2 => Ok(ResumeChoice::Remove),
                    _ => Ok(ResumeChoice::Keep),
                }
            }
        }
    }

    fn step_action(&mut self, step: Step) -> Result<StepAction, CliError> {
        let actions: &[(&str, StepAction)] = if step == Step::Personal {
            &[
                ("Next", StepAction::Next),
                ("Reset", StepAction::Reset),
                ("Quit", StepAction::Quit),
            ]
        } else {
            &[
                ("Next", StepAction::Next),
                ("Back", StepAction::Back),
                ("Reset", StepAction::Reset),
                ("Quit", StepAction::Quit),
            ]
        };
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let picked = io::prompt_select(&self.theme, "Continue", &labels, 0)?;
        Ok(actions[picked].1)
    }

    fn preview_action(&mut self, failure: Option<&str>) -> Result<PreviewAction, CliError> {
        if let Some(message) = failure {
            io::print_error(format!("Last submission failed: {message}"));
        }
        let actions = [
            ("Confirm Submit", PreviewAction::Submit),
            ("Back", PreviewAction::Back),
            ("Reset", PreviewAction::Reset),
            ("Quit", PreviewAction::Quit),
        ];
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let picked = io::prompt_select(&self.theme, "Review your details", &labels, 0)?;
        Ok(actions[picked].1)
    }
}
