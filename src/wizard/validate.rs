//! Pure validation over the collected form state.
//!
//! Every function here is side-effect free: given a step and the current
//! values, it returns the complete set of failing fields for that step. No
//! short-circuiting, so simultaneous multi-field errors are reported in one
//! pass.

use std::collections::BTreeMap;

use crate::schema::{self, keys, FieldRule, Level, Step};
use crate::wizard::{FormState, ResumePolicy};

/// Mapping from field key to a human-readable message.
pub type ErrorSet = BTreeMap<&'static str, String>;

/// Validates the fields owned by `step`.
///
/// `Step::Preview` owns no text fields; validating it checks the optional
/// resume attachment against the policy instead.
pub fn validate_step(
    step: Step,
    state: &FormState,
    current_year: i32,
    policy: &ResumePolicy,
) -> ErrorSet {
    let mut errors = ErrorSet::new();

    for field in schema::step_fields(step) {
        let raw = state.field(field.key).unwrap_or_default();
        if let Err(message) = check_rule(field.rule, field.required, raw, current_year) {
            errors.insert(field.key, message);
        }
    }

    if step == Step::Preview {
        if let Some(resume) = state.resume() {
            if let Err(message) = check_resume(resume.file_name(), resume.size(), policy) {
                errors.insert(keys::RESUME, message);
            }
        }
    }

    errors
}

/// Defensive sweep across every step, merging all failing fields.
pub fn validate_all(state: &FormState, current_year: i32, policy: &ResumePolicy) -> ErrorSet {
    let mut errors = ErrorSet::new();
    for step in Step::ALL {
        errors.extend(validate_step(step, state, current_year, policy));
    }
    errors
}

/// Earliest step (in wizard order) holding an invalid field, if any.
pub fn first_invalid_step(
    state: &FormState,
    current_year: i32,
    policy: &ResumePolicy,
) -> Option<Step> {
    Step::ALL
        .into_iter()
        .find(|step| !validate_step(*step, state, current_year, policy).is_empty())
}

/// Checks a prospective resume attachment against the policy.
pub fn check_resume(file_name: &str, size: u64, policy: &ResumePolicy) -> Result<(), String> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !policy
        .accepted_extensions
        .iter()
        .any(|accepted| accepted.eq_ignore_ascii_case(&extension))
    {
        return Err(format!(
            "Resume must be one of: {}",
            policy.accepted_extensions.join(", ").to_uppercase()
        ));
    }
    if size > policy.max_bytes {
        return Err(format!(
            "Resume exceeds the {} MB limit",
            policy.max_bytes / (1024 * 1024)
        ));
    }
    Ok(())
}

fn check_rule(
    rule: FieldRule,
    required: bool,
    raw: &str,
    current_year: i32,
) -> Result<(), String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        if required {
            return Err("This field is required".into());
        }
        return Ok(());
    }

    match rule {
        FieldRule::NonEmpty | FieldRule::Free => Ok(()),
        FieldRule::IntakeYear => check_intake_year(trimmed, current_year),
        FieldRule::Level => {
            Level::parse(trimmed).map(|_| ()).ok_or_else(|| {
                format!(
                    "Level must be one of: {}",
                    Level::ALL.map(Level::label).join(", ")
                )
            })
        }
        FieldRule::Email => {
            if is_valid_email(trimmed) {
                Ok(())
            } else {
                Err("Enter a valid email address (e.g., name@example.com)".into())
            }
        }
        FieldRule::Phone => {
            if is_valid_phone(trimmed) {
                Ok(())
            } else {
                Err("Phone must be 8-15 characters using digits, + or -".into())
            }
        }
    }
}

fn check_intake_year(raw: &str, current_year: i32) -> Result<(), String> {
    let max_year = current_year + schema::INTAKE_YEAR_HORIZON;
    match raw.parse::<i32>() {
        Ok(year) if (current_year..=max_year).contains(&year) => Ok(()),
        Ok(_) => Err(format!(
            "Intake year must be between {current_year} and {max_year}"
        )),
        Err(_) => Err("Enter the intake year as a number (e.g., 2027)".into()),
    }
}

/// Minimal address grammar: one `@`, non-empty local part, and a domain with
/// at least one dot-separated label on each side. Whitespace rejected.
fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_valid_phone(raw: &str) -> bool {
    (8..=15).contains(&raw.len())
        && raw
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch == '+' || ch == '-')
}
